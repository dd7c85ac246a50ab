use crate::types::{ActionKind, Direction, Mode, VimCommand};

/// A single-letter operator awaiting its completing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// The first `d` of `dd`.
    Delete,
    /// The first `y` of `yy`.
    Yank,
}

impl Operator {
    fn from_key(c: char) -> Option<Operator> {
        match c {
            'd' => Some(Operator::Delete),
            'y' => Some(Operator::Yank),
            _ => None,
        }
    }

    fn completes(self, c: char) -> bool {
        matches!(
            (self, c),
            (Operator::Delete, 'd') | (Operator::Yank, 'y')
        )
    }

    fn line_action(self) -> ActionKind {
        match self {
            Operator::Delete => ActionKind::DeleteLine,
            Operator::Yank => ActionKind::Yank,
        }
    }
}

/// Result of parsing one keystroke in NORMAL or VISUAL mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// The semantic command, if this keystroke completed one.
    pub command: Option<VimCommand>,
    /// The operator to carry into the next keystroke.
    pub pending: Option<Operator>,
    /// Whether the count buffer has been consumed and should be cleared.
    pub clear_count: bool,
}

impl ParseOutcome {
    fn empty() -> Self {
        ParseOutcome {
            command: None,
            pending: None,
            clear_count: false,
        }
    }
}

/// Parses one keystroke against the accumulated count and pending operator.
///
/// Pure function: the caller owns the pending-operator and count state and
/// applies the outcome. Keys only reach this parser in NORMAL and VISUAL
/// mode; any other mode yields the empty outcome.
///
/// A count of 0 (no digits typed) is normalized to 1. An operator followed
/// by its own key completes a line action (`dd`, `yy`); followed by any
/// other key it is abandoned and that key is parsed fresh, so `d` then `x`
/// still deletes a character.
pub fn parse(key: char, mode: Mode, count: u32, pending: Option<Operator>) -> ParseOutcome {
    if !matches!(mode, Mode::Normal | Mode::Visual) {
        return ParseOutcome::empty();
    }
    let count = count.max(1);

    if let Some(op) = pending {
        if op.completes(key) {
            return ParseOutcome {
                command: Some(VimCommand::Action {
                    kind: op.line_action(),
                    count,
                }),
                pending: None,
                clear_count: true,
            };
        }
        // Abandoned operator; fall through and parse the key fresh.
    }

    if let Some(direction) = Direction::from_key(key) {
        return ParseOutcome {
            command: Some(VimCommand::Motion { direction, count }),
            pending: None,
            clear_count: true,
        };
    }

    match key {
        'x' => ParseOutcome {
            command: Some(VimCommand::Action {
                kind: ActionKind::DeleteChar,
                count,
            }),
            pending: None,
            clear_count: true,
        },
        'p' => ParseOutcome {
            command: Some(VimCommand::Action {
                kind: ActionKind::Paste,
                count,
            }),
            pending: None,
            clear_count: true,
        },
        // The count must survive to the completing key, e.g. "3dd".
        _ => match Operator::from_key(key) {
            Some(op) => ParseOutcome {
                command: None,
                pending: Some(op),
                clear_count: false,
            },
            None => ParseOutcome::empty(),
        },
    }
}
