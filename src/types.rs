/// The current mode of the input engine.
///
/// The same key produces different effects depending on the current mode,
/// as in vi/vim. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal mode - navigation, operators and counts.
    Normal,
    /// Insert mode - keystrokes pass through to the host as text.
    Insert,
    /// Visual mode - selection; the char/line kind is tracked by the
    /// state machine, not the mode itself.
    Visual,
    /// Command mode - a colon-command or search query is being entered.
    Command,
}

/// The type of visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    /// Character-wise selection (v).
    CharWise,
    /// Line-wise selection (V).
    LineWise,
}

/// A spatial direction between panels, mapped from the h/j/k/l motion keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

impl Direction {
    /// Maps a motion key to its direction: h, j, k, l.
    pub fn from_key(c: char) -> Option<Direction> {
        match c {
            'h' => Some(Direction::Left),
            'j' => Some(Direction::Down),
            'k' => Some(Direction::Up),
            'l' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Editing actions produced by operator and single-key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Delete the character under the cursor (x).
    DeleteChar,
    /// Delete the current line (dd).
    DeleteLine,
    /// Yank the current line (yy).
    Yank,
    /// Paste the last yank (p).
    Paste,
}

/// The intent tag carried on an automatic mode transition.
///
/// Hosts use these to decide where to place the cursor, what kind of
/// selection to start, or what the command line is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeIntent {
    /// `i` - insert at the cursor.
    InsertHere,
    /// `a` - insert after the cursor.
    InsertAfter,
    /// `o` - open a line below and insert.
    InsertLineBelow,
    /// `O` - open a line above and insert.
    InsertLineAbove,
    /// `I` - insert at the start of the line.
    InsertLineStart,
    /// `A` - insert at the end of the line.
    InsertLineEnd,
    /// `v` - character-wise visual selection.
    VisualChar,
    /// `V` - line-wise visual selection.
    VisualLine,
    /// `:` - an ex-style colon command.
    Ex,
    /// `/` - forward search query.
    SearchForward,
    /// `?` - backward search query.
    SearchBackward,
    /// `:` from VISUAL - a command scoped to the selection.
    VisualRange,
}

/// Semantic commands produced by the dispatcher for panel handlers.
///
/// A command is produced at most once per keystroke and is never persisted;
/// handlers react to it immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VimCommand {
    /// A cursor motion within the focused panel.
    Motion { direction: Direction, count: u32 },
    /// An editing action within the focused panel.
    Action { kind: ActionKind, count: u32 },
    /// Focus moved between panels; `target` is the newly focused panel.
    Navigation {
        direction: Direction,
        target: Option<String>,
    },
    /// The mode changed via an automatic transition.
    ModeChange {
        from: Mode,
        to: Mode,
        intent: Option<ModeIntent>,
    },
}
