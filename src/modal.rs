use crate::command::{CommandRegistry, CommandResult};
use crate::types::{Mode, VisualKind};

/// Events accepted by the modal state machine.
///
/// Mode-entry events are only meaningful from the modes the transition
/// table allows; anything else is ignored with a debug note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeEvent {
    /// NORMAL/VISUAL → INSERT.
    EnterInsert,
    /// NORMAL → VISUAL, or update the selection kind while in VISUAL.
    EnterVisual(VisualKind),
    /// NORMAL/VISUAL → COMMAND.
    EnterCommand,
    /// VISUAL → NORMAL via `v` (toggle, not a cancel).
    ExitVisual,
    /// Cancel out of the current mode; discards accumulated state.
    Escape,
    /// Append a digit to the count buffer (NORMAL/VISUAL).
    AppendBuffer(char),
    /// Clear the count buffer after a command consumed it.
    ClearBuffer,
    /// Replace the command-line input (COMMAND).
    UpdateCommandInput(String),
}

/// The NORMAL/INSERT/VISUAL/COMMAND state machine.
///
/// Owns the count buffer, the command-line input and the status message.
/// Mutated by exactly one caller (the dispatcher) and read by the host for
/// rendering. Invariant after every event: `count == 0` iff the count
/// buffer is empty.
#[derive(Debug, Clone)]
pub struct ModalStateMachine {
    mode: Mode,
    previous_mode: Mode,
    command_buffer: String,
    count: u32,
    status_message: Option<String>,
    command_input: String,
    visual_kind: VisualKind,
}

impl Default for ModalStateMachine {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            previous_mode: Mode::Normal,
            command_buffer: String::new(),
            count: 0,
            status_message: None,
            command_input: String::new(),
            visual_kind: VisualKind::CharWise,
        }
    }
}

impl ModalStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn previous_mode(&self) -> Mode {
        self.previous_mode
    }

    /// The accumulated repeat count; 0 when no digits have been typed.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn command_buffer(&self) -> &str {
        &self.command_buffer
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn command_input(&self) -> &str {
        &self.command_input
    }

    /// The selection kind; meaningful while in VISUAL mode.
    pub fn visual_kind(&self) -> VisualKind {
        self.visual_kind
    }

    pub fn set_status_message(&mut self, message: Option<String>) {
        self.status_message = message;
    }

    pub fn send(&mut self, event: ModeEvent) {
        match (self.mode, event) {
            (Mode::Normal | Mode::Visual, ModeEvent::EnterInsert) => {
                self.change_mode(Mode::Insert);
            }
            (Mode::Normal, ModeEvent::EnterVisual(kind)) => {
                self.visual_kind = kind;
                self.change_mode(Mode::Visual);
            }
            (Mode::Visual, ModeEvent::EnterVisual(kind)) => {
                self.visual_kind = kind;
            }
            (Mode::Normal | Mode::Visual, ModeEvent::EnterCommand) => {
                self.command_input.clear();
                self.change_mode(Mode::Command);
            }
            (Mode::Visual, ModeEvent::ExitVisual) => {
                self.clear_counts();
                self.change_mode(Mode::Normal);
            }
            (_, ModeEvent::Escape) => {
                if self.mode != Mode::Normal {
                    self.change_mode(Mode::Normal);
                }
                self.clear_counts();
                self.status_message = None;
                self.command_input.clear();
            }
            (Mode::Normal | Mode::Visual, ModeEvent::AppendBuffer(c)) => {
                self.append_digit(c);
            }
            (_, ModeEvent::ClearBuffer) => {
                self.clear_counts();
            }
            (Mode::Command, ModeEvent::UpdateCommandInput(input)) => {
                self.command_input = input;
            }
            (mode, event) => {
                tracing::debug!(?mode, ?event, "ignoring event with no transition");
            }
        }
    }

    /// Runs the accumulated command line through the registry and applies
    /// the COMMAND-mode transition: success returns to NORMAL with the
    /// result message as status; failure stays in COMMAND (so the user can
    /// correct the input) with the error as status. The command input is
    /// cleared either way.
    pub fn execute_command(&mut self, registry: &mut CommandRegistry) -> CommandResult {
        let raw = std::mem::take(&mut self.command_input);
        let result = registry.execute(&raw);
        match &result {
            Ok(message) => {
                self.clear_counts();
                self.status_message = message.clone();
                self.change_mode(Mode::Normal);
            }
            Err(error) => {
                self.status_message = Some(error.to_string());
            }
        }
        result
    }

    fn change_mode(&mut self, to: Mode) {
        self.previous_mode = self.mode;
        self.mode = to;
    }

    fn clear_counts(&mut self) {
        self.command_buffer.clear();
        self.count = 0;
    }

    fn append_digit(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        // A leading zero would leave the buffer non-empty with count 0,
        // breaking the count/buffer invariant; hosts that want a `0`
        // line-start motion see it fall through as unhandled.
        if c == '0' && self.command_buffer.is_empty() {
            return;
        }
        self.command_buffer.push(c);
        self.count = self
            .count
            .saturating_mul(10)
            .saturating_add((c as u8 - b'0') as u32);
    }
}
