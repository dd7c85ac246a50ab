use std::collections::HashMap;

use crate::command::CommandRegistry;
use crate::error::DispatchError;
use crate::key::{KeyCode, KeyEvent, Modifiers};
use crate::modal::{ModalStateMachine, ModeEvent};
use crate::panel::PanelRegistry;
use crate::parser::{self, Operator};
use crate::traits::PanelHandler;
use crate::types::{Direction, Mode, ModeIntent, VimCommand, VisualKind};

/// A point-in-time view of the dispatcher for host rendering.
#[derive(Debug, Clone)]
pub struct DispatcherSnapshot {
    pub mode: Mode,
    pub pending_operator: Option<Operator>,
    pub pending_count: u32,
    pub active_panel: Option<String>,
}

/// The per-session keystroke router.
///
/// Owns the modal state machine, the panel registry, the colon-command
/// registry and the per-panel handler sets, and runs every keystroke
/// through the three-tier pipeline: global shortcuts, mode-specific
/// keybindings, panel-local commands. The first tier that handles the key
/// short-circuits the rest; `process` returns false only when no tier
/// consumed the key, in which case the host treats it as raw text input.
#[derive(Default)]
pub struct InputDispatcher {
    panels: PanelRegistry,
    machine: ModalStateMachine,
    commands: CommandRegistry,
    handlers: HashMap<String, Vec<Box<dyn PanelHandler>>>,
    active_panel: Option<String>,
    pending: Option<Operator>,
    errors: Vec<DispatchError>,
}

impl InputDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panels(&self) -> &PanelRegistry {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut PanelRegistry {
        &mut self.panels
    }

    pub fn machine(&self) -> &ModalStateMachine {
        &self.machine
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.commands
    }

    pub fn commands_mut(&mut self) -> &mut CommandRegistry {
        &mut self.commands
    }

    pub fn active_panel(&self) -> Option<&str> {
        self.active_panel.as_deref()
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// Drives focus from outside keystroke handling (mouse click, an
    /// application-level jump). Focusing an unregistered id fails without
    /// changing the active panel; clearing focus always succeeds.
    pub fn set_active_panel(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.active_panel = None;
                true
            }
            Some(id) if self.panels.contains(id) => {
                self.active_panel = Some(id.to_string());
                true
            }
            Some(id) => {
                tracing::warn!(panel = %id, "cannot focus unregistered panel");
                false
            }
        }
    }

    /// Adds a handler to the panel's set; handlers run in registration order.
    pub fn register_component_handler<H>(&mut self, panel: impl Into<String>, handler: H)
    where
        H: PanelHandler + 'static,
    {
        self.handlers
            .entry(panel.into())
            .or_default()
            .push(Box::new(handler));
    }

    /// Removes every handler registered for the panel.
    pub fn unregister_component_handler(&mut self, panel: &str) {
        self.handlers.remove(panel);
    }

    /// Failures swallowed at the dispatch boundary since the last drain.
    pub fn take_errors(&mut self) -> Vec<DispatchError> {
        std::mem::take(&mut self.errors)
    }

    pub fn snapshot(&self) -> DispatcherSnapshot {
        DispatcherSnapshot {
            mode: self.machine.mode(),
            pending_operator: self.pending,
            pending_count: self.machine.count(),
            active_panel: self.active_panel.clone(),
        }
    }

    /// Routes one keystroke through the pipeline. Never panics and never
    /// propagates a handler failure; see `take_errors`.
    pub fn process(&mut self, event: KeyEvent) -> bool {
        if self.global_tier(event) {
            return true;
        }
        if self.mode_tier(event) {
            return true;
        }
        self.component_tier(event)
    }

    // Tier 1: ctrl+h/j/k/l spatial navigation, plus the terminal
    // compatibility rule that a bare Backspace/Delete in NORMAL mode is
    // indistinguishable from ctrl+h.
    fn global_tier(&mut self, event: KeyEvent) -> bool {
        if event.mods.contains(Modifiers::CTRL)
            && let KeyCode::Char(c) = event.code
            && let Some(direction) = Direction::from_key(c)
        {
            self.navigate(direction, event);
            return true;
        }

        if matches!(event.code, KeyCode::Backspace | KeyCode::Delete)
            && event.mods.is_empty()
            && self.machine.mode() == Mode::Normal
        {
            self.navigate(Direction::Left, event);
            return true;
        }

        false
    }

    // A navigation keystroke is consumed whether or not a neighbor exists.
    fn navigate(&mut self, direction: Direction, event: KeyEvent) {
        let Some(active) = self.active_panel.clone() else {
            return;
        };
        let Some(target) = self
            .panels
            .find_adjacent(&active, direction)
            .map(str::to_string)
        else {
            return;
        };
        self.active_panel = Some(target.clone());
        let command = VimCommand::Navigation {
            direction,
            target: Some(target.clone()),
        };
        self.notify_panel(&target, &command, event);
    }

    // Tier 2: standard modal keybindings and automatic transitions.
    fn mode_tier(&mut self, event: KeyEvent) -> bool {
        match self.machine.mode() {
            Mode::Normal => self.normal_mode_keys(event),
            Mode::Insert => self.insert_mode_keys(event),
            Mode::Visual => self.visual_mode_keys(event),
            Mode::Command => self.command_mode_keys(event),
        }
    }

    fn normal_mode_keys(&mut self, event: KeyEvent) -> bool {
        if event.code == KeyCode::Esc {
            self.escape();
            return true;
        }
        let KeyCode::Char(c) = event.code else {
            return false;
        };
        if event.mods.contains(Modifiers::CTRL) {
            return false;
        }
        if c.is_ascii_digit() {
            // A leading zero is not a count; hosts that bind `0` as a
            // line-start motion see it pass through unhandled.
            if c == '0' && self.machine.command_buffer().is_empty() {
                return false;
            }
            self.machine.send(ModeEvent::AppendBuffer(c));
            return true;
        }
        match c {
            'i' => self.transition(ModeEvent::EnterInsert, Some(ModeIntent::InsertHere), event),
            'a' => self.transition(ModeEvent::EnterInsert, Some(ModeIntent::InsertAfter), event),
            'o' => self.transition(
                ModeEvent::EnterInsert,
                Some(ModeIntent::InsertLineBelow),
                event,
            ),
            'O' => self.transition(
                ModeEvent::EnterInsert,
                Some(ModeIntent::InsertLineAbove),
                event,
            ),
            'I' => self.transition(
                ModeEvent::EnterInsert,
                Some(ModeIntent::InsertLineStart),
                event,
            ),
            'A' => self.transition(
                ModeEvent::EnterInsert,
                Some(ModeIntent::InsertLineEnd),
                event,
            ),
            'v' => self.transition(
                ModeEvent::EnterVisual(VisualKind::CharWise),
                Some(ModeIntent::VisualChar),
                event,
            ),
            'V' => self.transition(
                ModeEvent::EnterVisual(VisualKind::LineWise),
                Some(ModeIntent::VisualLine),
                event,
            ),
            ':' => self.transition(ModeEvent::EnterCommand, Some(ModeIntent::Ex), event),
            '/' => self.transition(
                ModeEvent::EnterCommand,
                Some(ModeIntent::SearchForward),
                event,
            ),
            '?' => self.transition(
                ModeEvent::EnterCommand,
                Some(ModeIntent::SearchBackward),
                event,
            ),
            _ => false,
        }
    }

    fn insert_mode_keys(&mut self, event: KeyEvent) -> bool {
        let is_exit = event.code == KeyCode::Esc
            || (event.mods.contains(Modifiers::CTRL)
                && matches!(event.code, KeyCode::Char('c') | KeyCode::Char('[')));
        if is_exit {
            self.escape();
            return true;
        }
        // Everything else is text; the host applies it when process
        // returns false.
        false
    }

    fn visual_mode_keys(&mut self, event: KeyEvent) -> bool {
        if event.code == KeyCode::Esc {
            self.escape();
            return true;
        }
        let KeyCode::Char(c) = event.code else {
            return false;
        };
        if event.mods.contains(Modifiers::CTRL) {
            return false;
        }
        if c.is_ascii_digit() {
            if c == '0' && self.machine.command_buffer().is_empty() {
                return false;
            }
            self.machine.send(ModeEvent::AppendBuffer(c));
            return true;
        }
        match c {
            'i' => self.transition(ModeEvent::EnterInsert, Some(ModeIntent::InsertHere), event),
            'a' => self.transition(ModeEvent::EnterInsert, Some(ModeIntent::InsertAfter), event),
            ':' => self.transition(ModeEvent::EnterCommand, Some(ModeIntent::VisualRange), event),
            'v' => self.transition(ModeEvent::ExitVisual, None, event),
            'V' => self.transition(
                ModeEvent::EnterVisual(VisualKind::LineWise),
                Some(ModeIntent::VisualLine),
                event,
            ),
            _ => false,
        }
    }

    fn command_mode_keys(&mut self, event: KeyEvent) -> bool {
        let is_cancel = event.code == KeyCode::Esc
            || (event.mods.contains(Modifiers::CTRL) && event.code == KeyCode::Char('c'));
        if is_cancel {
            self.escape();
            return true;
        }
        match event.code {
            KeyCode::Enter => {
                // Failure keeps COMMAND mode and surfaces as the status
                // message; success returns to NORMAL. Either way the
                // keystroke is consumed.
                let _ = self.machine.execute_command(&mut self.commands);
                true
            }
            KeyCode::Backspace => {
                let mut input = self.machine.command_input().to_string();
                input.pop();
                self.machine.send(ModeEvent::UpdateCommandInput(input));
                true
            }
            KeyCode::Char(c) if !event.mods.contains(Modifiers::CTRL) => {
                let mut input = self.machine.command_input().to_string();
                input.push(c);
                self.machine.send(ModeEvent::UpdateCommandInput(input));
                true
            }
            _ => false,
        }
    }

    // Tier 3: panel-local commands via the key-sequence parser. Only
    // NORMAL and VISUAL keys reach this tier.
    fn component_tier(&mut self, event: KeyEvent) -> bool {
        let mode = self.machine.mode();
        if !matches!(mode, Mode::Normal | Mode::Visual) {
            return false;
        }
        let KeyCode::Char(c) = event.code else {
            return false;
        };
        if event.mods.contains(Modifiers::CTRL) {
            return false;
        }

        let outcome = parser::parse(c, mode, self.machine.count(), self.pending);
        self.pending = outcome.pending;
        if outcome.clear_count {
            self.machine.send(ModeEvent::ClearBuffer);
        }

        let Some(command) = outcome.command else {
            return false;
        };
        let Some(active) = self.active_panel.clone() else {
            return false;
        };
        if !self.handlers.get(&active).is_some_and(|h| !h.is_empty()) {
            return false;
        }
        self.notify_panel(&active, &command, event);
        true
    }

    fn escape(&mut self) {
        self.pending = None;
        self.machine.send(ModeEvent::Escape);
    }

    // Applies a mode event and notifies the focused panel's handlers of
    // the transition. The pending operator survives only if the mode did
    // not actually change (e.g. `V` while already in VISUAL).
    fn transition(
        &mut self,
        event: ModeEvent,
        intent: Option<ModeIntent>,
        raw: KeyEvent,
    ) -> bool {
        let from = self.machine.mode();
        self.machine.send(event);
        let to = self.machine.mode();
        if to != from {
            self.pending = None;
        }
        if let Some(active) = self.active_panel.clone() {
            let command = VimCommand::ModeChange { from, to, intent };
            self.notify_panel(&active, &command, raw);
        }
        true
    }

    // Failure boundary for handler invocation: an Err is logged and
    // recorded, never propagated, and the remaining handlers still run.
    fn notify_panel(&mut self, panel: &str, command: &VimCommand, raw: KeyEvent) {
        let Some(handlers) = self.handlers.get_mut(panel) else {
            return;
        };
        let mode = self.machine.mode();
        let input = describe(raw);
        for handler in handlers.iter_mut() {
            if let Err(err) = handler.on_command(command) {
                tracing::warn!(panel = %panel, error = %err, "panel handler failed");
                self.errors.push(DispatchError {
                    mode,
                    input: input.clone(),
                    panel: Some(panel.to_string()),
                    message: err.0,
                });
            }
        }
    }
}

impl std::fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("panels", &self.panels)
            .field("machine", &self.machine)
            .field("active_panel", &self.active_panel)
            .field("pending", &self.pending)
            .finish()
    }
}

fn describe(event: KeyEvent) -> String {
    let base = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
    };
    if event.mods.contains(Modifiers::CTRL) {
        format!("ctrl+{base}")
    } else {
        base
    }
}
