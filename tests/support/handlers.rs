use std::cell::RefCell;
use std::rc::Rc;

use modal_input::{HandlerError, PanelHandler, VimCommand};

/// Shared log of commands delivered to a panel, cloneable across the test
/// and the handler registered with the dispatcher.
#[derive(Default, Clone)]
pub struct CommandLog {
    commands: Rc<RefCell<Vec<VimCommand>>>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<VimCommand> {
        self.commands.borrow().clone()
    }

    pub fn take(&self) -> Vec<VimCommand> {
        self.commands.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.commands.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.borrow().is_empty()
    }
}

/// Records every command it sees into a shared `CommandLog`.
pub struct RecordingHandler {
    log: CommandLog,
}

impl RecordingHandler {
    pub fn new(log: &CommandLog) -> Self {
        Self { log: log.clone() }
    }
}

impl PanelHandler for RecordingHandler {
    fn on_command(&mut self, command: &VimCommand) -> Result<(), HandlerError> {
        self.log.commands.borrow_mut().push(command.clone());
        Ok(())
    }
}

/// Fails on every command, for exercising the dispatch failure boundary.
pub struct FailingHandler;

impl PanelHandler for FailingHandler {
    fn on_command(&mut self, _command: &VimCommand) -> Result<(), HandlerError> {
        Err(HandlerError::from("handler exploded"))
    }
}
