use std::collections::HashMap;

use crate::error::CommandError;

/// Outcome of executing a colon-command: an optional status message on
/// success, a structured error otherwise.
pub type CommandResult = Result<Option<String>, CommandError>;

/// A colon-command implementation supplied by the host. Receives the
/// whitespace-split arguments; an `Err` is surfaced as a status message.
pub type CommandHandler = Box<dyn FnMut(&[&str]) -> Result<Option<String>, String>>;

/// The name→handler table for colon-commands.
///
/// The core supplies only the parse/execute/report protocol; the hosting
/// application registers the real implementations (quit, write, ...).
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandHandler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under `name`. Re-registering a name overwrites
    /// silently; last writer wins.
    pub fn register_command<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&[&str]) -> Result<Option<String>, String> + 'static,
    {
        self.commands.insert(name.into(), Box::new(handler));
    }

    /// Removes a handler. Unknown names are a no-op.
    pub fn unregister_command(&mut self, name: &str) {
        self.commands.remove(name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Splits `raw` on whitespace into a name and arguments and runs the
    /// matching handler inside a failure boundary. Never panics; every
    /// failure comes back as a `CommandError`.
    pub fn execute(&mut self, raw: &str) -> CommandResult {
        let mut parts = raw.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CommandError::InvalidFormat);
        };
        let args: Vec<&str> = parts.collect();

        let Some(handler) = self.commands.get_mut(name) else {
            return Err(CommandError::UnknownCommand(name.to_string()));
        };
        handler(&args).map_err(CommandError::HandlerFailed)
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
