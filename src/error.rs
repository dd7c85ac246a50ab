use crate::types::Mode;
use thiserror::Error;

/// Failure reported by a colon-command lookup or handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Empty or whitespace-only command line.
    #[error("Invalid command format")]
    InvalidFormat,
    /// No handler registered under this name.
    #[error("Not an editor command: {0}")]
    UnknownCommand(String),
    /// The handler itself reported a failure.
    #[error("{0}")]
    HandlerFailed(String),
}

/// Failure reported by a panel handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        HandlerError(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        HandlerError(message.to_string())
    }
}

/// A handler or side-effect failure caught at the dispatch boundary.
///
/// These never propagate out of `InputDispatcher::process`; the host drains
/// them via `take_errors` to log or report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (mode: {mode:?}, input: {input}, panel: {panel:?})")]
pub struct DispatchError {
    /// Mode at the time of the failure.
    pub mode: Mode,
    /// The raw keystroke being processed.
    pub input: String,
    /// The panel whose handler failed, if any.
    pub panel: Option<String>,
    /// The failure description.
    pub message: String,
}
