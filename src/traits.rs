use crate::error::HandlerError;
use crate::types::VimCommand;

/// A panel-local command consumer, registered with the dispatcher per panel.
///
/// A panel may have zero or more handlers; the dispatcher invokes every
/// handler registered for the focused panel, in registration order. A
/// handler failure is caught at the dispatch boundary and does not stop
/// the remaining handlers.
pub trait PanelHandler {
    fn on_command(&mut self, command: &VimCommand) -> Result<(), HandlerError>;
}

// Closures work as handlers without a wrapper type.
impl<F> PanelHandler for F
where
    F: FnMut(&VimCommand) -> Result<(), HandlerError>,
{
    fn on_command(&mut self, command: &VimCommand) -> Result<(), HandlerError> {
        self(command)
    }
}
