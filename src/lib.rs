pub mod command;
pub mod dispatch;
pub mod error;
pub mod key;
pub mod modal;
pub mod panel;
pub mod parser;
pub mod traits;
pub mod types;

pub use crate::command::{CommandHandler, CommandRegistry, CommandResult};
pub use crate::dispatch::{DispatcherSnapshot, InputDispatcher};
pub use crate::error::{CommandError, DispatchError, HandlerError};
pub use crate::key::{KeyCode, KeyEvent, Modifiers};
pub use crate::modal::{ModalStateMachine, ModeEvent};
pub use crate::panel::{PanelLinks, PanelRegistry};
pub use crate::parser::{Operator, ParseOutcome, parse};
pub use crate::traits::PanelHandler;
pub use crate::types::{ActionKind, Direction, Mode, ModeIntent, VimCommand, VisualKind};
