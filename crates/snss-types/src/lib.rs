#![warn(clippy::pedantic)]

pub mod error;
pub mod command_kind;
pub mod transition;
pub mod structured_state;
pub mod state_blob;
pub mod navigation;
pub mod command;
pub mod session;

pub use command::{Command, CommandContent};
pub use command_kind::CommandKind;
pub use error::TypeError;
pub use navigation::NavigationEntry;
pub use session::Session;
pub use state_blob::{StateBlob, StateContent};
pub use structured_state::StructuredState;
pub use transition::{CoreTransition, Qualifier, TransitionType};
