//! Bot exceptions - the failure taxonomy shared by every plugin

pub mod model;
pub mod propagation;

pub use model::{BotException, ParseFailure, Resolved, ERROR_COLOUR};
pub use propagation::{raise, ExceptionCarrier, ExceptionResultExt};
