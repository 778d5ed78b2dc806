//! Message handling - routing, execution context and error reporting

pub mod context;
pub mod dispatcher;
pub mod help_index;
pub mod parser;
pub mod reporter;
pub mod table;

pub use context::Context;
pub use dispatcher::{MessageDispatcher, Outcome};
pub use help_index::{HelpIndex, HelpSection, Shadowed};
pub use parser::MessageParser;
pub use reporter::ErrorReporter;
pub use table::{DispatchTable, RegisteredCommand, Resolution};
