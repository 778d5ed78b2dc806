//! Domain entities - Core business objects

pub mod command;
pub mod help;
pub mod message;
pub mod outgoing;
pub mod plugin;
pub mod user;

pub use command::{handler, Command, CommandParser, Handler, HandlerFuture};
pub use help::{HelpPage, Permission};
pub use message::Message;
pub use outgoing::{OutgoingMessage, RichMessage};
pub use plugin::{Plugin, PluginBuilder};
pub use user::User;
