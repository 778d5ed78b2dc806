//! Application layer errors

use thiserror::Error;

use super::exception::{BotException, ExceptionCarrier};

/// Process-level errors; anything here stops the bot
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Composition error: {0}")]
    Composition(#[from] CompositionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Failure of a command handler
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error(transparent)]
    Bot(#[from] BotException),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl HandlerError {
    /// Classify into the exception reported to the user
    pub fn into_exception(self) -> BotException {
        match self {
            HandlerError::Bot(e) => e,
            HandlerError::Transport(e) => BotException::message_send(e.to_string()),
            HandlerError::Storage(e) => BotException::generic("StorageFailure", e.to_string()),
        }
    }
}

impl ExceptionCarrier for HandlerError {
    fn from_exception(exception: BotException) -> Self {
        HandlerError::Bot(exception)
    }

    fn into_exception(self) -> Result<BotException, Self> {
        match self {
            HandlerError::Bot(e) => Ok(e),
            other => Err(other),
        }
    }
}

/// Transport (chat backend) errors
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Send failed: {0}")]
    Send(String),

    #[error("Connection closed")]
    Closed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Fatal errors raised while merging plugins
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Plugin '{0}' registered more than once")]
    DuplicatePlugin(String),

    #[error("Command '{name}' is declared by both '{first}' and '{second}'")]
    DuplicateCommand {
        name: String,
        first: String,
        second: String,
    },

    #[error("Plugin '{plugin}' declares an invalid command name '{name}'")]
    InvalidName { plugin: String, name: String },
}
