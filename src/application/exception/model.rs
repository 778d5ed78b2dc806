//! Bot exception taxonomy and its renderings

use std::fmt;

use crate::domain::entities::RichMessage;

/// Accent colour used for rich error displays
pub const ERROR_COLOUR: u32 = 0xE74C3C;

/// Domain-level failure kinds reported back to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotException {
    /// Ad-hoc failure; the caller supplies both display fields
    Generic { name: String, message: String },
    /// The transport failed to deliver a message
    MessageSendFailure { message: String },
    /// A command's argument grammar rejected the input
    ParseFailure { message: String },
    /// An ordinal argument fell outside an inclusive range
    IndexOutOfRange { index: i64, bounds: (i64, i64) },
    /// An entropy-dependent operation failed
    RandomSourceFailure { message: String },
}

/// Display fields every exception resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub name: String,
    pub message: String,
}

impl BotException {
    pub fn generic(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Generic {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn message_send(message: impl Into<String>) -> Self {
        Self::MessageSendFailure {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
        }
    }

    pub fn index_out_of_range(index: i64, low: i64, high: i64) -> Self {
        Self::IndexOutOfRange {
            index,
            bounds: (low, high),
        }
    }

    pub fn random_source(message: impl Into<String>) -> Self {
        Self::RandomSourceFailure {
            message: message.into(),
        }
    }

    /// Resolve to `(name, message)`.
    ///
    /// This is the only place that matches on variants. A new variant needs a
    /// case here and nothing else.
    pub fn resolve(&self) -> Resolved {
        let (name, message) = match self {
            Self::Generic { name, message } => (name.clone(), message.clone()),
            Self::MessageSendFailure { message } => {
                ("MessageSendFailure".to_string(), message.clone())
            }
            Self::ParseFailure { message } => ("ParseFailure".to_string(), message.clone()),
            Self::IndexOutOfRange {
                index,
                bounds: (low, high),
            } => (
                "IndexOutOfRange".to_string(),
                format!(
                    "Index value of {} is not in the valid range [{}, {}].",
                    index, low, high
                ),
            ),
            Self::RandomSourceFailure { message } => {
                ("RandomSourceFailure".to_string(), message.clone())
            }
        };
        Resolved { name, message }
    }

    /// Terse `name: message` form for logs
    pub fn format_operator(&self) -> String {
        let Resolved { name, message } = self.resolve();
        format!("{}: {}", name, message)
    }

    /// Three-line form sent back to the chat
    pub fn format_user(&self) -> String {
        let Resolved { name, message } = self.resolve();
        format!(
            "⚠ **{}** ⚠\nAn error was encountered while resolving your command:\n> `{}`",
            name, message
        )
    }

    pub fn to_rich_display(&self) -> RichMessage {
        let Resolved { name, message } = self.resolve();
        RichMessage::new(format!("⚠ **{}** ⚠", name), message).with_colour(ERROR_COLOUR)
    }
}

impl fmt::Display for BotException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_operator())
    }
}

impl std::error::Error for BotException {}

/// Rejection produced by a command's argument parser
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ParseFailure(pub String);

impl ParseFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<ParseFailure> for BotException {
    fn from(failure: ParseFailure) -> Self {
        BotException::parse(failure.0)
    }
}
