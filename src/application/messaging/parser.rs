//! Message parser - builds messages and strips the command prefix

use crate::domain::entities::{Message, User};

pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Parse a text message
    pub fn parse(
        &self,
        chat_id: impl Into<String>,
        text: impl Into<String>,
        sender: Option<User>,
    ) -> Message {
        let message = Message::new(chat_id, text);
        match sender {
            Some(user) => message.with_sender(user),
            None => message,
        }
    }

    /// Command text after the prefix, or `None` for ordinary chatter.
    ///
    /// An empty prefix treats every message as a possible command.
    pub fn strip_prefix<'a>(&self, text: &'a str) -> Option<&'a str> {
        let text = text.trim_start();
        let rest = text.strip_prefix(self.command_prefix.as_str())?;
        let rest = rest.trim_start();
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }
}

/// Split off the first whitespace-delimited token
pub fn split_token(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    match text.find(char::is_whitespace) {
        Some(idx) => Some((&text[..idx], text[idx..].trim_start())),
        None => Some((text, "")),
    }
}
