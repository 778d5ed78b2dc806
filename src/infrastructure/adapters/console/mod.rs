//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::errors::TransportError;
use crate::application::messaging::MessageParser;
use crate::domain::entities::{Message, OutgoingMessage, User};
use crate::domain::traits::{Bot, BotInfo};
use crate::infrastructure::config::ConsoleConfig;

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    user: User,
    channel: String,
}

impl ConsoleAdapter {
    pub fn new(name: impl Into<String>, config: &ConsoleConfig) -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: name.into(),
                username: "console".to_string(),
            },
            user: User::new(config.user_id.clone()).with_username("console"),
            channel: config.channel.clone(),
        }
    }

    /// Turn one input line into a message from the console user
    pub fn message(&self, line: &str) -> Message {
        MessageParser::new("")
            .parse(self.channel.clone(), line, Some(self.user.clone()))
            .with_platform("console")
    }

    /// Forward stdin lines until EOF or until the receiver goes away
    pub async fn listen(&self, inbound: mpsc::Sender<Message>) -> Result<(), TransportError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if inbound.send(self.message(line)).await.is_err() {
                return Err(TransportError::Closed);
            }
        }
        tracing::info!("Console input closed");
        Ok(())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), TransportError> {
        tracing::info!("Starting console bot (dev mode) as user {}", self.user.id);
        Ok(())
    }

    async fn send_message(
        &self,
        target: &str,
        message: &OutgoingMessage,
    ) -> Result<(), TransportError> {
        println!("[BOT -> {}] {}", target, message.to_plain());
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_comes_from_console_user() {
        let config = ConsoleConfig {
            user_id: "42".to_string(),
            channel: "dev".to_string(),
        };
        let adapter = ConsoleAdapter::new("cogbot", &config);
        let msg = adapter.message("!say hi");
        assert_eq!(msg.chat_id, "dev");
        assert_eq!(msg.sender_id(), Some("42"));
        assert_eq!(msg.platform, "console");
        assert_eq!(adapter.bot_info().name, "cogbot");
    }
}
