use async_trait::async_trait;

use crate::application::errors::TransportError;
use crate::domain::entities::OutgoingMessage;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Send + Sync {
    /// Start the bot and begin listening for messages
    async fn start(&self) -> Result<(), TransportError>;

    /// Send a message to a chat
    async fn send_message(
        &self,
        target: &str,
        message: &OutgoingMessage,
    ) -> Result<(), TransportError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
