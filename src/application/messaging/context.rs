//! Execution context handed to every command handler

use std::sync::Arc;

use crate::application::errors::TransportError;
use crate::domain::entities::{Message, OutgoingMessage, User};
use crate::domain::traits::{Bot, Transaction};

use super::help_index::HelpIndex;
use super::table::DispatchTable;

/// Everything a handler may touch while it runs
#[derive(Clone)]
pub struct Context {
    message: Arc<Message>,
    bot: Arc<dyn Bot>,
    transaction: Arc<Transaction>,
    table: Arc<DispatchTable>,
}

impl Context {
    pub fn new(
        message: Message,
        bot: Arc<dyn Bot>,
        transaction: Arc<Transaction>,
        table: Arc<DispatchTable>,
    ) -> Self {
        Self {
            message: Arc::new(message),
            bot,
            transaction,
            table,
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// The invoking user, when the transport knows it
    pub fn user(&self) -> Option<&User> {
        self.message.sender.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.message.sender_id()
    }

    pub fn chat_id(&self) -> &str {
        &self.message.chat_id
    }

    /// Full text of the invoking message
    pub fn raw_text(&self) -> &str {
        &self.message.text
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn help(&self) -> &HelpIndex {
        self.table.help()
    }

    pub fn table(&self) -> &DispatchTable {
        &self.table
    }

    /// Send to an arbitrary chat
    pub async fn send(
        &self,
        target: &str,
        message: impl Into<OutgoingMessage>,
    ) -> Result<(), TransportError> {
        self.bot.send_message(target, &message.into()).await
    }

    /// Send to the chat the command came from
    pub async fn reply(&self, message: impl Into<OutgoingMessage>) -> Result<(), TransportError> {
        self.send(self.chat_id(), message).await
    }
}
