//! Top-level error reporting

use std::sync::Arc;

use crate::application::exception::BotException;
use crate::domain::entities::OutgoingMessage;
use crate::domain::traits::Bot;

/// Reports uncaught exceptions to the operator log and the originating chat
#[derive(Clone)]
pub struct ErrorReporter {
    bot: Arc<dyn Bot>,
    rich: bool,
}

impl ErrorReporter {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot, rich: false }
    }

    /// Send the rich display instead of the text template
    pub fn with_rich(mut self, rich: bool) -> Self {
        self.rich = rich;
        self
    }

    /// Best effort: a failed delivery is logged and dropped
    pub async fn report(&self, channel: &str, exception: &BotException) {
        tracing::error!(channel = %channel, "{}", exception.format_operator());

        let outgoing = if self.rich {
            OutgoingMessage::Rich(exception.to_rich_display())
        } else {
            OutgoingMessage::Text(exception.format_user())
        };

        if let Err(e) = self.bot.send_message(channel, &outgoing).await {
            tracing::warn!(channel = %channel, "Dropping error report, delivery failed: {}", e);
        }
    }
}
