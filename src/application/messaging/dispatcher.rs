//! Message dispatcher - routes a message to the command it names

use std::sync::Arc;

use crate::application::errors::HandlerError;
use crate::application::exception::BotException;

use super::context::Context;
use super::parser::MessageParser;
use super::table::DispatchTable;

/// What happened to a dispatched message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A handler ran to completion; holds the command path
    Handled(String),
    /// Not addressed to any command
    Ignored,
}

pub struct MessageDispatcher {
    parser: MessageParser,
    table: Arc<DispatchTable>,
}

impl MessageDispatcher {
    pub fn new(table: Arc<DispatchTable>, prefix: impl Into<String>) -> Self {
        Self {
            parser: MessageParser::new(prefix),
            table,
        }
    }

    pub fn table(&self) -> &Arc<DispatchTable> {
        &self.table
    }

    pub fn parser(&self) -> &MessageParser {
        &self.parser
    }

    /// Resolve, parse and run the command in `ctx`.
    ///
    /// Failures are returned to the caller; reporting happens at the top.
    pub async fn dispatch(&self, ctx: Context) -> Result<Outcome, HandlerError> {
        let Some(text) = self.parser.strip_prefix(ctx.raw_text()) else {
            return Ok(Outcome::Ignored);
        };
        let Some(resolution) = self.table.resolve(text) else {
            tracing::debug!("[{}] No command for: {}", ctx.chat_id(), text);
            return Ok(Outcome::Ignored);
        };

        let path = resolution.path_string();
        tracing::debug!(
            "[{}] Dispatching `{}` from plugin {}",
            ctx.chat_id(),
            path,
            resolution.plugin
        );

        let handler = resolution
            .command
            .parse(resolution.rest)
            .map_err(BotException::from)?;
        handler(ctx).await?;
        Ok(Outcome::Handled(path))
    }
}
