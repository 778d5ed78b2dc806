use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::errors::HandlerError;
use crate::application::exception::BotException;
use crate::application::messaging::{Context, ErrorReporter, MessageDispatcher, Outcome};
use crate::domain::entities::Message;
use crate::domain::traits::{Bot, Store, Transaction};

/// Service for processing messages
pub struct MessageService<B: Bot + 'static> {
    bot: Arc<B>,
    dispatcher: MessageDispatcher,
    store: Arc<dyn Store>,
    reporter: ErrorReporter,
}

impl<B: Bot + 'static> MessageService<B> {
    pub fn new(bot: Arc<B>, dispatcher: MessageDispatcher, store: Arc<dyn Store>) -> Self {
        let reporter = ErrorReporter::new(bot.clone());
        Self {
            bot,
            dispatcher,
            store,
            reporter,
        }
    }

    pub fn with_rich_errors(mut self, rich: bool) -> Self {
        self.reporter = self.reporter.with_rich(rich);
        self
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn dispatcher(&self) -> &MessageDispatcher {
        &self.dispatcher
    }

    /// Handle one message inside its own transaction.
    ///
    /// Writes are committed only when the handler succeeds. Any failure is
    /// reported to the originating chat and returned as the exception that
    /// was shown.
    pub async fn process(&self, message: Message) -> Result<Outcome, BotException> {
        let chat_id = message.chat_id.clone();
        let transaction = Arc::new(Transaction::new(self.store.clone()));
        let ctx = Context::new(
            message,
            self.bot.clone(),
            transaction.clone(),
            self.dispatcher.table().clone(),
        );

        let result = match self.dispatcher.dispatch(ctx).await {
            Ok(outcome) => transaction
                .commit()
                .await
                .map(|_| outcome)
                .map_err(HandlerError::from),
            Err(e) => {
                if let Err(rollback) = transaction.rollback() {
                    tracing::warn!("[{}] Rollback failed: {}", chat_id, rollback);
                }
                Err(e)
            }
        };

        match result {
            Ok(outcome) => {
                if let Outcome::Handled(path) = &outcome {
                    tracing::debug!("[{}] Handled `{}`", chat_id, path);
                }
                Ok(outcome)
            }
            Err(e) => {
                let exception = e.into_exception();
                self.reporter.report(&chat_id, &exception).await;
                Err(exception)
            }
        }
    }

    /// Process a message on its own task
    pub fn spawn(self: &Arc<Self>, message: Message) -> JoinHandle<Result<Outcome, BotException>> {
        let service = Arc::clone(self);
        tokio::spawn(async move { service.process(message).await })
    }

    /// Consume inbound messages until the channel closes
    pub async fn run(self: Arc<Self>, mut inbound: mpsc::Receiver<Message>) {
        tracing::info!("Starting message loop...");
        let mut tasks = Vec::new();
        while let Some(message) = inbound.recv().await {
            tasks.retain(|t: &JoinHandle<_>| !t.is_finished());
            tasks.push(self.spawn(message));
        }
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!("Message task ended abnormally: {}", e);
            }
        }
        tracing::info!("Message loop stopped");
    }
}
