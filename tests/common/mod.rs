//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use cogbot::application::errors::{StorageError, TransportError};
use cogbot::application::messaging::MessageDispatcher;
use cogbot::application::services::MessageService;
use cogbot::domain::entities::{Message, OutgoingMessage, Plugin, User};
use cogbot::domain::traits::{Bot, BotInfo, Store, Write};
use cogbot::infrastructure::storage::MemoryStore;
use cogbot::plugins;

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Transport that records every send
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<(String, OutgoingMessage)>>,
    failing: AtomicBool,
}

impl RecordingBot {
    pub fn sent(&self) -> Vec<(String, OutgoingMessage)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, m)| m.to_plain()).collect()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    /// Make every later send fail
    pub fn fail_sends(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), TransportError> {
        Ok(())
    }

    async fn send_message(
        &self,
        target: &str,
        message: &OutgoingMessage,
    ) -> Result<(), TransportError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Send("backend unreachable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((target.to_string(), message.clone()));
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "test".to_string(),
            name: "cogbot-test".to_string(),
            username: "test".to_string(),
        }
    }
}

pub struct Harness {
    pub service: Arc<MessageService<RecordingBot>>,
    pub bot: Arc<RecordingBot>,
    pub store: Arc<MemoryStore>,
}

impl Harness {
    pub fn new(plugins: Vec<Plugin>, prefix: &str) -> Self {
        Self::build(plugins, prefix, false)
    }

    pub fn rich(plugins: Vec<Plugin>, prefix: &str) -> Self {
        Self::build(plugins, prefix, true)
    }

    fn build(plugins: Vec<Plugin>, prefix: &str, rich: bool) -> Self {
        let store = Arc::new(MemoryStore::new());
        let (service, bot) = service_over(plugins, prefix, rich, store.clone());
        Self {
            service,
            bot,
            store,
        }
    }

    /// Build with every bundled plugin and an empty prefix
    pub fn builtin() -> Self {
        Self::new(plugins::builtin(), "")
    }
}

/// Message service over any store
pub fn service_over(
    plugins: Vec<Plugin>,
    prefix: &str,
    rich: bool,
    store: Arc<dyn Store>,
) -> (Arc<MessageService<RecordingBot>>, Arc<RecordingBot>) {
    ensure_init();
    let composition = plugins::compose(plugins).expect("plugins compose");
    let bot = Arc::new(RecordingBot::default());
    let dispatcher = MessageDispatcher::new(Arc::new(composition.table), prefix);
    let service = MessageService::new(bot.clone(), dispatcher, store).with_rich_errors(rich);
    (Arc::new(service), bot)
}

/// Store that reads nothing and refuses every commit
pub struct ReadOnlyStore;

#[async_trait]
impl Store for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn commit(&self, _writes: Vec<Write>) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }
}

pub fn message_from(user_id: &str, chat_id: &str, text: &str) -> Message {
    Message::new(chat_id, text).with_sender(User::new(user_id))
}
