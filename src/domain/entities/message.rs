use super::User;
use chrono::{DateTime, Utc};

/// An incoming chat message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: Option<User>,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender: None,
            text: text.into(),
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn with_sender(mut self, user: User) -> Self {
        self.sender = Some(user);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    pub fn sender_id(&self) -> Option<&str> {
        self.sender.as_ref().map(|u| u.id.as_str())
    }
}
