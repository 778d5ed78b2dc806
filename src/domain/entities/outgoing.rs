//! Messages the bot sends back to a chat

/// Structured message with a title, body and accent colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichMessage {
    pub title: String,
    pub body: String,
    pub colour: Option<u32>,
}

impl RichMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            colour: None,
        }
    }

    pub fn with_colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }

    /// Plain rendering for transports without rich support
    pub fn to_plain(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingMessage {
    Text(String),
    Rich(RichMessage),
}

impl OutgoingMessage {
    pub fn to_plain(&self) -> String {
        match self {
            OutgoingMessage::Text(text) => text.clone(),
            OutgoingMessage::Rich(rich) => rich.to_plain(),
        }
    }
}

impl From<String> for OutgoingMessage {
    fn from(text: String) -> Self {
        OutgoingMessage::Text(text)
    }
}

impl From<&str> for OutgoingMessage {
    fn from(text: &str) -> Self {
        OutgoingMessage::Text(text.to_string())
    }
}

impl From<RichMessage> for OutgoingMessage {
    fn from(rich: RichMessage) -> Self {
        OutgoingMessage::Rich(rich)
    }
}
