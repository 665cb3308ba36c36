//! Conversation state: the message log and the current chart series
//!
//! The message log is append-only and insertion order is display order. The
//! chart series is replaced wholesale whenever the analysis service returns a
//! new one.

use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// A single chat bubble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    text: String,
}

impl Message {
    /// Create a message typed by the user
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create a reply from the bot
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_bot(&self) -> bool {
        self.role == Role::Bot
    }
}

/// One point of the price/indicator series backing the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub close: f64,
    pub rsi: f64,
    pub macd: f64,
}

/// Messages and chart data for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    chart: Vec<ChartPoint>,
}

impl ConversationState {
    /// Create an empty conversation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a conversation opened by a bot greeting
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::bot(greeting)],
            chart: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) fn replace_chart(&mut self, points: Vec<ChartPoint>) {
        self.chart = points;
    }

    /// All messages in display order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended after the first `offset` ones
    pub fn messages_since(&self, offset: usize) -> &[Message] {
        self.messages.get(offset..).unwrap_or_default()
    }

    /// The most recent bot message, if any
    pub fn last_bot_message(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_bot())
    }

    /// Current chart series (empty when nothing has been charted)
    pub fn chart(&self) -> &[ChartPoint] {
        &self.chart
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
