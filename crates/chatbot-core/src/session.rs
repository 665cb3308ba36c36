//! Conversation orchestrator
//!
//! [`ChatSession`] turns one line of user text into at most two downstream
//! calls and exactly one bot reply:
//!
//! 1. the user message is appended and the draft cleared
//! 2. if the text names a symbol, the analysis service is asked for a chart
//!    and a returned chart replaces the current one
//! 3. the chat service is always asked for a reply to the full text
//! 4. the reply (or the configured failure reply) is appended
//!
//! `submit` takes `&mut self`, so a single session never interleaves two
//! submissions. [`SharedChatSession`] extends that guarantee to sessions
//! shared between tasks by queueing submissions in arrival order.

use crate::api::{AnalysisService, ChatService, HttpAnalysisClient, HttpChatClient};
use crate::config::ChatConfig;
use crate::conversation::{ConversationState, Message};
use crate::error::{ChatError, Result};
use crate::symbol::extract_symbol;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// What a call to [`ChatSession::submit`] did
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Input was empty or whitespace; nothing was appended or sent
    Ignored,
    /// The chat service replied and its reply was appended
    Replied {
        symbol: Option<String>,
        chart_replaced: bool,
    },
    /// A downstream call failed and the failure reply was appended
    Failed {
        symbol: Option<String>,
        error: ChatError,
    },
}

impl SubmitOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// Symbol detected in the submitted text, if any
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Self::Ignored => None,
            Self::Replied { symbol, .. } | Self::Failed { symbol, .. } => symbol.as_deref(),
        }
    }

    pub fn chart_replaced(&self) -> bool {
        matches!(self, Self::Replied { chart_replaced: true, .. })
    }

    pub fn error(&self) -> Option<&ChatError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Orchestrates one conversation against the analysis and chat services
pub struct ChatSession {
    analysis: Arc<dyn AnalysisService>,
    chat: Arc<dyn ChatService>,
    state: ConversationState,
    draft: String,
    failure_reply: String,
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("state", &self.state)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl ChatSession {
    /// Create a session backed by the given services
    pub fn new(
        analysis: Arc<dyn AnalysisService>,
        chat: Arc<dyn ChatService>,
        config: &ChatConfig,
    ) -> Self {
        let state = match &config.greeting {
            Some(greeting) => ConversationState::with_greeting(greeting.clone()),
            None => ConversationState::new(),
        };

        Self {
            analysis,
            chat,
            state,
            draft: String::new(),
            failure_reply: config.failure_reply.clone(),
        }
    }

    /// Create a session talking to the HTTP endpoints named in `config`
    pub fn from_config(config: &ChatConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        let analysis = HttpAnalysisClient::with_client(client.clone(), config.analyze_url()?);
        let chat = HttpChatClient::with_client(client, config.chat_url()?);

        Ok(Self::new(Arc::new(analysis), Arc::new(chat), config))
    }

    /// Current conversation
    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Pending input text
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the pending input text
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the pending input text
    ///
    /// A blank draft is left untouched and nothing is sent.
    pub async fn send(&mut self) -> SubmitOutcome {
        let text = self.draft.clone();
        self.submit(&text).await
    }

    /// Submit one line of user text
    ///
    /// Blank input is ignored. Otherwise exactly one user message and exactly
    /// one bot message are appended, whether the downstream calls succeed or
    /// not.
    pub async fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return SubmitOutcome::Ignored;
        }

        self.state.push(Message::user(text));
        self.draft.clear();

        let symbol = extract_symbol(text).map(str::to_string);
        info!(symbol = symbol.as_deref(), "Processing submission");

        match self.respond(text, symbol.as_deref()).await {
            Ok((reply, chart_replaced)) => {
                self.state.push(Message::bot(reply));
                SubmitOutcome::Replied {
                    symbol,
                    chart_replaced,
                }
            }
            Err(error) => {
                warn!(error = %error, kind = ?error.kind(), "Submission failed");
                self.state.push(Message::bot(self.failure_reply.clone()));
                SubmitOutcome::Failed { symbol, error }
            }
        }
    }

    /// Run the downstream calls, returning the reply and whether the chart
    /// was replaced
    async fn respond(&mut self, text: &str, symbol: Option<&str>) -> Result<(String, bool)> {
        let mut chart_replaced = false;

        if let Some(symbol) = symbol {
            let analysis = self.analysis.analyze(symbol).await?;
            if let Some(chart) = analysis.chart {
                debug!(points = chart.len(), "Replacing chart");
                self.state.replace_chart(chart);
                chart_replaced = true;
            }
        }

        let reply = self.chat.chat(text).await?;
        Ok((reply, chart_replaced))
    }
}

/// A [`ChatSession`] shared between tasks
///
/// Submissions wait on a fair lock, so they run one at a time in the order
/// they were made and messages are appended in submission order.
#[derive(Debug, Clone)]
pub struct SharedChatSession {
    inner: Arc<Mutex<ChatSession>>,
}

impl SharedChatSession {
    pub fn new(session: ChatSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Queue a submission behind any in flight and wait for it to finish
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let mut session = self.inner.lock().await;
        session.submit(text).await
    }

    /// Copy of the current conversation
    ///
    /// Waits for any in-flight submission to finish first.
    pub async fn snapshot(&self) -> ConversationState {
        self.inner.lock().await.state().clone()
    }
}
