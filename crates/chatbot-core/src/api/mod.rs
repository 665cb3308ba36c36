//! Clients for the analysis and chat services
//!
//! Both services are reached through traits so the orchestrator can be
//! driven by the HTTP clients in this module or by any other implementation.

pub mod analysis;
pub mod chat;

#[cfg(test)]
mod test_server;

use crate::conversation::ChartPoint;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

pub use analysis::HttpAnalysisClient;
pub use chat::HttpChatClient;

/// Body of a `GET /api/analyze` response
///
/// Only `chart` is read; every other field is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub chart: Option<Vec<ChartPoint>>,
}

/// Body of a `POST /api/chat` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

/// Body of a `POST /api/chat` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub result: String,
}

/// Market-data service returning chartable series for a symbol
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Fetch analysis data for `symbol`
    async fn analyze(&self, symbol: &str) -> Result<AnalysisResponse>;
}

/// Conversational service answering free-text prompts
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send `prompt` and return the reply text
    async fn chat(&self, prompt: &str) -> Result<String>;
}
