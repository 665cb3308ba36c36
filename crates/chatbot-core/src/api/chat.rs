//! HTTP client for the chat endpoint

use super::{ChatRequest, ChatResponse, ChatService};
use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Calls `POST {api_base}{chat_path}` with `{"prompt": ...}`
#[derive(Debug, Clone)]
pub struct HttpChatClient {
    client: Client,
    url: Url,
}

impl HttpChatClient {
    /// Create a client from the session configuration
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, config.chat_url()?))
    }

    /// Create a client sharing an existing connection pool
    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ChatService for HttpChatClient {
    #[instrument(skip(self, prompt), fields(url = %self.url, prompt_len = prompt.len()))]
    async fn chat(&self, prompt: &str) -> Result<String> {
        debug!("Sending prompt");

        let request = ChatRequest {
            prompt: prompt.to_string(),
        };

        // `.json()` also sets `Content-Type: application/json`
        let response = self
            .client
            .post(self.url.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                endpoint: self.url.path().to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let reply = parse_chat_body(self.url.path(), &body)?;

        debug!(reply_len = reply.len(), "Received reply");
        Ok(reply)
    }
}

/// Decode a chat response body into the reply text
///
/// `result` must be present and must be a string.
pub fn parse_chat_body(endpoint: &str, body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ChatError::malformed(endpoint, format!("invalid chat body: {e}")))?;
    Ok(parsed.result)
}
