//! HTTP client for the analysis endpoint

use super::{AnalysisResponse, AnalysisService};
use crate::config::ChatConfig;
use crate::error::{ChatError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

/// Calls `GET {api_base}{analyze_path}?symbol=SYMBOL`
#[derive(Debug, Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    url: Url,
}

impl HttpAnalysisClient {
    /// Create a client from the session configuration
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self::with_client(client, config.analyze_url()?))
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
impl AnalysisService for HttpAnalysisClient {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn analyze(&self, symbol: &str) -> Result<AnalysisResponse> {
        debug!("Requesting analysis");

        let response = self
            .client
            .get(self.url.clone())
            .query(&[("symbol", symbol)])
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
        let parsed = parse_analysis_body(self.url.path(), &body)?;

        debug!(
            points = parsed.chart.as_ref().map_or(0, Vec::len),
            has_chart = parsed.chart.is_some(),
            "Received analysis"
        );
        Ok(parsed)
    }
}

/// Decode an analysis response body
///
/// A `null` body or a missing/`null` `chart` field means "no chart update".
/// A `chart` that is present but not an array of chart points is malformed.
pub fn parse_analysis_body(endpoint: &str, body: &str) -> Result<AnalysisResponse> {
    let parsed: Option<AnalysisResponse> = serde_json::from_str(body)
        .map_err(|e| ChatError::malformed(endpoint, format!("invalid analysis body: {e}")))?;
    Ok(parsed.unwrap_or_default())
}
