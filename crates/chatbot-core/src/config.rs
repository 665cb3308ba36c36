//! Configuration for the chatbot session and its service clients

use crate::error::{ChatError, Result};
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Default greeting shown before the first submission
pub const DEFAULT_GREETING: &str =
    "Hi! Ask me about stock breakouts, fundamentals, or profit potential.";

/// Default reply appended when a downstream call fails
pub const DEFAULT_FAILURE_REPLY: &str = "Something went wrong, try again.";

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const DEFAULT_ANALYZE_PATH: &str = "/api/analyze";
const DEFAULT_CHAT_PATH: &str = "/api/chat";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const TIMEOUT_ENV: &str = "CHATBOT_TIMEOUT_SECS";

/// Configuration for a chat session
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL serving both endpoints
    pub api_base: Url,

    /// Path of the analysis endpoint (GET, `?symbol=`)
    pub analyze_path: String,

    /// Path of the chat endpoint (POST, `{"prompt": ...}`)
    pub chat_path: String,

    /// Request timeout applied to each downstream call
    pub request_timeout: Duration,

    /// Bot message seeded at session start, if any
    pub greeting: Option<String>,

    /// Bot message appended when a submission fails
    pub failure_reply: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            analyze_path: DEFAULT_ANALYZE_PATH.to_string(),
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            greeting: Some(DEFAULT_GREETING.to_string()),
            failure_reply: DEFAULT_FAILURE_REPLY.to_string(),
        }
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL")
}

impl ChatConfig {
    /// Create a new configuration builder
    pub fn builder() -> ChatConfigBuilder {
        ChatConfigBuilder::default()
    }

    /// Full URL of the analysis endpoint
    pub fn analyze_url(&self) -> Result<Url> {
        Ok(self.api_base.join(&self.analyze_path)?)
    }

    /// Full URL of the chat endpoint
    pub fn chat_url(&self) -> Result<Url> {
        Ok(self.api_base.join(&self.chat_path)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.api_base.scheme(), "http" | "https") {
            return Err(ChatError::Config(format!(
                "api_base must use http or https, got {}",
                self.api_base.scheme()
            )));
        }

        for (name, path) in [
            ("analyze_path", &self.analyze_path),
            ("chat_path", &self.chat_path),
        ] {
            if !path.starts_with('/') || path.starts_with("//") {
                return Err(ChatError::Config(format!(
                    "{name} must be an absolute path starting with a single '/', got {path:?}"
                )));
            }

            let joined = self.api_base.join(path)?;
            if joined.origin() != self.api_base.origin() {
                return Err(ChatError::Config(format!(
                    "{name} {path:?} resolves outside api_base: {joined}"
                )));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(ChatError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parse a timeout in whole seconds, warning when the value is unusable
fn parse_timeout_secs(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            warn!(value, error = %e, "Ignoring invalid {TIMEOUT_ENV}, using default timeout");
            None
        }
    }
}

/// Builder for ChatConfig
#[derive(Debug, Default)]
pub struct ChatConfigBuilder {
    api_base: Option<String>,
    analyze_path: Option<String>,
    chat_path: Option<String>,
    request_timeout: Option<Duration>,
    greeting: Option<Option<String>>,
    failure_reply: Option<String>,
}

impl ChatConfigBuilder {
    /// Set the base URL serving both endpoints
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the analysis endpoint path
    pub fn analyze_path(mut self, path: impl Into<String>) -> Self {
        self.analyze_path = Some(path.into());
        self
    }

    /// Set the chat endpoint path
    pub fn chat_path(mut self, path: impl Into<String>) -> Self {
        self.chat_path = Some(path.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the greeting seeded at session start
    pub fn greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = Some(Some(greeting.into()));
        self
    }

    /// Start sessions without a greeting
    pub fn no_greeting(mut self) -> Self {
        self.greeting = Some(None);
        self
    }

    /// Set the reply appended when a submission fails
    pub fn failure_reply(mut self, reply: impl Into<String>) -> Self {
        self.failure_reply = Some(reply.into());
        self
    }

    /// Load the base URL from CHATBOT_API_BASE
    pub fn with_env_api_base(mut self) -> Self {
        if let Ok(base) = std::env::var("CHATBOT_API_BASE") {
            self.api_base = Some(base);
        }
        self
    }

    /// Load the request timeout (seconds) from CHATBOT_TIMEOUT_SECS
    pub fn with_env_timeout(mut self) -> Self {
        if let Some(timeout) = std::env::var(TIMEOUT_ENV)
            .ok()
            .and_then(|value| parse_timeout_secs(&value))
        {
            self.request_timeout = Some(timeout);
        }
        self
    }

    /// Load every supported environment variable
    pub fn with_env_all(self) -> Self {
        self.with_env_api_base().with_env_timeout()
    }

    /// Build the configuration
    pub fn build(self) -> Result<ChatConfig> {
        let defaults = ChatConfig::default();

        let api_base = match self.api_base {
            Some(base) => Url::parse(&base)?,
            None => defaults.api_base,
        };

        let config = ChatConfig {
            api_base,
            analyze_path: self.analyze_path.unwrap_or(defaults.analyze_path),
            chat_path: self.chat_path.unwrap_or(defaults.chat_path),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            greeting: self.greeting.unwrap_or(defaults.greeting),
            failure_reply: self.failure_reply.unwrap_or(defaults.failure_reply),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = ChatConfig::default();
        assert_eq!(config.api_base.as_str(), "http://localhost:3000/");
        assert_eq!(config.analyze_path, "/api/analyze");
        assert_eq!(config.chat_path, "/api/chat");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.greeting.as_deref(), Some(DEFAULT_GREETING));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ChatConfig::builder()
            .api_base("https://bot.example.com")
            .request_timeout(Duration::from_secs(5))
            .no_greeting()
            .failure_reply("oops")
            .build()
            .unwrap();

        assert_eq!(config.api_base.as_str(), "https://bot.example.com/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.greeting.is_none());
        assert_eq!(config.failure_reply, "oops");
    }

    #[test]
    fn test_endpoints_stay_on_api_base() {
        let config = ChatConfig::builder()
            .api_base("https://bot.example.com:8443/ui/")
            .build()
            .unwrap();

        for url in [config.analyze_url().unwrap(), config.chat_url().unwrap()] {
            assert_eq!(url.scheme(), "https");
            assert_eq!(url.host_str(), Some("bot.example.com"));
            assert_eq!(url.port(), Some(8443));
        }
    }

    #[test]
    fn test_parse_timeout_secs() {
        assert_eq!(parse_timeout_secs("5"), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout_secs(" 12 "), Some(Duration::from_secs(12)));
        assert_eq!(parse_timeout_secs("30s"), None);
        assert_eq!(parse_timeout_secs(""), None);
    }

    #[test]
    fn test_endpoint_urls() {
        let config = ChatConfig::builder()
            .api_base("http://127.0.0.1:8080")
            .build()
            .unwrap();

        assert_eq!(
            config.analyze_url().unwrap().as_str(),
            "http://127.0.0.1:8080/api/analyze"
        );
        assert_eq!(
            config.chat_url().unwrap().as_str(),
            "http://127.0.0.1:8080/api/chat"
        );
    }

    #[test]
    fn test_validation() {
        let err = ChatConfig::builder().api_base("not a url").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = ChatConfig::builder()
            .api_base("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("http or https"));

        let err = ChatConfig::builder().chat_path("api/chat").build().unwrap_err();
        assert!(err.to_string().contains("chat_path"));

        let err = ChatConfig::builder()
            .api_base("http://localhost:3000")
            .chat_path("//evil.example/steal")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("chat_path"));

        let err = ChatConfig::builder()
            .analyze_path("//evil.example:3000/api/analyze")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("analyze_path"));

        // backslash is read as a slash in http URLs
        let err = ChatConfig::builder()
            .chat_path("/\\evil.example/steal")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("outside api_base"));

        let err = ChatConfig::builder()
            .request_timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("request_timeout"));
    }
}
