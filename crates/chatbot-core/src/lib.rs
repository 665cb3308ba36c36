//! Trading chatbot core
//!
//! This crate holds everything behind the chat window except rendering:
//!
//! - Symbol detection: the first standalone 3–5 letter uppercase word
//! - Conversation state: an append-only message log and the current chart
//! - Clients for the analysis (`GET /api/analyze`) and chat (`POST /api/chat`)
//!   services
//! - The orchestrator tying them together, one bot reply per submission
//!
//! # Example
//!
//! ```rust,ignore
//! use chatbot_core::{ChatConfig, ChatSession};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ChatConfig::builder()
//!         .api_base("http://localhost:3000")
//!         .build()?;
//!
//!     let mut session = ChatSession::from_config(&config)?;
//!     session.submit("Tell me about TSLA breakout").await;
//!
//!     for message in session.state().messages() {
//!         println!("{:?}: {}", message.role(), message.text());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod conversation;
pub mod error;
pub mod session;
pub mod symbol;

// Re-export main types for convenience
pub use api::{AnalysisResponse, AnalysisService, ChatService, HttpAnalysisClient, HttpChatClient};
pub use config::ChatConfig;
pub use conversation::{ChartPoint, ConversationState, Message, Role};
pub use error::{ChatError, ErrorKind, Result};
pub use session::{ChatSession, SharedChatSession, SubmitOutcome};
pub use symbol::extract_symbol;
