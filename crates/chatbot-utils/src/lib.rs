//! Shared utilities for the trading chatbot
//!
//! Currently this is the tracing subscriber setup shared by the binaries.

pub mod logging;

pub use logging::{LogConfig, LogFormat, init_tracing};
