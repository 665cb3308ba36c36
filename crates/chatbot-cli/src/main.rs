//! Terminal front end for the trading chatbot
//!
//! # Usage
//!
//! ```bash
//! # Point the client at the analysis/chat API
//! export CHATBOT_API_BASE="http://localhost:3000"
//!
//! # Interactive session
//! cargo run --bin chatbot
//!
//! # One-shot
//! cargo run --bin chatbot -- -m "Tell me about TSLA breakout"
//! ```

mod render;

use chatbot_core::{ChatConfig, ChatSession, SubmitOutcome};
use chatbot_utils::{LogConfig, LogFormat};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::info;

const PROMPT: &str = "> ";
const EXIT_COMMAND: &str = "/exit";

#[derive(Parser, Debug)]
#[command(name = "chatbot")]
#[command(about = "Chat with the trading analysis API from the terminal", long_about = None)]
struct Args {
    /// Base URL of the analysis and chat API (overrides CHATBOT_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Per-request timeout in seconds (overrides CHATBOT_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Start without the greeting message
    #[arg(long)]
    no_greeting: bool,

    /// Number of most recent chart points to print (at least 1)
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(1..))]
    chart_rows: u16,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Send a single message, print the reply and exit
    #[arg(short, long)]
    message: Option<String>,
}

impl Args {
    fn chat_config(&self) -> chatbot_core::Result<ChatConfig> {
        let mut builder = ChatConfig::builder().with_env_all();

        if let Some(base) = &self.api_base {
            builder = builder.api_base(base.clone());
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if self.no_greeting {
            builder = builder.no_greeting();
        }

        builder.build()
    }

    fn log_config(&self) -> LogConfig {
        let format = if self.log_json {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        };
        LogConfig::default().with_format(format)
    }

    fn chart_rows(&self) -> usize {
        usize::from(self.chart_rows)
    }
}

/// Print what a submission appended: bot replies and the new chart
fn print_update(session: &ChatSession, offset: usize, outcome: &SubmitOutcome, chart_rows: usize) {
    for message in session.state().messages_since(offset) {
        if message.is_bot() {
            println!("{}", render::render_message(message));
        }
    }

    if outcome.chart_replaced() {
        if let Some(chart) = render::render_chart(session.state().chart(), chart_rows) {
            println!("{chart}");
        }
    }
    println!();
}

async fn submit_and_print(session: &mut ChatSession, text: &str, chart_rows: usize) -> SubmitOutcome {
    let offset = session.state().len();
    session.set_draft(text);
    let outcome = session.send().await;
    if !outcome.is_ignored() {
        print_update(session, offset, &outcome, chart_rows);
    }
    outcome
}

/// Exit status of one-shot mode: a failed submission is an error
fn one_shot_result(outcome: SubmitOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Failed { error, .. } => {
            Err(anyhow::Error::new(error).context("chat request failed"))
        }
        SubmitOutcome::Ignored => anyhow::bail!("message is empty"),
        SubmitOutcome::Replied { .. } => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    chatbot_utils::init_tracing(&args.log_config());

    let config = args.chat_config()?;
    info!(api_base = %config.api_base, "Starting chatbot");

    let mut session = ChatSession::from_config(&config)?;

    if let Some(message) = &args.message {
        let outcome = submit_and_print(&mut session, message, args.chart_rows()).await;
        return one_shot_result(outcome);
    }

    for message in session.state().messages() {
        println!("{}\n", render::render_message(message));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF
                println!();
                break;
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            }
        }

        let text = line.trim_end_matches(['\r', '\n']);
        if text.trim() == EXIT_COMMAND {
            break;
        }

        submit_and_print(&mut session, text, args.chart_rows()).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatbot_core::ChatError;

    #[test]
    fn test_chart_rows_must_be_positive() {
        assert!(Args::try_parse_from(["chatbot", "--chart-rows", "0"]).is_err());

        let args = Args::try_parse_from(["chatbot", "--chart-rows", "3"]).unwrap();
        assert_eq!(args.chart_rows(), 3);

        let args = Args::try_parse_from(["chatbot"]).unwrap();
        assert_eq!(args.chart_rows(), 10);
    }

    #[test]
    fn test_one_shot_failure_is_an_error() {
        let outcome = SubmitOutcome::Failed {
            symbol: Some("TSLA".to_string()),
            error: ChatError::malformed("/api/chat", "missing field `result`"),
        };
        let err = one_shot_result(outcome).unwrap_err();
        assert!(err.to_string().contains("chat request failed"));
        assert!(err.downcast_ref::<ChatError>().is_some());
    }

    #[test]
    fn test_one_shot_result() {
        let replied = SubmitOutcome::Replied {
            symbol: None,
            chart_replaced: false,
        };
        assert!(one_shot_result(replied).is_ok());
        assert!(one_shot_result(SubmitOutcome::Ignored).is_err());
    }
}
