//! Ticker symbol detection in free text
//!
//! A symbol is a run of 3 to 5 uppercase ASCII letters standing alone as a
//! word. Words are runs of ASCII letters, digits and underscores, so `AAPL1`
//! and `NVDA_X` never qualify while `$TSLA` does. This is a heuristic only:
//! nothing checks that the symbol is actually listed.

use regex::Regex;
use std::sync::LazyLock;

const MIN_SYMBOL_LEN: usize = 3;
const MAX_SYMBOL_LEN: usize = 5;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word pattern is valid"));

/// Return the first ticker-like word in `text`, verbatim
///
/// Matching is case-sensitive; lowercase or mixed-case tickers are ignored.
pub fn extract_symbol(text: &str) -> Option<&str> {
    WORD.find_iter(text)
        .map(|m| m.as_str())
        .find(|word| is_symbol(word))
}

fn is_symbol(word: &str) -> bool {
    (MIN_SYMBOL_LEN..=MAX_SYMBOL_LEN).contains(&word.len())
        && word.bytes().all(|b| b.is_ascii_uppercase())
}
