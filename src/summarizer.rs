//! Pluggable summarization
//!
//! The state machine only stores what a `Summarizer` returns, so a real
//! summarizer can replace the truncating one without touching transitions.

/// Label prepended to every summary produced by `TruncatingSummarizer`
pub const SUMMARY_LABEL: &str = "Summary: ";

/// Default number of characters kept from the source text
pub const DEFAULT_SUMMARY_MAX_CHARS: usize = 150;

/// Turns source text into summary text
pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str) -> String;
}

impl<F> Summarizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn summarize(&self, text: &str) -> String {
        self(text)
    }
}

/// Keeps the first `max_chars` characters, adding `...` when text was cut
#[derive(Debug, Clone, Copy)]
pub struct TruncatingSummarizer {
    max_chars: usize,
}

impl TruncatingSummarizer {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }
}

impl Default for TruncatingSummarizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUMMARY_MAX_CHARS)
    }
}

impl Summarizer for TruncatingSummarizer {
    fn summarize(&self, text: &str) -> String {
        let mut chars = text.chars();
        let head: String = chars.by_ref().take(self.max_chars).collect();
        if chars.next().is_some() {
            format!("{SUMMARY_LABEL}{head}...")
        } else {
            format!("{SUMMARY_LABEL}{head}")
        }
    }
}
