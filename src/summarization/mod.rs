/*!
 * Summarization adapter.
 *
 * - `Summarizer`: the seam the workflow depends on
 * - `SummaryBounds`: length bounds derived from word count and percentage
 * - `core`: `SummarizationService`, the LLM-backed implementation
 */

use async_trait::async_trait;

use crate::errors::SummarizationError;
use crate::text_utils;

pub use self::core::SummarizationService;

pub mod core;

/// Lower floor for `min_length`
pub const MIN_SUMMARY_WORDS: usize = 10;

/// Length bounds for one summary, in words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    /// Upper bound
    pub max_length: usize,
    /// Lower bound; exceeds `max_length` when `max_length < 20`
    pub min_length: usize,
}

impl SummaryBounds {
    /// `max = floor(words * percentage / 100)`, `min = max(10, floor(max / 2))`
    pub fn from_word_count(word_count: usize, percentage: u8) -> Self {
        let max_length = word_count * percentage as usize / 100;
        let min_length = (max_length / 2).max(MIN_SUMMARY_WORDS);
        Self { max_length, min_length }
    }

    /// Bounds for `text`, counting whitespace-separated words
    pub fn for_text(text: &str, percentage: u8) -> Self {
        Self::from_word_count(text_utils::word_count(text), percentage)
    }

    /// Whether `min_length <= max_length`
    pub fn is_consistent(&self) -> bool {
        self.min_length <= self.max_length
    }
}

/// Produces an abstractive summary within length bounds
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text` within `bounds`
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, SummarizationError>;
}
