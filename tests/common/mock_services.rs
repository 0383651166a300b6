/*!
 * Mock translation and summarization adapters
 *
 * Both mocks record every call so tests can assert on what the workflow sent,
 * and both answer deterministically so repeated runs give identical results.
 */

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use summarize_pro::errors::{ProviderError, SummarizationError, TranslationError};
use summarize_pro::summarization::{Summarizer, SummaryBounds};
use summarize_pro::translation::Translator;

/// One recorded translation call
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateCall {
    pub text: String,
    pub source: Option<String>,
    pub destination: String,
}

/// Translator answering `"[<destination>] <text>"`
#[derive(Debug, Default)]
pub struct MockTranslator {
    calls: Mutex<Vec<TranslateCall>>,
    /// Fail calls whose destination equals this code
    fail_destination: Option<String>,
}

impl MockTranslator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Translator that fails every call towards `destination`
    pub fn failing_towards(destination: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail_destination: Some(destination.to_string()),
        })
    }

    pub fn calls(&self) -> Vec<TranslateCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        destination: &str,
    ) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push(TranslateCall {
            text: text.to_string(),
            source: source.map(str::to_string),
            destination: destination.to_string(),
        });

        if self.fail_destination.as_deref() == Some(destination) {
            return Err(TranslationError::Provider(ProviderError::ConnectionError(
                "mock translation service unreachable".to_string(),
            )));
        }

        Ok(format!("[{}] {}", destination, text))
    }
}

/// Summarizer answering the first `max_length` words of its input
#[derive(Debug, Default)]
pub struct MockSummarizer {
    calls: Mutex<Vec<(String, SummaryBounds)>>,
    fail: bool,
}

impl MockSummarizer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<(String, SummaryBounds)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, SummarizationError> {
        self.calls.lock().unwrap().push((text.to_string(), bounds));

        if self.fail {
            return Err(SummarizationError::Provider(ProviderError::ApiError {
                status_code: 500,
                message: "model crashed".to_string(),
            }));
        }

        Ok(text
            .split_whitespace()
            .take(bounds.max_length.max(1))
            .collect::<Vec<_>>()
            .join(" "))
    }
}
