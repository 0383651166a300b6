/*!
 * Core summarization service implementation.
 *
 * Bounds are word counts. The prompt states them in words and the request's
 * token cap is derived from the upper bound, since models count subword tokens.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};

use crate::app_config::{ServiceSettings, SummarizationConfig};
use crate::errors::SummarizationError;
use crate::providers::llm::{CompletionOptions, LlmClient};
use crate::summarization::{Summarizer, SummaryBounds};
use crate::text_utils;

/// Average tokens per English word, rounded up generously
const TOKENS_PER_WORD_NUM: usize = 3;
const TOKENS_PER_WORD_DEN: usize = 2;

/// Headroom so the model is not cut off mid-sentence
const TOKEN_HEADROOM: usize = 64;

/// LLM-backed summarizer
#[derive(Debug)]
pub struct SummarizationService {
    /// Client instance
    client: LlmClient,

    /// Configuration for the summarization service
    pub config: SummarizationConfig,
}

impl SummarizationService {
    /// Create a new summarization service with the given configuration
    pub fn new(config: SummarizationConfig) -> Result<Self> {
        if !config.provider.is_llm() {
            return Err(anyhow!(SummarizationError::UnsupportedProvider(
                config.provider.to_lowercase_string()
            )));
        }

        let provider_config = config.resolved_provider_config();
        let client = LlmClient::from_config(config.provider, &provider_config, config.retry_policy())?;

        Ok(Self { client, config })
    }

    /// Word range the prompt asks for, as `(min, max)`
    ///
    /// A zero upper bound asks for one short sentence of `min_length` words, and a
    /// lower bound above the upper one is lowered to it.
    pub fn prompt_bounds(bounds: SummaryBounds) -> (usize, usize) {
        let max_length = if bounds.max_length == 0 {
            bounds.min_length.max(1)
        } else {
            bounds.max_length
        };
        (bounds.min_length.min(max_length), max_length)
    }

    /// Fill the system prompt template for `bounds`
    pub fn build_system_prompt(&self, bounds: SummaryBounds) -> String {
        let (min_length, max_length) = Self::prompt_bounds(bounds);

        self.config
            .common
            .system_prompt
            .replace("{min_length}", &min_length.to_string())
            .replace("{max_length}", &max_length.to_string())
    }

    /// Token cap for a summary of at most `max_words` words
    pub fn token_budget(max_words: usize) -> u32 {
        let tokens = max_words * TOKENS_PER_WORD_NUM / TOKENS_PER_WORD_DEN + TOKEN_HEADROOM;
        u32::try_from(tokens).unwrap_or(u32::MAX)
    }
}

#[async_trait]
impl Summarizer for SummarizationService {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String, SummarizationError> {
        info!(
            "Summarizing {} words with {} ({}) to {}-{} words",
            text_utils::word_count(text),
            self.config.provider.display_name(),
            self.client.model(),
            bounds.min_length,
            bounds.max_length
        );

        let options = CompletionOptions {
            temperature: self.config.common.temperature,
            max_tokens: Self::token_budget(Self::prompt_bounds(bounds).1),
            seed: Some(self.config.common.seed),
        };

        let completion = self
            .client
            .complete(&self.build_system_prompt(bounds), text, options)
            .await?;

        let summary = text_utils::clean_model_output(&completion.text);
        if summary.is_empty() {
            return Err(SummarizationError::EmptyResponse);
        }

        debug!("Summary has {} words", text_utils::word_count(&summary));
        Ok(summary)
    }
}
