/*!
 * Core translation service implementation.
 *
 * `TranslationService` sends text to either the machine-translation endpoint
 * or an LLM prompted as a translator. Input longer than the provider's
 * `max_chars_per_request` is translated chunk by chunk, in order.
 */

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};

use crate::app_config::{ProviderType, ServiceSettings, TranslationConfig};
use crate::errors::TranslationError;
use crate::language_utils;
use crate::providers::google::{GoogleTranslate, GoogleTranslateRequest};
use crate::providers::llm::{CompletionOptions, LlmClient};
use crate::providers::Provider;
use crate::text_utils::{self, TextChunk};
use crate::translation::Translator;

/// Translation backend variants
#[derive(Debug)]
enum TranslationBackend {
    /// Google Translate web endpoint
    Machine {
        /// Client instance
        client: GoogleTranslate,
    },

    /// Any LLM provider
    Llm {
        /// Client instance
        client: LlmClient,
    },
}

/// HTTP-backed translator
#[derive(Debug)]
pub struct TranslationService {
    /// Backend implementation
    backend: TranslationBackend,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Characters sent per request
    max_chars_per_request: usize,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let provider_config = config.resolved_provider_config();
        let retry = config.retry_policy();

        let backend = match config.provider {
            ProviderType::Google => TranslationBackend::Machine {
                client: GoogleTranslate::new_with_config(
                    provider_config.endpoint.clone(),
                    provider_config.timeout_secs,
                    retry,
                    provider_config.rate_limit,
                ),
            },
            provider => TranslationBackend::Llm {
                client: LlmClient::from_config(provider, &provider_config, retry)?,
            },
        };

        Ok(Self {
            backend,
            max_chars_per_request: provider_config.max_chars_per_request,
            config,
        })
    }

    /// Fill the system prompt template for an LLM translation
    pub fn build_system_prompt(&self, source: Option<&str>, destination: &str) -> String {
        let source_name = source
            .and_then(|code| language_utils::get_language_name(code).ok())
            .unwrap_or_else(|| "the language it is written in".to_string());
        let target_name =
            language_utils::get_language_name(destination).unwrap_or_else(|_| destination.to_string());

        self.config
            .common
            .system_prompt
            .replace("{source_language}", &source_name)
            .replace("{target_language}", &target_name)
    }

    /// Rough token cap for translating `chunk`
    fn token_budget(chunk: &str) -> u32 {
        // Scripts like CJK use far more tokens per character than Latin text
        let chars = chunk.chars().count() as u32;
        chars.saturating_mul(2).clamp(256, 8192)
    }

    async fn translate_chunk(
        &self,
        chunk: &str,
        source: Option<&str>,
        destination: &str,
    ) -> Result<String, TranslationError> {
        let translated = match &self.backend {
            TranslationBackend::Machine { client } => {
                let request = GoogleTranslateRequest::new(chunk, source, destination);
                let response = client.complete(request).await?;
                if let Some(detected) = &response.detected_source {
                    debug!("Translation service detected source language '{}'", detected);
                }
                GoogleTranslate::extract_text(&response)
            }
            TranslationBackend::Llm { client } => {
                let options = CompletionOptions {
                    temperature: self.config.common.temperature,
                    max_tokens: Self::token_budget(chunk),
                    seed: None,
                };
                let completion = client
                    .complete(&self.build_system_prompt(source, destination), chunk, options)
                    .await?;
                text_utils::clean_model_output(&completion.text)
            }
        };

        if translated.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        Ok(translated)
    }

}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        destination: &str,
    ) -> Result<String, TranslationError> {
        let destination = language_utils::resolve_language(destination)
            .map_err(|_| TranslationError::UnsupportedLanguage(destination.to_string()))?;

        let chunks = text_utils::split_into_chunks(text, self.max_chars_per_request);
        info!(
            "Translating {} characters to {} with {} ({} request(s))",
            text.chars().count(),
            destination,
            self.config.provider.display_name(),
            chunks.len()
        );

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            if chunk.text.trim().is_empty() {
                translated.push(chunk);
                continue;
            }
            let text = self.translate_chunk(&chunk.text, source, destination).await?;
            translated.push(TextChunk { text, ..chunk });
        }

        Ok(text_utils::join_chunks(&translated))
    }
}
