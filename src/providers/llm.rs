/*!
 * One completion call over every LLM backend.
 *
 * The translation and summarization services only need "system prompt + user
 * text in, text out". `LlmClient` builds the right client from a resolved
 * `ProviderConfig` and hides the per-API request shapes.
 */

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::time::Instant;
use url::Url;

use crate::app_config::{ProviderConfig, ProviderType};
use crate::errors::ProviderError;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::{Provider, RetryPolicy};

/// Generation settings for one completion
#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    /// Sampling temperature
    pub temperature: f32,
    /// Token cap for the answer
    pub max_tokens: u32,
    /// Seed for backends that support one
    pub seed: Option<u64>,
}

/// Text and token counts returned by a completion
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Raw model answer
    pub text: String,
    /// Prompt tokens, when reported
    pub prompt_tokens: Option<u64>,
    /// Completion tokens, when reported
    pub completion_tokens: Option<u64>,
}

/// LLM backend variants
#[derive(Debug)]
pub enum LlmClient {
    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
        /// Model name
        model: String,
    },

    /// OpenAI API service, or LM Studio through its compatible API
    OpenAI {
        /// Client instance
        client: OpenAI,
        /// Model name
        model: String,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
        /// Model name
        model: String,
    },
}

/// Parse an endpoint string into host and port
pub fn parse_endpoint(endpoint: &str) -> Result<(String, u16)> {
    if endpoint.is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url_str = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    };

    let url = Url::parse(&url_str).context(format!("Failed to parse endpoint URL: {}", endpoint))?;

    let host = format!(
        "{}://{}",
        url.scheme(),
        url.host_str()
            .ok_or_else(|| anyhow!("Invalid host in endpoint: {}", endpoint))?
    );

    let port = url.port().unwrap_or(if url.scheme() == "https" { 443 } else { 11434 });

    Ok((host, port))
}

impl LlmClient {
    /// Build the client for a resolved provider entry
    pub fn from_config(provider: ProviderType, config: &ProviderConfig, retry: RetryPolicy) -> Result<Self> {
        let model = config.model.clone();

        let client = match provider {
            ProviderType::Ollama => {
                let (host, port) = parse_endpoint(&config.endpoint)?;
                Self::Ollama {
                    client: Ollama::new_with_config(host, port, config.timeout_secs, retry, config.rate_limit),
                    model,
                }
            }
            ProviderType::OpenAI | ProviderType::LMStudio => Self::OpenAI {
                client: OpenAI::new_with_config(
                    config.api_key.clone(),
                    config.endpoint.clone(),
                    config.timeout_secs,
                    retry,
                    config.rate_limit,
                ),
                model,
            },
            ProviderType::Anthropic => Self::Anthropic {
                client: Anthropic::new_with_config(
                    config.api_key.clone(),
                    config.endpoint.clone(),
                    config.timeout_secs,
                    retry,
                    config.rate_limit,
                ),
                model,
            },
            ProviderType::Google => {
                return Err(anyhow!("{} is not a language model provider", provider.display_name()));
            }
        };

        Ok(client)
    }

    /// Model the client sends requests to
    pub fn model(&self) -> &str {
        match self {
            Self::Ollama { model, .. } | Self::OpenAI { model, .. } | Self::Anthropic { model, .. } => model,
        }
    }

    /// Run one system + user completion
    pub async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        options: CompletionOptions,
    ) -> Result<Completion, ProviderError> {
        let started = Instant::now();

        let completion = match self {
            Self::Ollama { client, model } => {
                let mut request = GenerationRequest::new(model.as_str(), user_text)
                    .system(system_prompt)
                    .temperature(options.temperature)
                    .max_tokens(options.max_tokens);
                if let Some(seed) = options.seed {
                    request = request.seed(seed);
                }

                let response = client.complete(request).await?;
                Completion {
                    text: Ollama::extract_text(&response),
                    prompt_tokens: response.prompt_eval_count,
                    completion_tokens: response.eval_count,
                }
            }
            Self::OpenAI { client, model } => {
                let mut request = OpenAIRequest::new(model.as_str())
                    .add_message("system", system_prompt)
                    .add_message("user", user_text)
                    .temperature(options.temperature)
                    .max_tokens(options.max_tokens);
                if let Some(seed) = options.seed {
                    request = request.seed(seed);
                }

                let response = client.complete(request).await?;
                Completion {
                    text: OpenAI::extract_text(&response),
                    prompt_tokens: response.usage.as_ref().map(|u| u.prompt_tokens as u64),
                    completion_tokens: response.usage.as_ref().map(|u| u.completion_tokens as u64),
                }
            }
            Self::Anthropic { client, model } => {
                let request = AnthropicRequest::new(model.as_str(), options.max_tokens)
                    .system(system_prompt)
                    .add_message("user", user_text)
                    .temperature(options.temperature);

                let response = client.complete(request).await?;
                Completion {
                    text: Anthropic::extract_text(&response),
                    prompt_tokens: Some(response.usage.input_tokens as u64),
                    completion_tokens: Some(response.usage.output_tokens as u64),
                }
            }
        };

        debug!(
            "{} completion in {:.1}s ({} prompt / {} completion tokens)",
            self.model(),
            started.elapsed().as_secs_f64(),
            completion.prompt_tokens.map_or("?".to_string(), |t| t.to_string()),
            completion.completion_tokens.map_or("?".to_string(), |t| t.to_string()),
        );

        Ok(completion)
    }
}
