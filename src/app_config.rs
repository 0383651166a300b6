use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::language_utils;
use crate::providers::RetryPolicy;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the input text (code or name); unset means "not selected"
    #[serde(default)]
    pub input_language: Option<String>,

    /// Language of the produced summary (code or name); unset means "not selected"
    #[serde(default)]
    pub output_language: Option<String>,

    /// Target summary length as a percentage of the input word count
    #[serde(default = "default_summary_length")]
    pub summary_length: u8,

    /// Requested summarization method
    #[serde(default)]
    pub summary_method: SummaryMethod,

    /// Translation service config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Summarization service config
    #[serde(default)]
    pub summarization: SummarizationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Backend type for the translation and summarization services
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    // @provider: Google Translate web endpoint (translation only)
    Google,
    // @provider: Ollama
    Ollama,
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl ProviderType {
    /// Every provider, in the order default configs list them
    pub const ALL: [ProviderType; 5] = [
        Self::Google,
        Self::Ollama,
        Self::OpenAI,
        Self::Anthropic,
        Self::LMStudio,
    ];

    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Translate",
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    /// Whether the backend is a language model that can follow prompts
    pub fn is_llm(&self) -> bool {
        !matches!(self, Self::Google)
    }

    /// Whether the hosted API refuses requests without a key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::Anthropic)
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ProviderType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Summarization method offered to the user
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    /// Verbatim sentence selection (not implemented; runs abstractive)
    Extractive,
    /// Model-written paraphrase
    #[default]
    Abstractive,
}

impl std::fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Extractive => write!(f, "extractive"),
            Self::Abstractive => write!(f, "abstractive"),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (unused by Google)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Max chars per request
    #[serde(default = "default_max_chars_per_request")]
    pub max_chars_per_request: usize,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Rate limit (requests per minute)
    #[serde(default)]
    pub rate_limit: Option<u32>,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: ProviderType) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(provider_type),
            max_chars_per_request: match provider_type {
                ProviderType::Google => default_google_max_chars_per_request(),
                ProviderType::Anthropic => default_anthropic_max_chars_per_request(),
                _ => default_max_chars_per_request(),
            },
            timeout_secs: match provider_type {
                ProviderType::Anthropic => default_anthropic_timeout_secs(),
                ProviderType::Ollama | ProviderType::LMStudio => default_local_timeout_secs(),
                _ => default_timeout_secs(),
            },
            rate_limit: default_rate_limit(provider_type),
        }
    }
}

/// Accessors shared by the translation and summarization sections
pub trait ServiceSettings {
    /// Active provider
    fn provider(&self) -> ProviderType;

    /// Configured provider entries
    fn available_providers(&self) -> &[ProviderConfig];

    /// Retry settings for requests
    fn retry_policy(&self) -> RetryPolicy;

    /// Get a specific provider configuration by type
    fn get_provider_config(&self, provider_type: &ProviderType) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers()
            .iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the active provider configuration from the available_providers array
    fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider())
    }

    /// Active provider entry with empty fields replaced by defaults
    fn resolved_provider_config(&self) -> ProviderConfig {
        let provider = self.provider();
        let defaults = ProviderConfig::new(provider);
        let Some(configured) = self.get_active_provider_config() else {
            return defaults;
        };

        ProviderConfig {
            provider_type: defaults.provider_type,
            model: non_empty_or(&configured.model, defaults.model),
            api_key: configured.api_key.clone(),
            endpoint: non_empty_or(&configured.endpoint, defaults.endpoint),
            max_chars_per_request: if configured.max_chars_per_request > 0 {
                configured.max_chars_per_request
            } else {
                defaults.max_chars_per_request
            },
            timeout_secs: if configured.timeout_secs > 0 {
                configured.timeout_secs
            } else {
                defaults.timeout_secs
            },
            rate_limit: configured.rate_limit,
        }
    }

    /// Get the model for the active provider
    fn get_model(&self) -> String {
        self.resolved_provider_config().model
    }

    /// Get the API key for the active provider
    fn get_api_key(&self) -> String {
        self.resolved_provider_config().api_key
    }

    /// Get the endpoint for the active provider
    fn get_endpoint(&self) -> String {
        self.resolved_provider_config().endpoint
    }
}

fn non_empty_or(value: &str, fallback: String) -> String {
    if value.is_empty() { fallback } else { value.to_string() }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default = "default_translation_provider")]
    pub provider: ProviderType,

    /// Available translation providers
    #[serde(default = "default_provider_list")]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for LLM translation
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_translation_prompt")]
    pub system_prompt: String,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_translation_temperature")]
    pub temperature: f32,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_translation_prompt(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: default_translation_temperature(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: default_translation_provider(),
            available_providers: default_provider_list(),
            common: TranslationCommonConfig::default(),
        }
    }
}

impl ServiceSettings for TranslationConfig {
    fn provider(&self) -> ProviderType {
        self.provider
    }

    fn available_providers(&self) -> &[ProviderConfig] {
        &self.available_providers
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.common.retry_count,
            backoff_base_ms: self.common.retry_backoff_ms,
        }
    }
}

/// Summarization service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SummarizationConfig {
    /// Summarization provider to use (must be a language model)
    #[serde(default = "default_summarization_provider")]
    pub provider: ProviderType,

    /// Available summarization providers
    #[serde(default = "default_provider_list")]
    pub available_providers: Vec<ProviderConfig>,

    /// Common summarization settings
    #[serde(default)]
    pub common: SummarizationCommonConfig,
}

/// Common summarization settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SummarizationCommonConfig {
    /// System prompt template for summarization
    /// Placeholders: {min_length}, {max_length}
    #[serde(default = "default_summarization_prompt")]
    pub system_prompt: String,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Temperature; 0.0 keeps the summary deterministic
    #[serde(default)]
    pub temperature: f32,

    /// Sampling seed passed to backends that accept one
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SummarizationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_summarization_prompt(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            temperature: 0.0,
            seed: default_seed(),
        }
    }
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        Self {
            provider: default_summarization_provider(),
            available_providers: default_provider_list(),
            common: SummarizationCommonConfig::default(),
        }
    }
}

impl ServiceSettings for SummarizationConfig {
    fn provider(&self) -> ProviderType {
        self.provider
    }

    fn available_providers(&self) -> &[ProviderConfig] {
        &self.available_providers
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.common.retry_count,
            backoff_base_ms: self.common.retry_backoff_ms,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Smallest accepted summary percentage
pub const MIN_SUMMARY_LENGTH: u8 = 10;

/// Largest accepted summary percentage
pub const MAX_SUMMARY_LENGTH: u8 = 100;

fn default_summary_length() -> u8 {
    50
}

fn default_translation_provider() -> ProviderType {
    ProviderType::Google
}

fn default_summarization_provider() -> ProviderType {
    ProviderType::Ollama
}

fn default_provider_list() -> Vec<ProviderConfig> {
    ProviderType::ALL.into_iter().map(ProviderConfig::new).collect()
}

fn default_max_chars_per_request() -> usize {
    4000
}

fn default_google_max_chars_per_request() -> usize {
    // The web endpoint rejects much longer queries
    4500
}

fn default_anthropic_max_chars_per_request() -> usize {
    8000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_local_timeout_secs() -> u64 {
    120
}

fn default_anthropic_timeout_secs() -> u64 {
    60
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_translation_temperature() -> f32 {
    0.3
}

fn default_seed() -> u64 {
    42
}

fn default_endpoint(provider: ProviderType) -> String {
    match provider {
        ProviderType::Google => "https://translate.googleapis.com",
        ProviderType::Ollama => "http://localhost:11434",
        ProviderType::OpenAI => "https://api.openai.com/v1",
        ProviderType::Anthropic => "https://api.anthropic.com",
        // LM Studio default server (OpenAI compatible) runs on port 1234 under /v1
        ProviderType::LMStudio => "http://localhost:1234/v1",
    }
    .to_string()
}

fn default_model(provider: ProviderType) -> String {
    match provider {
        ProviderType::Google => "",
        ProviderType::Ollama => "llama3.2:3b",
        ProviderType::OpenAI => "gpt-4o-mini",
        ProviderType::Anthropic => "claude-3-haiku-20240307",
        // Placeholder; users should set to the loaded model name in LM Studio
        ProviderType::LMStudio => "local-model",
    }
    .to_string()
}

fn default_rate_limit(provider: ProviderType) -> Option<u32> {
    match provider {
        ProviderType::Google => Some(60),
        ProviderType::OpenAI => Some(60),
        // Slightly below Anthropic's standard 50 requests per minute
        ProviderType::Anthropic => Some(45),
        ProviderType::Ollama | ProviderType::LMStudio => None,
    }
}

fn default_translation_prompt() -> String {
    "You are a professional translator. Translate the user's text from {source_language} to {target_language}. Reply with the translation only, preserving line breaks, meaning and tone.".to_string()
}

fn default_summarization_prompt() -> String {
    "You are an expert editor. Write an abstractive summary of the user's text in English, paraphrasing rather than copying sentences. The summary must be between {min_length} and {max_length} words long. Reply with the summary only.".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SUMMARY_LENGTH..=MAX_SUMMARY_LENGTH).contains(&self.summary_length) {
            return Err(anyhow!(
                "Summary length must be between {} and {} percent, got {}",
                MIN_SUMMARY_LENGTH,
                MAX_SUMMARY_LENGTH,
                self.summary_length
            ));
        }

        // Unset languages are allowed; the workflow reports them per run
        for language in [&self.input_language, &self.output_language].into_iter().flatten() {
            language_utils::resolve_language(language)?;
        }

        if !self.summarization.provider.is_llm() {
            return Err(anyhow!(
                "{} cannot summarize; choose an LLM provider for summarization",
                self.summarization.provider.display_name()
            ));
        }

        for (service, provider, api_key) in [
            ("translation", self.translation.provider, self.translation.get_api_key()),
            ("summarization", self.summarization.provider, self.summarization.get_api_key()),
        ] {
            if provider.requires_api_key() && api_key.is_empty() {
                return Err(anyhow!(
                    "API key is required for {} provider ({})",
                    provider.display_name(),
                    service
                ));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_language: None,
            output_language: None,
            summary_length: default_summary_length(),
            summary_method: SummaryMethod::default(),
            translation: TranslationConfig::default(),
            summarization: SummarizationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
