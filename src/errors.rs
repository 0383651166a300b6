/*!
 * Error types for the summarize-pro application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * The adapter errors (`TranslationError`, `SummarizationError`) render as
 * `"Translation error: ..."` / `"Summarization error: ..."` so that a failed
 * stage can still be shown to the user as a single diagnostic line.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Map a non-success HTTP status and its body to the matching variant
    pub fn from_status(status_code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status_code {
            401 | 403 => Self::AuthenticationError(message),
            429 => Self::RateLimitExceeded(message),
            _ => Self::ApiError { status_code, message },
        }
    }

    /// Whether another attempt could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ConnectionError(_) | Self::RequestFailed(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code >= 500,
            Self::ParseError(_) | Self::AuthenticationError(_) => false,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::ConnectionError(error.to_string())
        } else if error.is_decode() {
            Self::ParseError(error.to_string())
        } else {
            Self::RequestFailed(error.to_string())
        }
    }
}

/// Errors that can occur while reading an uploaded document or building an export
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The upload is neither plain text nor a word-processor document
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),

    /// Plain text that is not valid UTF-8
    #[error("File is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    /// The OOXML container could not be opened or written
    #[error("Invalid document archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The document body could not be parsed
    #[error("Invalid document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Low-level I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Translation error: {0}")]
    Provider(#[from] ProviderError),

    /// Destination or source language the backend cannot handle
    #[error("Translation error: unsupported language '{0}'")]
    UnsupportedLanguage(String),

    /// The backend answered but produced no text
    #[error("Translation error: empty response from translation service")]
    EmptyResponse,
}

/// Errors that can occur during summarization
#[derive(Error, Debug)]
pub enum SummarizationError {
    /// Error from the provider API
    #[error("Summarization error: {0}")]
    Provider(#[from] ProviderError),

    /// The configured backend cannot summarize
    #[error("Summarization error: provider '{0}' does not support summarization")]
    UnsupportedProvider(String),

    /// The model answered but produced no text
    #[error("Summarization error: empty response from summarization model")]
    EmptyResponse,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from document handling
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from translation
    #[error("{0}")]
    Translation(#[from] TranslationError),

    /// Error from summarization
    #[error("{0}")]
    Summarization(#[from] SummarizationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
