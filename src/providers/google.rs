use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::errors::ProviderError;
use crate::providers::{error_from_response, Provider, RateLimiter, RetryPolicy};

/// Client for the public Google Translate web endpoint (`client=gtx`)
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL, e.g. `https://translate.googleapis.com`
    endpoint: String,
    /// Retry behaviour for server and network errors
    retry: RetryPolicy,
    /// Client-side request spacing
    rate_limiter: RateLimiter,
}

/// Translation request
#[derive(Debug, Clone)]
pub struct GoogleTranslateRequest {
    /// Text to translate
    pub text: String,
    /// Source language code, `auto` to detect
    pub source_language: String,
    /// Destination language code
    pub target_language: String,
}

/// Translation response
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleTranslateResponse {
    /// Translated sentence segments, in order
    pub segments: Vec<String>,
    /// Source language reported by the service
    pub detected_source: Option<String>,
}

impl GoogleTranslateRequest {
    /// Create a request; `None` as source means auto-detect
    pub fn new(text: impl Into<String>, source_language: Option<&str>, target_language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.unwrap_or("auto").to_string(),
            target_language: target_language.into(),
        }
    }
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new_with_config(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        retry: RetryPolicy,
        rate_limit: Option<u32>,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .user_agent("Mozilla/5.0")
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
            retry,
            rate_limiter: RateLimiter::new(rate_limit),
        }
    }

    /// Translate one request
    pub async fn translate(&self, request: &GoogleTranslateRequest) -> Result<GoogleTranslateResponse, ProviderError> {
        let url = format!("{}/translate_a/single", self.endpoint.trim_end_matches('/'));
        let url = url.as_str();

        self.retry
            .run("Google Translate", move || async move {
                self.rate_limiter.acquire().await;

                let response = self
                    .client
                    .post(url)
                    .query(&[
                        ("client", "gtx"),
                        ("sl", request.source_language.as_str()),
                        ("tl", request.target_language.as_str()),
                        ("dt", "t"),
                    ])
                    .form(&[("q", request.text.as_str())])
                    .send()
                    .await?;

                if !response.status().is_success() {
                    return Err(error_from_response("Google Translate", response).await);
                }

                let body = response.text().await?;
                Self::parse_response(&body)
            })
            .await
    }

    /// Parse the nested-array payload: `[[["Bonjour","Hello",...],...],null,"en",...]`
    pub fn parse_response(body: &str) -> Result<GoogleTranslateResponse, ProviderError> {
        let json: serde_json::Value =
            serde_json::from_str(body).map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let sentences = json
            .get(0)
            .and_then(|v| v.as_array())
            .ok_or_else(|| ProviderError::ParseError("missing translation segments".to_string()))?;

        let segments = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(|v| v.as_str()))
            .map(str::to_string)
            .collect();

        let detected_source = json.get(2).and_then(|v| v.as_str()).map(str::to_string);

        Ok(GoogleTranslateResponse { segments, detected_source })
    }
}

#[async_trait]
impl Provider for GoogleTranslate {
    type Request = GoogleTranslateRequest;
    type Response = GoogleTranslateResponse;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.translate(&request).await
    }

    fn extract_text(response: &Self::Response) -> String {
        response.segments.concat()
    }
}
