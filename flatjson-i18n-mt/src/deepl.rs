//! DeepL API provider for machine translation
//!
//! This module integrates with the DeepL v2 `translate` endpoint. The language pair is
//! fixed to English → Japanese.
//!
//! # Authentication
//!
//! Requests carry `Authorization: DeepL-Auth-Key <key>`. The key is passed explicitly or
//! loaded from the `DEEPL_AUTH_KEY` environment variable. The key is not validated up
//! front: an empty or wrong key makes every request fail, which the batch client reports
//! per batch.
//!
//! # Example
//!
//! ```ignore
//! use flatjson_i18n_mt::{DeepLTranslator, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeepLTranslator::from_env()?;
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let results = provider.translate_batch(&texts).await?;
//!     println!("{:?}", results);
//!     Ok(())
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// DeepL free-tier translate endpoint
pub const DEEPL_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";

/// Source language sent with every request
pub const SOURCE_LANG: &str = "EN";

/// Target language sent with every request
pub const TARGET_LANG: &str = "JA";

/// Environment variable holding the DeepL authentication key
pub const AUTH_KEY_ENV: &str = "DEEPL_AUTH_KEY";

/// Request timeout used by [`DeepLTranslator::new`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a [String],
    source_lang: &'a str,
    target_lang: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

/// DeepL API v2 provider
///
/// One call to [`MachineTranslator::translate_batch`] is one HTTP request; batching and
/// pacing happen in the client above it.
#[derive(Clone)]
pub struct DeepLTranslator {
    /// Key sent in the `Authorization` header
    auth_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    endpoint: String,
}

impl DeepLTranslator {
    /// Create a provider with the default request timeout
    ///
    /// # Arguments
    ///
    /// * `auth_key` - DeepL authentication key (may be empty)
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If the HTTP client cannot be built
    pub fn new(auth_key: impl Into<String>) -> MtResult<Self> {
        Self::with_timeout(auth_key, DEFAULT_TIMEOUT)
    }

    /// Create a provider whose requests give up after `timeout`
    pub fn with_timeout(auth_key: impl Into<String>, timeout: Duration) -> MtResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            auth_key: auth_key.into(),
            client,
            endpoint: DEEPL_ENDPOINT.to_string(),
        })
    }

    /// Create a provider from the `DEEPL_AUTH_KEY` environment variable
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError::ConfigError)` - If the variable is not set
    pub fn from_env() -> MtResult<Self> {
        let auth_key = std::env::var(AUTH_KEY_ENV).map_err(|_| {
            MtError::ConfigError(format!("{} environment variable not set", AUTH_KEY_ENV))
        })?;

        Self::new(auth_key)
    }

    /// Send requests to `endpoint` instead of [`DEEPL_ENDPOINT`], e.g. the paid-plan host
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorization(&self) -> String {
        format!("DeepL-Auth-Key {}", self.auth_key)
    }

    fn request_body(texts: &[String]) -> TranslateRequest<'_> {
        TranslateRequest {
            text: texts,
            source_lang: SOURCE_LANG,
            target_lang: TARGET_LANG,
        }
    }

    /// Decode a response body and check it lines up with the request
    fn parse_response(body: &str, expected: usize) -> MtResult<Vec<String>> {
        let response: TranslateResponse = serde_json::from_str(body)
            .map_err(|e| MtError::MalformedResponse(format!("Failed to parse body: {}", e)))?;

        if response.translations.len() != expected {
            return Err(MtError::MalformedResponse(format!(
                "Expected {} translations, got {}",
                expected,
                response.translations.len()
            )));
        }

        Ok(response.translations.into_iter().map(|t| t.text).collect())
    }
}

impl std::fmt::Debug for DeepLTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepLTranslator")
            .field("auth_key", &"***")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for DeepLTranslator {
    async fn translate_batch(&self, texts: &[String]) -> MtResult<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.authorization())
            .json(&Self::request_body(texts))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MtError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_response(&body, texts.len())
    }

    fn provider_name(&self) -> &str {
        "DeepL"
    }
}
