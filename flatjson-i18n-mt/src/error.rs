use flatjson_i18n::DocumentError;
use thiserror::Error;

/// Error types for the Machine Translation module
#[derive(Debug, Error)]
pub enum MtError {
    /// The source document could not be read or parsed
    #[error(transparent)]
    Document(#[from] DocumentError),
    /// Network or transport error talking to the provider
    #[error("Network error: {0}")]
    NetworkError(String),
    /// The provider answered with a non-success status
    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },
    /// The provider's response could not be interpreted
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Error during translation phase
    #[error("Translation error: {0}")]
    TranslationError(String),
}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MtError::MalformedResponse(err.to_string())
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
