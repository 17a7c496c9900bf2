use crate::batch::MAX_BATCH_SIZE;
use crate::deepl::DEFAULT_TIMEOUT;
use crate::error::{MtError, MtResult};
use crate::guard::DEFAULT_MARKER;
use std::str::FromStr;
use std::time::Duration;

/// Delay imposed before every batch request
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// What a key maps to when its batch could not be translated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTranslation {
    /// Leave the translation empty
    #[default]
    Empty,
    /// Use the untranslated source text
    Original,
}

impl FromStr for MissingTranslation {
    type Err = MtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "empty" => Ok(Self::Empty),
            "original" => Ok(Self::Original),
            other => Err(MtError::ConfigError(format!(
                "Unknown missing-translation policy '{}' (expected 'empty' or 'original')",
                other
            ))),
        }
    }
}

/// Settings for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Maximum entries per request
    pub batch_size: usize,
    /// Delay before each request, the first one included
    pub pacing: Duration,
    /// Tag name wrapped around placeholders
    pub marker: String,
    /// HTTP request timeout for the DeepL provider
    pub request_timeout: Duration,
    pub missing: MissingTranslation,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            pacing: DEFAULT_PACING,
            marker: DEFAULT_MARKER.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            missing: MissingTranslation::Empty,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_missing(mut self, missing: MissingTranslation) -> Self {
        self.missing = missing;
        self
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> MtResult<()> {
        if self.batch_size == 0 {
            return Err(MtError::ConfigError(
                "Batch size must be at least 1".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(MtError::ConfigError(
                "Request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.pacing, Duration::from_millis(100));
        assert_eq!(config.marker, "keep");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.missing, MissingTranslation::Empty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = PipelineConfig::new()
            .with_batch_size(10)
            .with_pacing(Duration::ZERO)
            .with_marker("notranslate")
            .with_request_timeout(Duration::from_secs(5))
            .with_missing(MissingTranslation::Original);
        assert_eq!(config.batch_size, 10);
        assert_eq!(config.pacing, Duration::ZERO);
        assert_eq!(config.marker, "notranslate");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.missing, MissingTranslation::Original);
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        assert!(PipelineConfig::new().with_batch_size(0).validate().is_err());
        assert!(
            PipelineConfig::new()
                .with_request_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_missing_translation_from_str() {
        assert_eq!("empty".parse::<MissingTranslation>().unwrap(), MissingTranslation::Empty);
        assert_eq!(
            "Original".parse::<MissingTranslation>().unwrap(),
            MissingTranslation::Original
        );
        assert!("fallback".parse::<MissingTranslation>().is_err());
    }
}
