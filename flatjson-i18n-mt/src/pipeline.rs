//! Document translation pipeline
//!
//! Parse → Guard → Batch → Translate → Assemble, run once per document:
//!
//! 1. Parse the JSON text into an ordered [`SourceDocument`]
//! 2. Wrap the placeholders of every value with the [`TokenGuard`]
//! 3. Partition the guarded entries into batches
//! 4. Translate the batches one after another
//! 5. Emit one [`OutputRecord`] per source entry, in source order
//!
//! Only step 1 can fail the run. Batch failures leave their keys untranslated and are
//! listed in the [`TranslationReport`].
//!
//! # Example
//!
//! ```ignore
//! use flatjson_i18n_mt::{DeepLTranslator, Pipeline, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = DeepLTranslator::from_env()?;
//!     let pipeline = Pipeline::new(provider, PipelineConfig::default())?;
//!     let records = pipeline.run(r#"{"greeting": "Hello %s"}"#).await?;
//!     println!("{:?}", records);
//!     Ok(())
//! }
//! ```

use crate::batch::{Batch, GuardedEntry, partition};
use crate::client::{BatchFailure, TranslationClient};
use crate::config::{MissingTranslation, PipelineConfig};
use crate::deepl::DeepLTranslator;
use crate::error::MtResult;
use crate::guard::TokenGuard;
use crate::translator::MachineTranslator;
use flatjson_i18n::{OutputRecord, SourceDocument};
use tracing::{info, warn};

/// Records plus the batches that failed on the way
#[derive(Debug)]
pub struct TranslationReport {
    pub records: Vec<OutputRecord>,
    pub batch_count: usize,
    pub failures: Vec<BatchFailure>,
}

impl TranslationReport {
    /// Number of records that received a translation
    pub fn translated_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_translated()).count()
    }

    /// Keys of all failed batches, in batch order
    pub fn failed_keys(&self) -> impl Iterator<Item = &str> {
        self.failures
            .iter()
            .flat_map(|f| f.keys.iter().map(String::as_str))
    }
}

/// Placeholder-preserving batch translator for flat JSON documents
#[derive(Debug)]
pub struct Pipeline<T> {
    client: TranslationClient<T>,
    config: PipelineConfig,
}

impl<T: MachineTranslator> Pipeline<T> {
    /// Build a pipeline around a translator
    ///
    /// # Errors
    /// `MtError::ConfigError` if the configuration or its marker tag is invalid.
    pub fn new(translator: T, config: PipelineConfig) -> MtResult<Self> {
        config.validate()?;
        let guard = TokenGuard::new(&config.marker)?;
        Ok(Self {
            client: TranslationClient::new(translator, guard, config.pacing),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn translator(&self) -> &T {
        self.client.translator()
    }

    /// Translate a document and return its records in source order
    ///
    /// # Errors
    /// `MtError::Document` if `text` is not a JSON object. Translation failures never
    /// surface here.
    pub async fn run(&self, text: &str) -> MtResult<Vec<OutputRecord>> {
        Ok(self.run_with_report(text).await?.records)
    }

    /// Like [`Pipeline::run`], but also returns which batches failed
    pub async fn run_with_report(&self, text: &str) -> MtResult<TranslationReport> {
        let document = SourceDocument::parse(text)?;
        Ok(self.translate_parsed(&document).await)
    }

    /// Translate an already parsed document
    pub async fn translate_parsed(&self, document: &SourceDocument) -> TranslationReport {
        let batches = self.prepare_batches(document);
        info!(
            entries = document.len(),
            batches = batches.len(),
            provider = self.client.translator().provider_name(),
            "Translating document"
        );

        let outcome = self.client.translate_all(&batches).await;
        if !outcome.failures.is_empty() {
            warn!(
                failed_batches = outcome.failures.len(),
                total_batches = batches.len(),
                "Some batches could not be translated"
            );
        }

        let records = document
            .iter()
            .map(|(key, value)| {
                let translated = match outcome.translations.get(key) {
                    Some(text) => text.clone(),
                    None => match self.config.missing {
                        MissingTranslation::Empty => String::new(),
                        MissingTranslation::Original => value.to_string(),
                    },
                };
                OutputRecord::new(key, value, translated)
            })
            .collect();

        TranslationReport {
            records,
            batch_count: batches.len(),
            failures: outcome.failures,
        }
    }

    /// Guard every entry in document order and partition the result
    fn prepare_batches(&self, document: &SourceDocument) -> Vec<Batch> {
        let guard = self.client.guard();
        let entries = document
            .iter()
            .map(|(key, value)| GuardedEntry::new(key, guard.guard(value)));
        partition(entries, self.config.batch_size)
    }
}

/// Translate a document with DeepL using the default configuration
///
/// The credential is used as-is; an empty or wrong key yields records without
/// translations rather than an error.
pub async fn translate_document(text: &str, credential: &str) -> MtResult<Vec<OutputRecord>> {
    let config = PipelineConfig::default();
    let provider = DeepLTranslator::with_timeout(credential, config.request_timeout)?;
    Pipeline::new(provider, config)?.run(text).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MtError;
    use crate::mock::{MockMode, MockTranslator};
    use std::time::Duration;

    fn pipeline(mock: MockTranslator) -> Pipeline<MockTranslator> {
        Pipeline::new(mock, PipelineConfig::new().with_pacing(Duration::ZERO)).unwrap()
    }

    #[tokio::test]
    async fn test_run_parse_error_propagates() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let result = pipeline(mock.clone()).run("not json").await;
        assert!(matches!(result, Err(MtError::Document(_))));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_non_object_is_parse_error() {
        let result = pipeline(MockTranslator::new(MockMode::NoOp)).run("[1, 2]").await;
        assert!(matches!(result, Err(MtError::Document(_))));
    }

    #[tokio::test]
    async fn test_run_empty_document() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let records = pipeline(mock.clone()).run("{}").await.unwrap();
        assert!(records.is_empty());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_sends_guarded_text() {
        let mock = MockTranslator::new(MockMode::NoOp);
        pipeline(mock.clone())
            .run(r#"{"left": "%1$s items left"}"#)
            .await
            .unwrap();
        assert_eq!(
            mock.calls(),
            vec![vec!["<keep> %1$s </keep>  items left".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_missing_policy_original() {
        let mock = MockTranslator::new(MockMode::Error("down".to_string()));
        let config = PipelineConfig::new()
            .with_pacing(Duration::ZERO)
            .with_missing(MissingTranslation::Original);
        let pipeline = Pipeline::new(mock, config).unwrap();

        let records = pipeline.run(r#"{"a": "Hello"}"#).await.unwrap();
        assert_eq!(records, vec![OutputRecord::new("a", "Hello", "Hello")]);
    }

    #[tokio::test]
    async fn test_custom_marker_reaches_translator() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let config = PipelineConfig::new()
            .with_pacing(Duration::ZERO)
            .with_marker("notranslate");
        let pipeline = Pipeline::new(mock.clone(), config).unwrap();

        let records = pipeline.run(r#"{"a": "Hi %s"}"#).await.unwrap();
        assert_eq!(records[0].translated_value, "Hi %s");
        assert_eq!(
            mock.calls()[0],
            vec!["Hi <notranslate> %s </notranslate>".to_string()]
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mock = MockTranslator::new(MockMode::NoOp);
        assert!(Pipeline::new(mock.clone(), PipelineConfig::new().with_marker("a b")).is_err());
        assert!(Pipeline::new(mock, PipelineConfig::new().with_batch_size(0)).is_err());
    }

    #[tokio::test]
    async fn test_report_counts() {
        let mock = MockTranslator::new(MockMode::Suffix).failing_on([0]);
        let config = PipelineConfig::new()
            .with_pacing(Duration::ZERO)
            .with_batch_size(2);
        let pipeline = Pipeline::new(mock, config).unwrap();

        let report = pipeline
            .run_with_report(r#"{"a": "1", "b": "2", "c": "3"}"#)
            .await
            .unwrap();
        assert_eq!(report.batch_count, 2);
        assert_eq!(report.translated_count(), 1);
        assert_eq!(report.failed_keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
