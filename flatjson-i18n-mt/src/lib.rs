//! Machine Translation support for flat JSON documents
//!
//! This crate translates the values of a flat key/value JSON document in batches while
//! keeping `%`-style format placeholders intact.
//!
//! # Workflow Example
//!
//! ```ignore
//! use flatjson_i18n_mt::{DeepLTranslator, Pipeline, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Pick a provider
//!     let provider = DeepLTranslator::from_env()?;
//!
//!     // 2. Build the pipeline (batch size, pacing, marker tag...)
//!     let pipeline = Pipeline::new(provider, PipelineConfig::default())?;
//!
//!     // 3. Translate: parse → guard → batch → translate → assemble
//!     let report = pipeline.run_with_report(r#"{"left": "%1$s items left"}"#).await?;
//!
//!     for record in &report.records {
//!         println!("{} → {}", record.value, record.translated_value);
//!     }
//!     Ok(())
//! }
//! ```

pub mod batch;
pub mod client;
pub mod config;
pub mod deepl;
pub mod error;
pub mod guard;
pub mod mock;
pub mod pipeline;
pub mod translator;


// Re-export main types for convenient access
pub use batch::{Batch, GuardedEntry, MAX_BATCH_SIZE, partition};
pub use client::{BatchFailure, TranslationClient, TranslationMap, TranslationOutcome};
pub use config::{DEFAULT_PACING, MissingTranslation, PipelineConfig};
pub use deepl::{AUTH_KEY_ENV, DEEPL_ENDPOINT, DeepLTranslator};
pub use error::{MtError, MtResult};
pub use flatjson_i18n::{OutputRecord, SourceDocument};
pub use guard::{DEFAULT_MARKER, TokenGuard};
pub use mock::{MockMode, MockTranslator};
pub use pipeline::{Pipeline, TranslationReport, translate_document};
pub use translator::MachineTranslator;
