//! Machine Translation trait
//!
//! `MachineTranslator` is the seam between the batch client and the component that
//! actually produces translations: the DeepL provider in production, the mock translator
//! in tests and `--mock` runs.
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

use crate::error::MtResult;
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// The language pair is a property of the provider, not of the call.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate multiple strings in a single request
    ///
    /// # Arguments
    ///
    /// * `texts` - Strings to translate, in request order
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Translated strings, positionally aligned with `texts`
    /// * `Err(MtError)` - If the request or the response handling failed
    ///
    /// Callers correlate results by position, so implementations must not reorder,
    /// merge or drop entries.
    async fn translate_batch(&self, texts: &[String]) -> MtResult<Vec<String>>;

    /// Get the name of this translation provider
    ///
    /// Used for logging to identify which provider handled a batch.
    fn provider_name(&self) -> &str;
}
