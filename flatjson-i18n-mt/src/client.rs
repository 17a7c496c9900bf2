//! Sequential, paced translation of batches.
//!
//! Batches go out one at a time, each preceded by a fixed delay, so the request rate never
//! exceeds one per pacing interval. A failed batch is logged and reported; it never stops
//! the batches after it.

use crate::batch::Batch;
use crate::error::{MtError, MtResult};
use crate::guard::TokenGuard;
use crate::translator::MachineTranslator;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Translations keyed by source key
pub type TranslationMap = HashMap<String, String>;

/// A batch whose request or response handling failed
#[derive(Debug)]
pub struct BatchFailure {
    pub batch_index: usize,
    /// Keys left without a translation
    pub keys: Vec<String>,
    pub error: MtError,
}

/// Everything a run of [`TranslationClient::translate_all`] produced
#[derive(Debug, Default)]
pub struct TranslationOutcome {
    pub translations: TranslationMap,
    pub failures: Vec<BatchFailure>,
}

/// Drives a [`MachineTranslator`] over batches of guarded entries
#[derive(Debug)]
pub struct TranslationClient<T> {
    translator: T,
    guard: TokenGuard,
    pacing: Duration,
}

impl<T: MachineTranslator> TranslationClient<T> {
    pub fn new(translator: T, guard: TokenGuard, pacing: Duration) -> Self {
        Self {
            translator,
            guard,
            pacing,
        }
    }

    pub fn translator(&self) -> &T {
        &self.translator
    }

    pub fn guard(&self) -> &TokenGuard {
        &self.guard
    }

    /// Translate one batch and key the unguarded results by the batch's keys
    ///
    /// The response is matched to keys by position. A response with a different number
    /// of entries than the batch is rejected as a whole.
    pub async fn translate_batch(&self, batch: &Batch) -> MtResult<TranslationMap> {
        let translated = self.translator.translate_batch(&batch.texts()).await?;

        if translated.len() != batch.len() {
            return Err(MtError::MalformedResponse(format!(
                "Batch {} sent {} texts but received {} translations",
                batch.index,
                batch.len(),
                translated.len()
            )));
        }

        Ok(batch
            .entries
            .iter()
            .zip(translated)
            .map(|(entry, text)| (entry.key.clone(), self.guard.unguard(&text)))
            .collect())
    }

    /// Translate all batches in order, sleeping for the pacing interval before each
    ///
    /// Keys already translated by an earlier batch are never overwritten.
    pub async fn translate_all(&self, batches: &[Batch]) -> TranslationOutcome {
        let mut outcome = TranslationOutcome::default();

        for batch in batches {
            tokio::time::sleep(self.pacing).await;

            debug!(
                batch = batch.index,
                entries = batch.len(),
                provider = self.translator.provider_name(),
                "Translating batch"
            );

            match self.translate_batch(batch).await {
                Ok(translations) => {
                    for (key, text) in translations {
                        outcome.translations.entry(key).or_insert(text);
                    }
                }
                Err(error) => {
                    warn!(
                        batch = batch.index,
                        entries = batch.len(),
                        %error,
                        "Batch translation failed, its keys stay untranslated"
                    );
                    outcome.failures.push(BatchFailure {
                        batch_index: batch.index,
                        keys: batch.keys(),
                        error,
                    });
                }
            }
        }

        outcome
    }
}
