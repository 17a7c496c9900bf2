//! Mock Machine Translator for testing
//!
//! This module provides a deterministic, API-free translator for exercising the batch
//! pipeline without an authentication key or network access.
//!
//! # Example
//!
//! ```ignore
//! use flatjson_i18n_mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate_batch(&["hello".to_string()]).await.unwrap();
//!     assert_eq!(result, vec!["hello_ja"]);
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append a target suffix: "hello" → "hello_ja"
    Suffix,

    /// Use predefined mappings, falling back to `Suffix` for unknown texts
    Mappings(HashMap<String, String>),

    /// Return canned responses verbatim: call `n` gets element `n`.
    /// Calls beyond the script fail.
    Scripted(Vec<Vec<String>>),

    /// Reverse the order of whitespace-separated words
    Reorder,

    /// Simulate API errors on every call
    Error(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
///
/// Clones share the same call log.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    /// Zero-based call numbers that fail regardless of mode
    failing_calls: HashSet<usize>,
    calls: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            failing_calls: HashSet::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each batch will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Make the given zero-based calls fail with a simulated network error
    pub fn failing_on(mut self, calls: impl IntoIterator<Item = usize>) -> Self {
        self.failing_calls.extend(calls);
        self
    }

    /// Every batch received so far, in call order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.call_log().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log().len()
    }

    // Each push is a single step, so a poisoned log is still consistent
    fn call_log(&self) -> MutexGuard<'_, Vec<Vec<String>>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the batch and return its zero-based call number
    fn record_call(&self, texts: &[String]) -> usize {
        let mut calls = self.call_log();
        calls.push(texts.to_vec());
        calls.len() - 1
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn translate_one(&self, text: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(suffixed(text)),
            MockMode::Mappings(map) => Ok(map.get(text).cloned().unwrap_or_else(|| suffixed(text))),
            MockMode::Reorder => Ok(text.split_whitespace().rev().collect::<Vec<_>>().join(" ")),
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
            MockMode::Scripted(_) => Err(MtError::TranslationError(
                "Scripted mode answers whole batches only".to_string(),
            )),
        }
    }
}

fn suffixed(text: &str) -> String {
    format!("{}_ja", text)
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate_batch(&self, texts: &[String]) -> MtResult<Vec<String>> {
        let call = self.record_call(texts);

        // Apply simulated delay (per batch, not per string)
        self.apply_delay().await;

        if self.failing_calls.contains(&call) {
            return Err(MtError::NetworkError(format!(
                "Simulated failure on call {}",
                call
            )));
        }

        if let MockMode::Scripted(responses) = &self.mode {
            return responses.get(call).cloned().ok_or_else(|| {
                MtError::TranslationError(format!("No scripted response for call {}", call))
            });
        }

        texts.iter().map(|text| self.translate_one(text)).collect()
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_suffix_batch_translation() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let results = mock.translate_batch(&strings(&["hello", "world"])).await.unwrap();
        assert_eq!(results, vec!["hello_ja", "world_ja"]);
    }

    #[tokio::test]
    async fn test_mapping_with_fallback() {
        let mut map = HashMap::new();
        map.insert("hello".to_string(), "こんにちは".to_string());

        let mock = MockTranslator::new(MockMode::Mappings(map));
        let results = mock.translate_batch(&strings(&["hello", "unknown"])).await.unwrap();
        assert_eq!(results, vec!["こんにちは", "unknown_ja"]);
    }

    #[tokio::test]
    async fn test_scripted_responses_per_call() {
        let mock = MockTranslator::new(MockMode::Scripted(vec![
            strings(&["Bonjour", "Monde"]),
            strings(&["Salut"]),
        ]));
        assert_eq!(
            mock.translate_batch(&strings(&["a", "b"])).await.unwrap(),
            vec!["Bonjour", "Monde"]
        );
        assert_eq!(
            mock.translate_batch(&strings(&["c"])).await.unwrap(),
            vec!["Salut"]
        );
        assert!(mock.translate_batch(&strings(&["d"])).await.is_err());
    }

    #[tokio::test]
    async fn test_reorder_reverses_words() {
        let mock = MockTranslator::new(MockMode::Reorder);
        let results = mock.translate_batch(&strings(&["one two three"])).await.unwrap();
        assert_eq!(results, vec!["three two one"]);
    }

    #[tokio::test]
    async fn test_error_mode_returns_error() {
        let mock = MockTranslator::new(MockMode::Error("API unavailable".to_string()));
        match mock.translate_batch(&strings(&["hello"])).await {
            Err(MtError::TranslationError(msg)) => assert_eq!(msg, "API unavailable"),
            other => panic!("Expected TranslationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_noop_returns_unchanged() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let texts = strings(&["hello", "world"]);
        assert_eq!(mock.translate_batch(&texts).await.unwrap(), texts);
    }

    #[tokio::test]
    async fn test_failing_calls_only_fail_selected() {
        let mock = MockTranslator::new(MockMode::NoOp).failing_on([1]);
        assert!(mock.translate_batch(&strings(&["a"])).await.is_ok());
        assert!(matches!(
            mock.translate_batch(&strings(&["b"])).await,
            Err(MtError::NetworkError(_))
        ));
        assert!(mock.translate_batch(&strings(&["c"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_calls_are_recorded_and_shared_by_clones() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let clone = mock.clone();
        clone.translate_batch(&strings(&["x", "y"])).await.unwrap();
        mock.translate_batch(&strings(&["z"])).await.unwrap();

        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.calls(), vec![strings(&["x", "y"]), strings(&["z"])]);
    }

    #[tokio::test]
    async fn test_poisoned_call_log_keeps_numbering() {
        let mock = MockTranslator::new(MockMode::NoOp).failing_on([1]);
        mock.translate_batch(&strings(&["a"])).await.unwrap();

        let log = Arc::clone(&mock.calls);
        let _ = std::thread::spawn(move || {
            let _held = log.lock().unwrap();
            panic!("panic while holding the call log");
        })
        .join();
        assert!(mock.calls.is_poisoned());

        assert!(matches!(
            mock.translate_batch(&strings(&["b"])).await,
            Err(MtError::NetworkError(_))
        ));
        assert!(mock.translate_batch(&strings(&["c"])).await.is_ok());
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.calls()[2], strings(&["c"]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_adds_latency() {
        let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
        let start = tokio::time::Instant::now();
        mock.translate_batch(&strings(&["hello"])).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_provider_name() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.provider_name(), "Mock Translator");
    }
}
