//! Batching of guarded entries into request-sized groups.
//!
//! The provider correlates its response with the request by position, so the order of
//! entries inside a batch, and of batches relative to each other, follows the source
//! document exactly.

/// Maximum number of entries sent in one translation request
pub const MAX_BATCH_SIZE: usize = 50;

/// A source entry whose text has had its placeholders guarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedEntry {
    pub key: String,
    pub text: String,
}

impl GuardedEntry {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// An ordered group of entries translated by a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Zero-based position of this batch in the run
    pub index: usize,
    pub entries: Vec<GuardedEntry>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Guarded texts in request order
    pub fn texts(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.text.clone()).collect()
    }

    /// Keys in request order
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.key.clone()).collect()
    }
}

/// Partition entries into batches of at most `max_size` entries
///
/// Entries are appended to the current batch until the next one would overflow it; the
/// batch is then sealed and a new one started. No entry is dropped or duplicated, and an
/// empty input yields no batches at all.
///
/// A `max_size` of zero is treated as one.
///
/// # Example
///
/// ```
/// use flatjson_i18n_mt::batch::{GuardedEntry, partition};
///
/// let entries = (0..120).map(|i| GuardedEntry::new(format!("k{}", i), "text"));
/// let batches = partition(entries, 50);
/// let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
/// assert_eq!(sizes, vec![50, 50, 20]);
/// ```
pub fn partition<I>(entries: I, max_size: usize) -> Vec<Batch>
where
    I: IntoIterator<Item = GuardedEntry>,
{
    let max_size = max_size.max(1);
    let mut batches = Vec::new();
    let mut current: Vec<GuardedEntry> = Vec::with_capacity(max_size);

    for entry in entries {
        if current.len() >= max_size {
            let sealed = std::mem::replace(&mut current, Vec::with_capacity(max_size));
            batches.push(Batch {
                index: batches.len(),
                entries: sealed,
            });
        }
        current.push(entry);
    }

    if !current.is_empty() {
        batches.push(Batch {
            index: batches.len(),
            entries: current,
        });
    }

    batches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<GuardedEntry> {
        (0..n)
            .map(|i| GuardedEntry::new(format!("key{}", i), format!("text{}", i)))
            .collect()
    }

    fn sizes(batches: &[Batch]) -> Vec<usize> {
        batches.iter().map(|b| b.len()).collect()
    }

    #[test]
    fn test_partition_empty() {
        let batches = partition(entries(0), MAX_BATCH_SIZE);
        assert!(batches.is_empty());
    }

    #[test]
    fn test_partition_under_limit() {
        let batches = partition(entries(2), MAX_BATCH_SIZE);
        assert_eq!(sizes(&batches), vec![2]);
    }

    #[test]
    fn test_partition_at_limit() {
        let batches = partition(entries(50), MAX_BATCH_SIZE);
        assert_eq!(sizes(&batches), vec![50]);
    }

    #[test]
    fn test_partition_one_over_limit() {
        let batches = partition(entries(51), MAX_BATCH_SIZE);
        assert_eq!(sizes(&batches), vec![50, 1]);
    }

    #[test]
    fn test_partition_120_entries() {
        let batches = partition(entries(120), MAX_BATCH_SIZE);
        assert_eq!(sizes(&batches), vec![50, 50, 20]);
        assert_eq!(
            batches.iter().map(|b| b.index).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_partition_batch_count_and_order() {
        for n in [1usize, 49, 50, 99, 100, 101, 250, 333] {
            let input = entries(n);
            let batches = partition(input.clone(), MAX_BATCH_SIZE);

            assert_eq!(batches.len(), n.div_ceil(MAX_BATCH_SIZE), "n = {}", n);
            assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= MAX_BATCH_SIZE));

            let flattened: Vec<GuardedEntry> =
                batches.into_iter().flat_map(|b| b.entries).collect();
            assert_eq!(flattened, input);
        }
    }

    #[test]
    fn test_partition_zero_size_treated_as_one() {
        let batches = partition(entries(3), 0);
        assert_eq!(sizes(&batches), vec![1, 1, 1]);
    }

    #[test]
    fn test_texts_and_keys_follow_entry_order() {
        let batch = &partition(entries(3), MAX_BATCH_SIZE)[0];
        assert_eq!(batch.texts(), vec!["text0", "text1", "text2"]);
        assert_eq!(batch.keys(), vec!["key0", "key1", "key2"]);
    }
}
