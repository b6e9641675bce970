//! In-memory storage for testing.

use std::sync::{Arc, Mutex};

use crate::corpus::TextRecord;
use crate::error::Result;
use crate::storage::Storage;

/// An in-memory storage implementation.
///
/// Useful for tests and for driving the pipeline over a synthetic corpus
/// without touching the filesystem.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    records: Arc<Mutex<Vec<TextRecord>>>,
}

impl MemoryStorage {
    /// Create a storage seeded with the given records.
    pub fn new(records: Vec<TextRecord>) -> Self {
        MemoryStorage {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// A copy of the currently stored records.
    pub fn snapshot(&self) -> Vec<TextRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, limit: Option<usize>) -> Result<Vec<TextRecord>> {
        let records = self.records.lock().unwrap();
        let mut loaded = records.clone();
        if let Some(limit) = limit {
            loaded.truncate(limit);
        }
        Ok(loaded)
    }

    fn save_features(&self, corpus: &[TextRecord], feature: Option<&str>) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        *records = corpus.to_vec();
        log::debug!(
            "stored {} records in memory (feature: {feature:?})",
            corpus.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_and_limit() {
        let storage = MemoryStorage::new(vec![
            TextRecord::new("a"),
            TextRecord::new("b"),
            TextRecord::new("c"),
        ]);
        assert_eq!(storage.load(None).unwrap().len(), 3);
        assert_eq!(storage.load(Some(2)).unwrap().len(), 2);
    }

    #[test]
    fn test_save_replaces_snapshot() {
        let storage = MemoryStorage::new(vec![TextRecord::new("old")]);
        let mut updated = TextRecord::new("old");
        updated.set_feature("negation", 1.0);

        storage.save_features(&[updated], None).unwrap();

        let snapshot = storage.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].feature("negation"), Some(1.0));
    }
}
