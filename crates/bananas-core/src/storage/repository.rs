use tracing::debug;

use super::{GRADES_KEY, LocalStore};
use crate::error::{Error, Result};
use crate::grade::SubjectRecord;

/// Read-only source of a learner's grade set.
pub trait GradeRepository {
    /// Load the stored grade set in insertion order.
    fn load(&self) -> Result<Vec<SubjectRecord>>;
}

fn parse_grade_set(key: &str, raw: Option<&str>) -> Result<Vec<SubjectRecord>> {
    let raw = raw.ok_or_else(|| Error::storage_read(key, "key not present"))?;
    serde_json::from_str(raw).map_err(|e| Error::storage_read(key, e))
}

/// Repository reading the grade set from a [`LocalStore`].
#[derive(Debug, Clone)]
pub struct StoreRepository {
    store: LocalStore,
    key: String,
}

impl StoreRepository {
    pub fn new(store: LocalStore) -> Self {
        Self::with_key(store, GRADES_KEY)
    }

    pub fn with_key(store: LocalStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl GradeRepository for StoreRepository {
    fn load(&self) -> Result<Vec<SubjectRecord>> {
        debug!("Reading grade set from key {}", self.key);
        parse_grade_set(&self.key, self.store.get(&self.key))
    }
}

/// In-memory repository holding the raw serialized grade set.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    raw: Option<String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[SubjectRecord]) -> Result<Self> {
        Ok(Self {
            raw: Some(serde_json::to_string(records)?),
        })
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl GradeRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<SubjectRecord>> {
        parse_grade_set(GRADES_KEY, self.raw.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_repository_reads_grades_key() {
        let mut store = LocalStore::new();
        store.set(
            GRADES_KEY,
            r#"[{"id":"1","name":"Matematika","scores":[80,90,null,null,null]}]"#,
        );

        let records = StoreRepository::new(store).load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Matematika");
    }

    #[test]
    fn test_missing_key_is_storage_read_error() {
        let repo = StoreRepository::new(LocalStore::new());
        assert!(matches!(repo.load(), Err(Error::StorageRead { .. })));
    }

    #[test]
    fn test_malformed_value_is_storage_read_error() {
        let repo = MemoryRepository::from_raw("{broken");
        assert!(matches!(repo.load(), Err(Error::StorageRead { .. })));
    }

    #[test]
    fn test_memory_repository_preserves_order() {
        let records = vec![
            SubjectRecord::new("b", "Bahasa Indonesia", [None; 5]),
            SubjectRecord::new("a", "Agama", [None; 5]),
        ];
        let repo = MemoryRepository::from_records(&records).unwrap();
        assert_eq!(repo.load().unwrap(), records);
    }

    #[test]
    fn test_custom_key() {
        let mut store = LocalStore::new();
        store.set("other", "[]");
        let repo = StoreRepository::with_key(store, "other");
        assert_eq!(repo.key(), "other");
        assert!(repo.load().unwrap().is_empty());
    }
}
