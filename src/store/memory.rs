// In-memory document store

use super::{DocumentStore, UpsertOutcome};
use crate::document::FileDocument;
use crate::error::StoreError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

pub type Record = Map<String, Value>;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: BTreeMap<String, Record>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records; records without a string `file_name` are rejected
    pub fn from_records(records: Vec<Record>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for record in records {
            let key = record_key(&record)?.to_string();
            store.records.insert(key, record);
        }
        Ok(store)
    }

    pub fn get(&self, file_name: &str) -> Option<&Record> {
        self.records.get(file_name)
    }

    /// Records in `file_name` order
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of upserts that created or modified a record
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Insert a record as-is, replacing any record with the same `file_name`
    pub fn insert_record(&mut self, record: Record) -> Result<(), StoreError> {
        let key = record_key(&record)?.to_string();
        self.records.insert(key, record);
        Ok(())
    }
}

fn record_key(record: &Record) -> Result<&str, StoreError> {
    record
        .get("file_name")
        .and_then(Value::as_str)
        .ok_or_else(|| StoreError::Rejected("record has no string file_name".to_string()))
}

impl DocumentStore for MemoryStore {
    fn find_by_fingerprint(
        &self,
        file_name: &str,
        file_hash: &str,
    ) -> Result<Option<FileDocument>, StoreError> {
        let Some(record) = self.records.get(file_name) else {
            return Ok(None);
        };
        if record.get("file_hash").and_then(Value::as_str) != Some(file_hash) {
            return Ok(None);
        }
        let document = serde_json::from_value(Value::Object(record.clone()))?;
        Ok(Some(document))
    }

    fn upsert(&mut self, document: &FileDocument) -> Result<UpsertOutcome, StoreError> {
        let fields = match serde_json::to_value(document)? {
            Value::Object(fields) => fields,
            other => {
                return Err(StoreError::Rejected(format!(
                    "document must encode to an object, got {}",
                    other
                )))
            }
        };

        let outcome = match self.records.get_mut(&document.file_name) {
            None => {
                self.records.insert(document.file_name.clone(), fields);
                UpsertOutcome::Created
            }
            Some(existing) => {
                let mut changed = false;
                for (key, value) in fields {
                    if existing.get(&key) != Some(&value) {
                        existing.insert(key, value);
                        changed = true;
                    }
                }
                if changed {
                    UpsertOutcome::Modified
                } else {
                    UpsertOutcome::NoOp
                }
            }
        };

        if outcome.is_write() {
            self.writes += 1;
        }
        debug!("Upsert {}: {:?}", document.file_name, outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentBody;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn document(file_name: &str, file_hash: &str) -> FileDocument {
        let updated = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        FileDocument::new(file_name, DocumentBody::default(), file_hash, updated)
    }

    #[test]
    fn test_upsert_reports_created_modified_and_noop() {
        let mut store = MemoryStore::new();
        let first = document("a.php", "h1");

        assert_eq!(store.upsert(&first).unwrap(), UpsertOutcome::Created);
        assert_eq!(store.upsert(&first).unwrap(), UpsertOutcome::NoOp);
        assert_eq!(
            store.upsert(&document("a.php", "h2")).unwrap(),
            UpsertOutcome::Modified
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_find_requires_both_name_and_hash() {
        let mut store = MemoryStore::new();
        store.upsert(&document("a.php", "h1")).unwrap();

        assert!(store.find_by_fingerprint("a.php", "h1").unwrap().is_some());
        assert!(store.find_by_fingerprint("a.php", "h2").unwrap().is_none());
        assert!(store.find_by_fingerprint("b.php", "h1").unwrap().is_none());
    }

    #[test]
    fn test_upsert_preserves_unrelated_fields() {
        let mut store = MemoryStore::new();
        let record = json!({
            "file_name": "a.php",
            "file_hash": "old",
            "reviewed_by": "alice",
        });
        if let Value::Object(record) = record {
            store.insert_record(record).unwrap();
        }

        assert_eq!(
            store.upsert(&document("a.php", "new")).unwrap(),
            UpsertOutcome::Modified
        );
        let stored = store.get("a.php").unwrap();
        assert_eq!(stored["file_hash"], "new");
        assert_eq!(stored["reviewed_by"], "alice");
        assert!(stored.contains_key("classes"));
    }

    #[test]
    fn test_records_without_file_name_are_rejected() {
        let result = MemoryStore::from_records(vec![Map::new()]);
        assert!(matches!(result, Err(StoreError::Rejected(_))));
    }
}
