// Document store persisted to a single JSON file

use super::memory::{MemoryStore, Record};
use super::{DocumentStore, UpsertOutcome};
use crate::document::FileDocument;
use crate::error::StoreError;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// [`MemoryStore`] backed by a JSON array of records on disk
///
/// The file is read once on open. Upserts only change memory; the file is
/// rewritten by [`DocumentStore::flush`] (and on drop) when a record changed
/// since the last flush. Writes go to a sibling temp file which is then
/// renamed over the store file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
    dirty: bool,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file starts an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                MemoryStore::new()
            } else {
                let records: Vec<Record> = serde_json::from_str(&text)?;
                MemoryStore::from_records(records)?
            }
        } else {
            MemoryStore::new()
        };

        info!(
            "Opened document store {} ({} records)",
            path.display(),
            inner.len()
        );
        Ok(Self {
            path,
            inner,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &MemoryStore {
        &self.inner
    }

    /// True when some upsert has not been flushed yet
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn write_file(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let records: Vec<&Record> = self.inner.records().collect();
        let temp_path = self.path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(fs::File::create(&temp_path)?);
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writer.flush()?;
        }
        fs::rename(&temp_path, &self.path)?;

        debug!("Flushed {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn find_by_fingerprint(
        &self,
        file_name: &str,
        file_hash: &str,
    ) -> Result<Option<FileDocument>, StoreError> {
        self.inner.find_by_fingerprint(file_name, file_hash)
    }

    fn upsert(&mut self, document: &FileDocument) -> Result<UpsertOutcome, StoreError> {
        let outcome = self.inner.upsert(document)?;
        if outcome.is_write() {
            self.dirty = true;
        }
        Ok(outcome)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }
        self.write_file()?;
        self.dirty = false;
        Ok(())
    }
}

impl Drop for JsonFileStore {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            error!("Failed to flush store {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentBody;
    use chrono::Utc;
    use tempfile::TempDir;

    fn document(file_name: &str, file_hash: &str) -> FileDocument {
        FileDocument::new(file_name, DocumentBody::default(), file_hash, Utc::now())
    }

    #[test]
    fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("files.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(
            store.upsert(&document("src/A.php", "h1")).unwrap(),
            UpsertOutcome::Created
        );
        store.flush().unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.records().len(), 1);
        assert!(reopened
            .find_by_fingerprint("src/A.php", "h1")
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_upserts_are_buffered_until_flush() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("files.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        for i in 0..50 {
            store
                .upsert(&document(&format!("src/F{}.php", i), "h"))
                .unwrap();
        }
        assert!(store.is_dirty());
        assert!(!path.exists());

        store.flush().unwrap();
        assert!(!store.is_dirty());
        assert_eq!(JsonFileStore::open(&path).unwrap().records().len(), 50);
    }

    #[test]
    fn test_drop_flushes_pending_writes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("files.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.upsert(&document("a.php", "h1")).unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert!(reopened.find_by_fingerprint("a.php", "h1").unwrap().is_some());
    }

    #[test]
    fn test_noop_upsert_does_not_rewrite_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("files.json");
        let doc = document("a.php", "h1");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.upsert(&doc).unwrap();
        store.flush().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(store.upsert(&doc).unwrap(), UpsertOutcome::NoOp);
        store.flush().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_store_file_is_an_encoding_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("files.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Encoding(_))
        ));
    }
}
