//! Change-gated persistence of file documents
//!
//! Each file is fingerprinted before any extraction happens. When the store
//! already holds a record with the same `(file_name, file_hash)` pair the file
//! is skipped; otherwise the document is rebuilt and upserted. Store failures
//! are logged and reported as [`PersistOutcome::Failed`], never raised, so a
//! batch always moves on to the next file.

use crate::document::{DocumentBody, FileDocument};
use crate::error::StoreError;
use crate::store::{DocumentStore, UpsertOutcome};
use chrono::Utc;
use tracing::{debug, error, info, warn};

/// Handler invoked with every document that was created or modified
pub type SuccessObserver = Box<dyn FnMut(&FileDocument)>;

/// Result of persisting one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Stored fingerprint matched; nothing was extracted or written
    Unchanged,
    Created,
    Modified,
    /// Upsert matched an identical record
    NoOp,
    /// The store rejected the write
    Failed,
}

impl PersistOutcome {
    pub fn is_write(&self) -> bool {
        matches!(self, PersistOutcome::Created | PersistOutcome::Modified)
    }
}

impl From<UpsertOutcome> for PersistOutcome {
    fn from(outcome: UpsertOutcome) -> Self {
        match outcome {
            UpsertOutcome::Created => PersistOutcome::Created,
            UpsertOutcome::Modified => PersistOutcome::Modified,
            UpsertOutcome::NoOp => PersistOutcome::NoOp,
        }
    }
}

/// Hex BLAKE3 digest of the raw file bytes
pub fn content_fingerprint(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

pub struct ChangeGatedPersister<S> {
    store: S,
    observer: Option<SuccessObserver>,
}

impl<S: DocumentStore> ChangeGatedPersister<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            observer: None,
        }
    }

    /// Register the success observer, replacing any previous one
    pub fn on_success<F>(&mut self, handler: F)
    where
        F: FnMut(&FileDocument) + 'static,
    {
        self.observer = Some(Box::new(handler));
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Make the store's buffered writes durable
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.store.flush()
    }

    /// Persist one file's document if its content changed
    ///
    /// `build` receives the content as text and is only called when the
    /// fingerprint is not already stored. Bytes that are not valid UTF-8 are
    /// replaced before `build` sees them; valid text passes through untouched.
    pub fn persist<F>(&mut self, file_name: &str, content: &[u8], build: F) -> PersistOutcome
    where
        F: FnOnce(&str) -> DocumentBody,
    {
        let file_hash = content_fingerprint(content);

        match self.store.find_by_fingerprint(file_name, &file_hash) {
            Ok(Some(_)) => {
                debug!("Unchanged file: {}", file_name);
                return PersistOutcome::Unchanged;
            }
            Ok(None) => {}
            Err(e) => warn!("Lookup failed for {}, rebuilding: {}", file_name, e),
        }

        let text = String::from_utf8_lossy(content);
        let body = build(&text);
        let document = FileDocument::new(file_name, body, file_hash, Utc::now());

        match self.store.upsert(&document) {
            Ok(outcome) => {
                let outcome = PersistOutcome::from(outcome);
                if outcome.is_write() {
                    info!("Saved data for file: {}", file_name);
                    if let Some(observer) = self.observer.as_mut() {
                        observer(&document);
                    }
                } else {
                    debug!("Stored record already current: {}", file_name);
                }
                outcome
            }
            Err(e) => {
                error!("Failed to save data for file {}: {}", file_name, e);
                PersistOutcome::Failed
            }
        }
    }
}
