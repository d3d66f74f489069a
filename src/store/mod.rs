//! Document persistence
//!
//! A store holds one record per source file, keyed by `file_name`. Records are
//! schema-less JSON objects so fields written by other tools survive an upsert.
//!
//! - `memory.rs`: in-process store with upsert/merge semantics
//! - `json_file.rs`: the memory store persisted to a JSON file on flush

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::{MemoryStore, Record};

use crate::document::FileDocument;
use crate::error::StoreError;

/// What an upsert did to the stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record had this `file_name`
    Created,
    /// An existing record changed
    Modified,
    /// The existing record already held identical values
    NoOp,
}

impl UpsertOutcome {
    pub fn is_write(&self) -> bool {
        matches!(self, UpsertOutcome::Created | UpsertOutcome::Modified)
    }
}

pub trait DocumentStore {
    /// Fetch the record matching both `file_name` and `file_hash` exactly
    fn find_by_fingerprint(
        &self,
        file_name: &str,
        file_hash: &str,
    ) -> Result<Option<FileDocument>, StoreError>;

    /// Insert the document, or merge its fields into the record with the same `file_name`
    fn upsert(&mut self, document: &FileDocument) -> Result<UpsertOutcome, StoreError>;

    /// Make buffered writes durable; stores without buffering have nothing to do
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}
