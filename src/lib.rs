// PHP Code Scanner - structural metadata extraction with change-gated persistence
//
// Parses PHP sources with tree-sitter, extracts namespaces, imports, classes
// (with methods, properties and constants) and functions, and upserts one
// document per file into a document store, skipping files whose content
// fingerprint is already stored.

pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod persist;
pub mod scanner;
pub mod store;
pub mod utils;

pub use config::ScannerConfig;
pub use document::{normalize, DocumentBody, FileDocument};
pub use error::{ConfigError, ParseError, StoreError};
pub use extractors::{extract_declarations, PhpParser, RawDeclaration, SourceParser};
pub use persist::{content_fingerprint, ChangeGatedPersister, PersistOutcome};
pub use scanner::{CodeScanner, FileOutcome, ScanSummary};
pub use store::{DocumentStore, JsonFileStore, MemoryStore, UpsertOutcome};
