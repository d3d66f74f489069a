//! Scan orchestration
//!
//! Discovers files up front, then runs each one through the pipeline
//! (read → fingerprint → parse → extract → normalize → upsert) strictly in
//! order. Nothing that goes wrong with a single file stops the scan.

use crate::config::ScannerConfig;
use crate::discovery::discover_files;
use crate::document::{normalize, DocumentBody, FileDocument};
use crate::error::ParseError;
use anyhow::Result;
use crate::extractors::{extract_declarations, PhpParser, SourceParser};
use crate::persist::{ChangeGatedPersister, PersistOutcome};
use crate::store::DocumentStore;
use crate::utils::file_utils::read_file_bytes;
use crate::utils::paths::relative_file_name;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// What happened to one file during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Persisted(PersistOutcome),
    /// The file could not be read
    Unreadable,
}

/// Per-scan counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub created: usize,
    pub modified: usize,
    pub unchanged: usize,
    pub no_op: usize,
    pub failed: usize,
    pub unreadable: usize,
    /// Files stored with an empty document because they did not parse
    pub parse_errors: usize,
}

impl ScanSummary {
    pub fn written(&self) -> usize {
        self.created + self.modified
    }

    fn record(&mut self, outcome: FileOutcome) {
        self.files += 1;
        match outcome {
            FileOutcome::Persisted(PersistOutcome::Created) => self.created += 1,
            FileOutcome::Persisted(PersistOutcome::Modified) => self.modified += 1,
            FileOutcome::Persisted(PersistOutcome::Unchanged) => self.unchanged += 1,
            FileOutcome::Persisted(PersistOutcome::NoOp) => self.no_op += 1,
            FileOutcome::Persisted(PersistOutcome::Failed) => self.failed += 1,
            FileOutcome::Unreadable => self.unreadable += 1,
        }
    }
}

/// Parse and extract one file's document body
pub fn build_document_body<P: SourceParser>(
    parser: &mut P,
    content: &str,
) -> std::result::Result<DocumentBody, ParseError> {
    let tree = parser.parse(content)?;
    Ok(normalize(extract_declarations(&tree, content)))
}

pub struct CodeScanner<S, P = PhpParser> {
    parser: P,
    persister: ChangeGatedPersister<S>,
    base_directory: String,
}

impl<S: DocumentStore> CodeScanner<S, PhpParser> {
    pub fn new(store: S) -> Result<Self> {
        Ok(Self::with_parser(PhpParser::new()?, store))
    }
}

impl<S: DocumentStore, P: SourceParser> CodeScanner<S, P> {
    pub fn with_parser(parser: P, store: S) -> Self {
        Self {
            parser,
            persister: ChangeGatedPersister::new(store),
            base_directory: String::new(),
        }
    }

    /// Prefix stripped from absolute paths to form document keys
    pub fn with_base_directory(mut self, base_directory: impl Into<String>) -> Self {
        self.base_directory = base_directory.into();
        self
    }

    /// Register the handler called with each created or modified document
    pub fn on_success<F>(&mut self, handler: F)
    where
        F: FnMut(&FileDocument) + 'static,
    {
        self.persister.on_success(handler);
    }

    pub fn store(&self) -> &S {
        self.persister.store()
    }

    pub fn into_store(self) -> S {
        self.persister.into_store()
    }

    /// Discover `.php` files under `root` and process each one
    pub fn scan_all(&mut self, root: &Path, excluded: &[String]) -> Result<ScanSummary> {
        self.scan_with(root, excluded, &["php".to_string()], |_| {}, |_, _| {})
    }

    /// Scan using a loaded configuration
    ///
    /// `on_discovered` sees the full file list before processing starts;
    /// `on_file` is called after each file with its outcome.
    pub fn scan<D, F>(
        &mut self,
        config: &ScannerConfig,
        on_discovered: D,
        on_file: F,
    ) -> Result<ScanSummary>
    where
        D: FnOnce(&[PathBuf]),
        F: FnMut(&Path, FileOutcome),
    {
        self.scan_with(
            &config.directory,
            &config.excluded_directories,
            &config.extensions,
            on_discovered,
            on_file,
        )
    }

    fn scan_with<D, F>(
        &mut self,
        root: &Path,
        excluded: &[String],
        extensions: &[String],
        on_discovered: D,
        on_file: F,
    ) -> Result<ScanSummary>
    where
        D: FnOnce(&[PathBuf]),
        F: FnMut(&Path, FileOutcome),
    {
        info!("Starting code scan: {}", root.display());
        let files = discover_files(root, excluded, extensions)?;
        info!("Found {} PHP files.", files.len());
        on_discovered(&files);

        let summary = self.scan_files(&files, on_file);
        info!("Code scan completed.");
        Ok(summary)
    }

    /// Process `files` in order, reporting each outcome to `on_file`
    ///
    /// The store is flushed once after the last file.
    pub fn scan_files<F>(&mut self, files: &[PathBuf], mut on_file: F) -> ScanSummary
    where
        F: FnMut(&Path, FileOutcome),
    {
        let mut summary = ScanSummary::default();
        for path in files {
            let (outcome, parsed) = self.process_file(path);
            if !parsed {
                summary.parse_errors += 1;
            }
            summary.record(outcome);
            on_file(path, outcome);
        }

        if let Err(e) = self.persister.flush() {
            error!("Failed to flush document store: {}", e);
        }
        summary
    }

    /// Run one file through the pipeline; the flag is false when the file failed to parse
    fn process_file(&mut self, path: &Path) -> (FileOutcome, bool) {
        let content = match read_file_bytes(path) {
            Ok(content) => content,
            Err(e) => {
                error!("{:#}", e);
                return (FileOutcome::Unreadable, true);
            }
        };

        let file_name = relative_file_name(path, &self.base_directory);
        let parser = &mut self.parser;
        let mut parsed = true;

        let outcome = self.persister.persist(&file_name, &content, |text| {
            match build_document_body(parser, text) {
                Ok(body) => body,
                Err(e) => {
                    error!("Parse error in file {}: {}", path.display(), e);
                    parsed = false;
                    DocumentBody::default()
                }
            }
        });

        (FileOutcome::Persisted(outcome), parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{JsonFileStore, MemoryStore};
    use std::cell::RefCell;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    const SCENARIO: &str = include_str!("../test_samples/scenario.php");
    const INVALID: &str = include_str!("../test_samples/invalid.php");

    struct Workspace {
        _temp_dir: TempDir,
        root: PathBuf,
    }

    impl Workspace {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path().canonicalize().unwrap();
            Self {
                _temp_dir: temp_dir,
                root,
            }
        }

        fn write(&self, relative: &str, content: &str) -> PathBuf {
            let path = self.root.join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            path
        }

        fn base(&self) -> String {
            self.root.to_string_lossy().to_string()
        }
    }

    fn counting_scanner(workspace: &Workspace) -> (CodeScanner<MemoryStore>, Rc<RefCell<Vec<String>>>) {
        let mut scanner = CodeScanner::new(MemoryStore::new())
            .unwrap()
            .with_base_directory(workspace.base());
        let saved = Rc::new(RefCell::new(Vec::new()));
        let sink = saved.clone();
        scanner.on_success(move |doc| sink.borrow_mut().push(doc.file_name.clone()));
        (scanner, saved)
    }

    #[test]
    fn test_scenario_file_is_stored_under_relative_name() {
        let workspace = Workspace::new();
        workspace.write("src/C.php", SCENARIO);
        let (mut scanner, saved) = counting_scanner(&workspace);

        let summary = scanner.scan_all(&workspace.root, &[]).unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(*saved.borrow(), vec!["src/C.php"]);

        let record = scanner.store().get("src/C.php").unwrap();
        assert_eq!(record["namespace"], "Foo");
        assert_eq!(record["uses"][0], "Bar\\Baz");
        assert_eq!(record["classes"][0]["name"], "C");
        assert_eq!(record["classes"][0]["constants"][0]["value"], 1);
        assert_eq!(record["functions"][0]["parameters"][0]["name"], "p");
        assert!(record.contains_key("last_updated"));
    }

    #[test]
    fn test_second_scan_of_unchanged_files_writes_nothing() {
        let workspace = Workspace::new();
        workspace.write("a.php", SCENARIO);
        workspace.write("b.php", "<?php\nfunction b() {}\n");
        let (mut scanner, saved) = counting_scanner(&workspace);

        let first = scanner.scan_all(&workspace.root, &[]).unwrap();
        assert_eq!(first.written(), 2);

        let second = scanner.scan_all(&workspace.root, &[]).unwrap();
        assert_eq!(second.unchanged, 2);
        assert_eq!(second.written(), 0);
        assert_eq!(saved.borrow().len(), 2);
        assert_eq!(scanner.store().write_count(), 2);
    }

    #[test]
    fn test_changed_then_reverted_byte_forces_two_writes() {
        let workspace = Workspace::new();
        let path = workspace.write("a.php", "<?php\nconst X = 1;\n");
        let (mut scanner, saved) = counting_scanner(&workspace);

        scanner.scan_all(&workspace.root, &[]).unwrap();
        let original_hash = scanner.store().get("a.php").unwrap()["file_hash"].clone();

        fs::write(&path, "<?php\nconst X = 2;\n").unwrap();
        let changed = scanner.scan_all(&workspace.root, &[]).unwrap();
        assert_eq!(changed.modified, 1);
        assert_ne!(scanner.store().get("a.php").unwrap()["file_hash"], original_hash);

        fs::write(&path, "<?php\nconst X = 1;\n").unwrap();
        let reverted = scanner.scan_all(&workspace.root, &[]).unwrap();
        assert_eq!(reverted.modified, 1);
        assert_eq!(scanner.store().get("a.php").unwrap()["file_hash"], original_hash);

        assert_eq!(saved.borrow().len(), 3);
    }

    #[test]
    fn test_invalid_file_does_not_stop_the_scan() {
        let workspace = Workspace::new();
        workspace.write("a_broken.php", INVALID);
        workspace.write("b_good.php", SCENARIO);
        let (mut scanner, _saved) = counting_scanner(&workspace);

        let mut seen = Vec::new();
        let files = discover_files(&workspace.root, &[], &["php".to_string()]).unwrap();
        let summary = scanner.scan_files(&files, |path, _| {
            seen.push(path.file_name().unwrap().to_string_lossy().to_string())
        });

        assert_eq!(seen, vec!["a_broken.php", "b_good.php"]);
        assert_eq!(summary.parse_errors, 1);
        assert_eq!(summary.created, 2);

        let broken = scanner.store().get("a_broken.php").unwrap();
        assert!(broken["classes"].as_array().unwrap().is_empty());
        assert!(broken["namespace"].is_null());
        let good = scanner.store().get("b_good.php").unwrap();
        assert_eq!(good["classes"][0]["name"], "C");
    }

    #[test]
    fn test_excluded_paths_are_not_scanned() {
        let workspace = Workspace::new();
        workspace.write("src/a.php", SCENARIO);
        workspace.write("vendor/lib/b.php", SCENARIO);
        let (mut scanner, _saved) = counting_scanner(&workspace);

        let summary = scanner
            .scan_all(&workspace.root, &["vendor".to_string()])
            .unwrap();
        assert_eq!(summary.files, 1);
        assert!(scanner.store().get("vendor/lib/b.php").is_none());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let workspace = Workspace::new();
        let (mut scanner, _saved) = counting_scanner(&workspace);
        assert!(scanner.scan_all(&workspace.root.join("gone"), &[]).is_err());
    }

    #[test]
    fn test_scan_uses_configured_extensions() {
        let workspace = Workspace::new();
        workspace.write("a.php", SCENARIO);
        workspace.write("b.inc", "<?php\nfunction b() {}\n");
        let (mut scanner, _saved) = counting_scanner(&workspace);

        let config = ScannerConfig {
            directory: workspace.root.clone(),
            extensions: vec!["php".to_string(), "inc".to_string()],
            ..ScannerConfig::default()
        };
        let mut discovered = 0;
        let mut processed = 0;
        let summary = scanner
            .scan(&config, |files| discovered = files.len(), |_, _| processed += 1)
            .unwrap();
        assert_eq!(discovered, 2);
        assert_eq!(processed, 2);
        assert_eq!(summary.created, 2);
        assert!(scanner.store().get("b.inc").is_some());
    }

    #[test]
    fn test_json_store_is_flushed_after_a_scan() {
        let workspace = Workspace::new();
        workspace.write("src/a.php", SCENARIO);
        workspace.write("src/b.php", "<?php\nfunction b() {}\n");
        let store_path = workspace.root.join("store").join("files.json");

        let store = JsonFileStore::open(&store_path).unwrap();
        let mut scanner = CodeScanner::new(store)
            .unwrap()
            .with_base_directory(workspace.base());
        let summary = scanner
            .scan_all(&workspace.root.join("src"), &[])
            .unwrap();
        assert_eq!(summary.created, 2);

        // Still open: the records must already be on disk
        assert!(!scanner.store().is_dirty());
        let on_disk = JsonFileStore::open(&store_path).unwrap();
        assert_eq!(on_disk.records().len(), 2);
        assert!(on_disk.records().get("src/a.php").is_some());
    }
}
