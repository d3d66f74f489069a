use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use php_scanner::config::{ConfigOverrides, ScannerConfig};
use php_scanner::logging::init_logging;
use php_scanner::{CodeScanner, JsonFileStore};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(author, version, about = "Extract PHP structure into a document store", long_about = None)]
struct Cli {
    /// Config file (TOML or JSON)
    #[arg(short, long, value_name = "FILE", default_value = "php-scanner.toml")]
    config: PathBuf,

    /// File or directory to scan
    #[arg(short, long, value_name = "PATH")]
    directory: Option<PathBuf>,

    /// Skip paths containing this substring (repeatable)
    #[arg(short, long, value_name = "SUBSTRING")]
    exclude: Vec<String>,

    /// Prefix stripped from absolute paths to form stored file names
    #[arg(short, long, value_name = "PREFIX")]
    base_dir: Option<String>,

    /// JSON file backing the document store
    #[arg(short, long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    let config = ScannerConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?
        .merge_overrides(ConfigOverrides {
            directory: cli.directory,
            excluded_directories: cli.exclude,
            base_directory: cli.base_dir,
            store_path: cli.store,
        });

    let store = JsonFileStore::open(&config.store_path)
        .with_context(|| format!("Failed to open store {}", config.store_path.display()))?;
    let store_path = store.path().to_path_buf();
    let mut scanner =
        CodeScanner::new(store)?.with_base_directory(config.base_directory.clone());
    scanner.on_success(|document| {
        debug!(
            "{}: {} classes, {} functions",
            document.file_name,
            document.body.classes.len(),
            document.body.functions.len()
        )
    });

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?,
    );

    println!("Starting code scan...");
    let summary = scanner
        .scan(
            &config,
            |files| {
                progress.println(format!("Found {} PHP files.", files.len()));
                progress.set_length(files.len() as u64);
            },
            |path, _| {
                progress.set_message(
                    path.file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                );
                progress.inc(1);
            },
        )
        .with_context(|| format!("Failed to scan {}", config.directory.display()))?;
    progress.finish_and_clear();

    println!("Scan completed.");
    println!(
        "  written: {} ({} new, {} modified)",
        summary.written(),
        summary.created,
        summary.modified
    );
    println!("  unchanged: {}", summary.unchanged + summary.no_op);
    println!("  store: {}", store_path.display());
    println!(
        "  failed: {} (store), {} (unreadable), {} (parse errors)",
        summary.failed, summary.unreadable, summary.parse_errors
    );

    Ok(())
}
