/// symbol-outline: print the function/class outline of source files
///
/// Paths may be files or directories. With `--watch` the outline of every
/// changed file is printed again once its edits settle.
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use outline::cli::{discover_files, load_document, outline_file, OutputFormat, OutputWriter};
use outline::watcher::filtering::build_ignore_patterns;
use outline::watcher::{FileChangeType, FileWatcher};
use outline::{DocumentOutline, OutlineConfig, RefreshSignal};

#[derive(Parser)]
#[command(name = "symbol-outline")]
#[command(about = "Cached function/class outline for PHP, JS/TS (Vue, Svelte) and Python", long_about = None)]
#[command(version)]
struct Cli {
    /// Files or directories to outline
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only list symbols whose name matches this regex
    #[arg(short, long)]
    filter: Option<String>,

    /// Deepest Python def nesting to list (0 = top level only)
    #[arg(long)]
    python_max_depth: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Keep running and re-print outlines of changed files
    #[arg(short, long)]
    watch: bool,
}

impl Cli {
    fn outline_config(&self) -> Result<OutlineConfig> {
        let mut config = match &self.config {
            Some(path) => OutlineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => OutlineConfig::default(),
        };
        if let Some(filter) = &self.filter {
            config.filter_regex = filter.clone();
        }
        if let Some(depth) = self.python_max_depth {
            config.python_max_depth = depth;
        }
        Ok(config.clamped())
    }

    fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("outline=info,symbol_outline=info"))
        .context("Invalid log filter")?;

    // stdout carries the outline, logs go to stderr
    let (non_blocking_stderr, _stderr_guard) = non_blocking(std::io::stderr());
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking_stderr)
                .with_target(false)
                .with_ansi(false),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.outline_config()?;
    debug!("Effective settings: {:?}", config);

    let roots: Vec<PathBuf> = cli
        .paths
        .iter()
        .map(|path| {
            path.canonicalize()
                .with_context(|| format!("Path not found: {}", path.display()))
        })
        .collect::<Result<_>>()?;

    let (mut outline, refresh_rx) = DocumentOutline::new(config);
    let extensions = outline.registry().supported_extensions();
    let ignore_patterns = build_ignore_patterns()?;

    let mut writer = OutputWriter::new(cli.output_format());
    for path in discover_files(&roots, &extensions, &ignore_patterns) {
        match outline_file(&mut outline, &path) {
            Ok(file) => writer.write_file(file)?,
            Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
        }
    }
    writer.flush()?;

    if cli.watch {
        watch(&roots, outline, refresh_rx, &mut writer).await?;
    }

    Ok(())
}

async fn watch(
    roots: &[PathBuf],
    mut outline: DocumentOutline,
    mut refresh_rx: tokio::sync::mpsc::UnboundedReceiver<RefreshSignal>,
    writer: &mut OutputWriter,
) -> Result<()> {
    let root_refs: Vec<&Path> = roots.iter().map(PathBuf::as_path).collect();
    let extensions = outline.registry().supported_extensions();
    let (_watcher, mut changes) = FileWatcher::start(&root_refs, extensions)?;
    info!("Watching for changes, press Ctrl-C to stop");

    loop {
        tokio::select! {
            Some(change) = changes.recv() => {
                let key = change.path.display().to_string();
                match change.change_type {
                    FileChangeType::Deleted => outline.on_document_closed(&key),
                    FileChangeType::Created | FileChangeType::Modified => {
                        match load_document(&change.path) {
                            Ok(document) => outline.on_document_changed(&document),
                            Err(e) => warn!("Could not read changed file: {:#}", e),
                        }
                    }
                }
            }
            Some(signal) = refresh_rx.recv() => match signal {
                RefreshSignal::Reparse { key } => {
                    match outline_file(&mut outline, Path::new(&key)) {
                        Ok(file) => {
                            writer.write_file(file)?;
                            writer.flush()?;
                        }
                        Err(e) => warn!("Skipping {}: {:#}", key, e),
                    }
                }
                RefreshSignal::Repaint { key } => debug!("{} unchanged", key),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Stopping watcher");
                break;
            }
        }
    }

    Ok(())
}
