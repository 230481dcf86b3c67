// WHY: documents share nothing but the read-only classifier, so they resolve
// concurrently; every input is loaded and every output computed before the
// first file is written, which keeps a failing run from leaving partial output

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::classifier::Classifier;
use crate::discovery::DiscoveredDocument;
use crate::document::{spans_are_monotonic, Document, Note};
use crate::rebuild::{rebuild, RebuildStats};
use crate::reform::ResolutionContext;

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory receiving one output file per input document
    pub output_dir: PathBuf,
    /// Maximum number of documents resolved at once
    pub concurrency: usize,
}

impl BatchConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            concurrency: num_cpus::get().max(1),
        }
    }
}

/// A document read from disk together with its notes
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub source: DiscoveredDocument,
    pub document: Document,
    pub notes: Vec<Note>,
}

/// Resolution result for one document
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub source: DiscoveredDocument,
    pub text: String,
    pub stats: RebuildStats,
    pub chars_processed: u64,
    pub processing_time_ms: u64,
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FileStats {
    /// Input file path
    pub path: String,
    /// Output file path
    pub output: String,
    /// Number of characters in the input document
    pub chars_processed: u64,
    #[serde(flatten)]
    pub notes: RebuildStats,
    /// Resolution time in milliseconds
    pub processing_time_ms: u64,
}

/// Statistics for a whole batch run
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    pub files: Vec<FileStats>,
    pub totals: RebuildStats,
    pub total_time_ms: u64,
}

/// Read a document and its notes sidecar
pub async fn load_document(source: &DiscoveredDocument) -> Result<LoadedDocument> {
    let text = fs::read_to_string(&source.path)
        .await
        .with_context(|| format!("Failed to read document {}", source.path.display()))?;

    let notes: Vec<Note> = match &source.notes_path {
        Some(notes_path) => {
            let content = fs::read_to_string(notes_path)
                .await
                .with_context(|| format!("Failed to read notes {}", notes_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid notes file {}", notes_path.display()))?
        }
        None => Vec::new(),
    };

    if !spans_are_monotonic(&notes) {
        // Out-of-order notes are kept verbatim by the span processor
        warn!(
            "Notes in {} overlap or are out of order",
            source.path.display()
        );
    }

    Ok(LoadedDocument {
        source: source.clone(),
        document: Document::new(text),
        notes,
    })
}

/// Load every document, failing on the first one that cannot be read
pub async fn load_documents(sources: &[DiscoveredDocument]) -> Result<Vec<LoadedDocument>> {
    let mut loaded = Vec::with_capacity(sources.len());
    for source in sources {
        loaded.push(load_document(source).await?);
    }
    Ok(loaded)
}

/// Resolve a single loaded document
pub fn resolve_document(classifier: &Classifier, loaded: &LoadedDocument) -> ResolvedDocument {
    let start_time = Instant::now();
    let ctx = ResolutionContext::new(classifier, &loaded.document);
    let outcome = rebuild(&ctx, &loaded.notes);

    debug!(
        document = %loaded.source.path.display(),
        replacements = outcome.stats.replacements,
        "Document resolved"
    );

    ResolvedDocument {
        source: loaded.source.clone(),
        text: outcome.text,
        stats: outcome.stats,
        chars_processed: loaded.document.char_len() as u64,
        processing_time_ms: start_time.elapsed().as_millis() as u64,
    }
}

/// Resolve documents concurrently on the blocking pool
/// Results come back in input order
pub async fn resolve_documents_parallel(
    classifier: Arc<Classifier>,
    loaded: Vec<LoadedDocument>,
    concurrency: usize,
    progress: Option<&ProgressBar>,
) -> Result<Vec<ResolvedDocument>> {
    stream::iter(loaded)
        .map(|document| {
            let classifier = Arc::clone(&classifier);
            tokio::task::spawn_blocking(move || resolve_document(&classifier, &document))
        })
        .buffered(concurrency.max(1))
        .map(|joined| {
            if let Some(progress) = progress {
                progress.inc(1);
            }
            joined.context("Resolution task failed")
        })
        .try_collect()
        .await
}

/// Output location for a document: same file name inside `output_dir`
pub fn output_path(output_dir: &Path, source: &DiscoveredDocument) -> PathBuf {
    match source.path.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(format!("{}.txt", source.stem())),
    }
}

/// Name an output is written under before it is moved into place
fn staging_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    output.with_file_name(name)
}

async fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (staging, _) in staged {
        if let Err(err) = fs::remove_file(staging).await {
            warn!("Failed to remove staged output {}: {}", staging.display(), err);
        }
    }
}

/// Write every resolved document into `output_dir`
///
/// Each text is first written under a `.partial` name; outputs are moved to
/// their final names only after every write succeeded.
pub async fn write_outputs(resolved: &[ResolvedDocument], output_dir: &Path) -> Result<Vec<FileStats>> {
    fs::create_dir_all(output_dir)
        .await
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let mut staged = Vec::with_capacity(resolved.len());
    for document in resolved {
        let output = output_path(output_dir, &document.source);
        let staging = staging_path(&output);
        if let Err(err) = fs::write(&staging, &document.text).await {
            discard_staged(&staged).await;
            return Err(err).with_context(|| format!("Failed to write {}", staging.display()));
        }
        debug!("Staged {}", staging.display());
        staged.push((staging, output));
    }

    let mut file_stats = Vec::with_capacity(resolved.len());
    for (i, (document, (staging, output))) in resolved.iter().zip(&staged).enumerate() {
        if let Err(err) = fs::rename(staging, output).await {
            discard_staged(&staged[i..]).await;
            return Err(err).with_context(|| format!("Failed to move output into {}", output.display()));
        }

        info!(
            "Wrote {}: {} replacements, {} unresolved archaic notes",
            output.display(),
            document.stats.replacements,
            document.stats.unresolved_archaic
        );

        file_stats.push(FileStats {
            path: document.source.path.display().to_string(),
            output: output.display().to_string(),
            chars_processed: document.chars_processed,
            notes: document.stats,
            processing_time_ms: document.processing_time_ms,
        });
    }
    Ok(file_stats)
}

/// Load, resolve and write a batch of documents
pub async fn process_documents_parallel(
    classifier: Arc<Classifier>,
    sources: &[DiscoveredDocument],
    config: &BatchConfig,
    progress: Option<&ProgressBar>,
) -> Result<RunStats> {
    let start_time = Instant::now();

    let loaded = load_documents(sources).await?;
    info!("Loaded {} documents", loaded.len());

    let resolved =
        resolve_documents_parallel(classifier, loaded, config.concurrency, progress).await?;
    let files = write_outputs(&resolved, &config.output_dir).await?;

    let mut totals = RebuildStats::default();
    for file in &files {
        totals.merge(&file.notes);
    }

    Ok(RunStats {
        files,
        totals,
        total_time_ms: start_time.elapsed().as_millis() as u64,
    })
}

/// Write run statistics as pretty JSON
pub async fn write_run_stats(path: &Path, stats: &RunStats) -> Result<()> {
    let content = serde_json::to_string_pretty(stats)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write stats {}", path.display()))?;
    Ok(())
}
