use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration for document discovery
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Glob pattern, relative to the input directory, selecting documents
    pub pattern: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            // WHY: only files directly inside the input directory are documents,
            // so an output directory nested under it is never picked up
            pattern: "*.txt".to_string(),
        }
    }
}

/// A document found in the input directory and the notes that belong to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDocument {
    pub path: PathBuf,
    /// Sidecar with the document's notes, `None` when there is none
    pub notes_path: Option<PathBuf>,
}

impl DiscoveredDocument {
    /// File stem used to name outputs and stats entries
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Notes sidecar path for a document: `<stem>.notes.json` next to it
pub fn notes_sidecar_path(document_path: &Path) -> PathBuf {
    let mut notes_path = document_path.to_path_buf();
    let file_stem = notes_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();
    notes_path.set_file_name(format!("{file_stem}.notes.json"));
    notes_path
}

/// Find every document matching the configured pattern, sorted by path
///
/// Any path that cannot be read or inspected fails the whole discovery.
pub async fn discover_documents(
    root_dir: impl AsRef<Path>,
    config: &DiscoveryConfig,
) -> Result<Vec<DiscoveredDocument>> {
    let root_dir = root_dir.as_ref();
    // WHY: directory names may contain glob metacharacters such as `[`
    let escaped_root = glob::Pattern::escape(&root_dir.to_string_lossy());
    let pattern = Path::new(&escaped_root).join(&config.pattern);
    let pattern = pattern.to_string_lossy();
    debug!("Starting document discovery with pattern: {}", pattern);

    let matches: Vec<PathBuf> = glob(&pattern)
        .with_context(|| format!("Invalid discovery pattern: {pattern}"))?
        .collect::<Result<_, _>>()
        .context("Glob iteration error")?;

    let mut paths = Vec::with_capacity(matches.len());
    for path in matches {
        let metadata = fs::metadata(&path)
            .await
            .with_context(|| format!("Cannot access file {}", path.display()))?;
        if metadata.is_file() {
            paths.push(path);
        } else {
            debug!("Skipping non-file match: {}", path.display());
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let sidecar = notes_sidecar_path(&path);
        let has_notes = fs::try_exists(&sidecar)
            .await
            .with_context(|| format!("Cannot access notes file {}", sidecar.display()))?;
        debug!(document = %path.display(), has_notes, "Found document");
        documents.push(DiscoveredDocument {
            path,
            notes_path: has_notes.then_some(sidecar),
        });
    }

    let with_notes = documents.iter().filter(|d| d.notes_path.is_some()).count();
    info!(
        "Document discovery completed: {} documents, {} with notes",
        documents.len(),
        with_notes
    );

    Ok(documents)
}
