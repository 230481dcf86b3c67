// WHY: reference lists come from static files; a missing or malformed list must
// stop the run before any document is written

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::classifier::Lexicon;
use crate::word_index::WordList;

/// Parse word list content
///
/// `.json` files hold a JSON array of strings. Anything else is one word per
/// line, ignoring blank lines and `#` comments. Entries are trimmed.
pub fn parse_word_list(content: &str, path: &Path) -> Result<Vec<String>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let words: Vec<String> = if is_json {
        let raw: Vec<String> = serde_json::from_str(content)
            .with_context(|| format!("Invalid JSON word list: {}", path.display()))?;
        raw.into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect()
    } else {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect()
    };

    Ok(words)
}

/// Read and parse a word list file
pub async fn read_words(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read word list {}", path.display()))?;
    let words = parse_word_list(&content, path)?;
    debug!("Read {} entries from {}", words.len(), path.display());
    Ok(words)
}

/// Load one reference list, sorted by leading-character rank
pub async fn load_word_list(path: &Path) -> Result<WordList> {
    Ok(WordList::new(read_words(path).await?))
}

/// Load the archaic and modern reference lists
pub async fn load_lexicon(archaic_path: &Path, modern_path: &Path) -> Result<Lexicon> {
    let (archaic, modern) = futures::try_join!(
        load_word_list(archaic_path),
        load_word_list(modern_path)
    )?;

    info!(
        archaic_words = archaic.len(),
        modern_words = modern.len(),
        "Reference word lists loaded"
    );

    Ok(Lexicon::new(archaic, modern))
}
