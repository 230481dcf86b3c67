pub mod alphabet;
pub mod normalizer;
pub mod word_index;
pub mod classifier;
pub mod document;
pub mod reform;
pub mod rebuild;
pub mod reference;
pub mod discovery;
pub mod parallel_processing;

// Re-export main types for convenient access
pub use classifier::{Classifier, Lexicon, ModernWordPolicy};
pub use document::{Document, Note, NoteKind, NoteSpan};
pub use normalizer::{AffixTokenizer, Normalizer, PartOfSpeech, Token, Tokenizer};
pub use rebuild::{rebuild, RebuildOutcome, RebuildStats};
pub use reform::{reform, ResolutionContext};
pub use word_index::WordList;

// Re-export batch processing types and functions for the CLI and benchmarks
pub use parallel_processing::{
    BatchConfig, FileStats, RunStats,
    process_documents_parallel, write_run_stats
};

/// Resolve archaic words in `text` against an already-built classifier
pub fn resolve_archaics(classifier: &Classifier, text: &str, notes: &[Note]) -> String {
    let document = Document::new(text);
    let ctx = ResolutionContext::new(classifier, &document);
    rebuild(&ctx, notes).text
}
