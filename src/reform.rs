use crate::classifier::Classifier;
use crate::document::{Document, Note};

/// Everything one document resolution reads, passed explicitly to each step
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    pub classifier: &'a Classifier,
    pub document: &'a Document,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(classifier: &'a Classifier, document: &'a Document) -> Self {
        Self { classifier, document }
    }
}

/// A substitution made in the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Char offset where the replaced word started
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub modern: String,
}

/// Why a note produced the fragment it did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Title,
    Invalid,
    NotArchaic,
    Unresolved,
    Replaced,
}

/// Output of one note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reformed<'d> {
    pub fragment: std::borrow::Cow<'d, str>,
    pub char_walker: usize,
    pub decision: Decision,
    pub replacement: Option<Replacement>,
}

/// Char offset where the spanned word begins
///
/// Scans from the later of the note start and `prev_end`, skipping whitespace
/// and shad marks. Falls back to the note end when nothing else is found.
pub fn default_word_start_index(document: &Document, note: &Note, prev_end: usize) -> usize {
    let end = note.span.end.min(document.char_len());
    let from = note.span.start.max(prev_end).min(end);
    let skipped = document
        .slice(from, end)
        .chars()
        .take_while(|ch| ch.is_whitespace() || *ch == '\u{0F0D}')
        .count();
    from + skipped
}

/// Produce the output fragment for one note
///
/// Text before the cursor was already emitted. The fragment covers
/// `[char_walker, note.end)`, with the spanned word swapped for its modern form
/// when the note is an archaic case that resolves. The returned cursor is the
/// note end, clamped so it never moves backwards or past the document.
pub fn reform<'d>(
    ctx: &ResolutionContext<'d>,
    note: &Note,
    char_walker: usize,
    prev_end: usize,
) -> Reformed<'d> {
    let document = ctx.document;
    let end = note.span.end.min(document.char_len()).max(char_walker);

    let verbatim = |decision| Reformed {
        fragment: document.slice(char_walker, end).into(),
        char_walker: end,
        decision,
        replacement: None,
    };

    if note.is_title() {
        return verbatim(Decision::Title);
    }
    if !note.is_valid(document, prev_end.max(char_walker)) {
        return verbatim(Decision::Invalid);
    }
    if !ctx.classifier.is_archaic_case(&note.alt_options) {
        return verbatim(Decision::NotArchaic);
    }

    let Some(modern) = ctx.classifier.get_modern_word(&note.alt_options) else {
        return verbatim(Decision::Unresolved);
    };

    let word_start = default_word_start_index(document, note, prev_end).max(char_walker);
    let mut fragment = String::with_capacity(document.slice(char_walker, word_start).len() + modern.len());
    fragment.push_str(document.slice(char_walker, word_start));
    fragment.push_str(modern);

    Reformed {
        fragment: fragment.into(),
        char_walker: end,
        decision: Decision::Replaced,
        replacement: Some(Replacement {
            start: word_start,
            end,
            original: document.slice(word_start, end).to_string(),
            modern: modern.to_string(),
        }),
    }
}
