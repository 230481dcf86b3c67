use serde::{Deserialize, Serialize};

/// Immutable source text addressed by character offsets
///
/// Offsets count Unicode scalar values, matching the offsets produced by the
/// annotation pass. A byte-boundary table makes every slice O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    /// Byte offset of every char, plus `text.len()` as the final entry
    boundaries: Vec<usize>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut boundaries: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of chars in the document
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Text between char offsets `[start, end)`
    /// Offsets past the end are clamped, and an inverted range yields ""
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.char_len());
        let start = start.min(end);
        &self.text[self.boundaries[start]..self.boundaries[end]]
    }

    /// Text from char offset `start` to the end of the document
    pub fn tail(&self, start: usize) -> &str {
        self.slice(start, self.char_len())
    }
}

/// Half-open char interval `[start, end)` over a document
/// Serialized as a two-element array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct NoteSpan {
    pub start: usize,
    pub end: usize,
}

impl NoteSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl From<(usize, usize)> for NoteSpan {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<NoteSpan> for (usize, usize) {
    fn from(span: NoteSpan) -> Self {
        (span.start, span.end)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Notes inside a title are always preserved verbatim
    Title,
    #[default]
    Lexical,
}

/// Annotation marking a candidate word and its alternate spellings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub span: NoteSpan,
    pub alt_options: Vec<String>,
    #[serde(default)]
    pub kind: NoteKind,
}

impl Note {
    pub fn new<I, S>(start: usize, end: usize, alt_options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            span: NoteSpan::new(start, end),
            alt_options: alt_options.into_iter().map(Into::into).collect(),
            kind: NoteKind::Lexical,
        }
    }

    pub fn title<I, S>(start: usize, end: usize, alt_options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: NoteKind::Title,
            ..Self::new(start, end, alt_options)
        }
    }

    pub fn is_title(&self) -> bool {
        self.kind == NoteKind::Title
    }

    /// Whether the note may be resolved at all
    ///
    /// The span must be well formed, inside the document, and start at or after
    /// `prev_end`; there must be at least one option and none may be blank.
    pub fn is_valid(&self, document: &Document, prev_end: usize) -> bool {
        let NoteSpan { start, end } = self.span;
        start <= end
            && end <= document.char_len()
            && start >= prev_end
            && !self.alt_options.is_empty()
            && self.alt_options.iter().all(|option| !option.trim().is_empty())
    }
}

/// Check that every note starts at or after the end of the one before it
pub fn spans_are_monotonic(notes: &[Note]) -> bool {
    notes
        .windows(2)
        .all(|pair| pair[0].span.end <= pair[1].span.start)
}
