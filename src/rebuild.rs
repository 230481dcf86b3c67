use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Note;
use crate::reform::{reform, Decision, Replacement, ResolutionContext};

/// Per-document counters of how notes were handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebuildStats {
    pub notes_seen: u64,
    pub title_notes: u64,
    pub invalid_notes: u64,
    pub archaic_cases: u64,
    pub replacements: u64,
    pub unresolved_archaic: u64,
}

impl RebuildStats {
    fn record(&mut self, decision: Decision) {
        self.notes_seen += 1;
        match decision {
            Decision::Title => self.title_notes += 1,
            Decision::Invalid => self.invalid_notes += 1,
            Decision::NotArchaic => {}
            Decision::Unresolved => {
                self.archaic_cases += 1;
                self.unresolved_archaic += 1;
            }
            Decision::Replaced => {
                self.archaic_cases += 1;
                self.replacements += 1;
            }
        }
    }

    /// Add another document's counters into this one
    pub fn merge(&mut self, other: &RebuildStats) {
        self.notes_seen += other.notes_seen;
        self.title_notes += other.title_notes;
        self.invalid_notes += other.invalid_notes;
        self.archaic_cases += other.archaic_cases;
        self.replacements += other.replacements;
        self.unresolved_archaic += other.unresolved_archaic;
    }
}

/// Rebuilt document with what happened along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildOutcome {
    pub text: String,
    pub stats: RebuildStats,
    pub replacements: Vec<Replacement>,
}

/// Walk the notes in order and reassemble the document
///
/// Text outside replaced words is copied unchanged, so a document where no
/// note resolves comes back identical to the input.
pub fn rebuild(ctx: &ResolutionContext<'_>, notes: &[Note]) -> RebuildOutcome {
    let document = ctx.document;
    let mut text = String::with_capacity(document.as_str().len());
    let mut stats = RebuildStats::default();
    let mut replacements = Vec::new();

    let mut char_walker = 0;
    let mut prev_end = 0;

    for note in notes {
        let reformed = reform(ctx, note, char_walker, prev_end);
        text.push_str(&reformed.fragment);
        stats.record(reformed.decision);

        if let Some(replacement) = reformed.replacement {
            debug!(
                start = replacement.start,
                end = replacement.end,
                original = %replacement.original,
                modern = %replacement.modern,
                "Replaced archaic word"
            );
            replacements.push(replacement);
        }

        char_walker = reformed.char_walker;
        // Running maximum: a short invalid note must not reopen emitted text
        prev_end = prev_end.max(note.span.end);
    }

    text.push_str(document.tail(char_walker));

    RebuildOutcome {
        text,
        stats,
        replacements,
    }
}
