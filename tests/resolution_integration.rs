// End-to-end tests of note resolution through the public API

use archaic_resolver::document::spans_are_monotonic;
use archaic_resolver::{
    rebuild, resolve_archaics, Classifier, Document, Lexicon, ModernWordPolicy, Normalizer, Note,
    PartOfSpeech, ResolutionContext, Token, Tokenizer, WordList,
};

#[path = "integration/mod.rs"]
mod test_utils;
use test_utils::{ARCHAIC_WORDS, MODERN_WORDS};

fn classifier() -> Classifier {
    Classifier::new(
        Lexicon::new(WordList::new(ARCHAIC_WORDS.iter().copied()), WordList::new(MODERN_WORDS.iter().copied())),
        Normalizer::default(),
    )
}

/// Tagger stand-in that treats every "ཀྱི" segment as a particle
struct SplittingTokenizer;

impl Tokenizer for SplittingTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        for (i, part) in text.split("ཀྱི").enumerate() {
            if i > 0 {
                tokens.push(Token::new("ཀྱི", Some(PartOfSpeech::Particle)));
            }
            if !part.is_empty() {
                tokens.push(Token::new(part, Some(PartOfSpeech::Word)));
            }
        }
        tokens
    }
}

#[test]
fn test_two_syllable_word_is_replaced() {
    let classifier = classifier();
    let notes = vec![Note::new(0, 4, ["ཀ་ཁ", "ཀཀ"])];

    let output = resolve_archaics(&classifier, "ཀ་ཁ་", &notes);
    assert_eq!(output, "ཀཀ");
}

#[test]
fn test_text_before_word_start_is_preserved() {
    let classifier = classifier();
    let text = "ང་ ཀ་ཁ་ ཨ།";
    let notes = vec![Note::new(2, 7, ["ཀ་ཁ", "ཀ་ཀ"])];

    let output = resolve_archaics(&classifier, text, &notes);
    assert_eq!(output, "ང་ ཀ་ཀ ཨ།");
}

#[test]
fn test_title_note_with_only_archaic_options_is_kept() {
    let classifier = classifier();
    let text = "ཀ་ཁ་ ག་ང་";
    let notes = vec![Note::title(0, 4, ["ཀ་ཁ", "ག་ང"]), Note::new(4, 9, ["ག་ང", "ག་ཀ"])];

    let output = resolve_archaics(&classifier, text, &notes);
    assert_eq!(output, "ཀ་ཁ་ ག་ཀ");
}

#[test]
fn test_unresolved_archaic_case_keeps_original_text() {
    let classifier = classifier();
    let text = "ཅ་ཆ་ཀ";
    // Archaic, and the only other option is not attested as modern
    let notes = vec![Note::new(0, 4, ["ཅ་ཆ", "ཅ་ཅ"])];

    let output = resolve_archaics(&classifier, text, &notes);
    assert_eq!(output, text);
}

#[test]
fn test_identity_when_nothing_is_archaic() {
    let classifier = classifier();
    let text = "ཀ་ཀ་ ག་ཀ་ x ཤ་ཀ།";
    let notes = vec![
        Note::new(0, 4, ["ཀ་ཀ"]),
        Note::new(4, 9, ["ག་ཀ", "ཀ་ཀ"]),
        Note::new(9, 11, ["x"]),
        Note::new(11, 16, ["ཤ་ཀ།"]),
    ];
    assert!(spans_are_monotonic(&notes));

    let document = Document::new(text);
    let ctx = ResolutionContext::new(&classifier, &document);
    let outcome = rebuild(&ctx, &notes);
    assert_eq!(outcome.text, text);
    assert_eq!(outcome.stats.notes_seen, 4);
    assert_eq!(outcome.stats.archaic_cases, 0);
}

#[test]
fn test_invalid_notes_are_kept_verbatim() {
    let classifier = classifier();
    let text = "ཀ་ཁ་ ག་ང་";
    let notes = vec![
        Note::new(0, 4, Vec::<String>::new()),
        Note::new(4, 40, ["ག་ང", "ག་ཀ"]),
    ];

    let output = resolve_archaics(&classifier, text, &notes);
    assert_eq!(output, text);
}

#[test]
fn test_word_late_in_alphabet_is_replaced() {
    let classifier = classifier();
    let notes = vec![Note::new(0, 3, ["ཤ་ར", "ཤ་ཀ"])];
    assert_eq!(resolve_archaics(&classifier, "ཤ་ར", &notes), "ཤ་ཀ");
}

#[test]
fn test_policy_controls_later_modern_options() {
    let text = "ཀ་ཁ་";
    let notes = vec![Note::new(0, 4, ["ཀ་ཁ", "ཅ་ཅ", "ཀ་ཀ"])];

    let first_only = classifier();
    assert_eq!(resolve_archaics(&first_only, text, &notes), text);

    let scan_all = classifier().with_policy(ModernWordPolicy::AnyNonArchaic);
    assert_eq!(resolve_archaics(&scan_all, text, &notes), "ཀ་ཀ");
}

#[test]
fn test_external_tokenizer_strips_particles() {
    let classifier = Classifier::new(
        Lexicon::new(WordList::new(["ཀཁ"]), WordList::new(["ཀཀ"])),
        Normalizer::new(SplittingTokenizer),
    );
    let notes = vec![Note::new(0, 7, ["ཀ་ཁ་ཀྱི", "ཀ་ཀ་ཀྱི"])];

    let output = resolve_archaics(&classifier, "ཀ་ཁ་ཀྱི་", &notes);
    assert_eq!(output, "ཀ་ཀ་ཀྱི་");
}
