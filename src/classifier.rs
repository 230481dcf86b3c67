use crate::normalizer::Normalizer;
use crate::word_index::WordList;

/// The two reference word lists used for one resolution run
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub archaic: WordList,
    pub modern: WordList,
}

impl Lexicon {
    pub fn new(archaic: WordList, modern: WordList) -> Self {
        Self { archaic, modern }
    }
}

/// How alternate spellings are searched for a modern replacement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModernWordPolicy {
    /// Only the first non-archaic option is checked against the modern list
    #[default]
    FirstNonArchaic,
    /// Every non-archaic option is checked until one is attested as modern
    AnyNonArchaic,
}

/// Decides whether words are archaic and picks modern replacements
#[derive(Debug)]
pub struct Classifier {
    lexicon: Lexicon,
    normalizer: Normalizer,
    policy: ModernWordPolicy,
}

impl Classifier {
    pub fn new(lexicon: Lexicon, normalizer: Normalizer) -> Self {
        Self {
            lexicon,
            normalizer,
            policy: ModernWordPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ModernWordPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn policy(&self) -> ModernWordPolicy {
        self.policy
    }

    /// True when the canonical form is attested in the archaic list
    /// An empty canonical form is never archaic
    pub fn is_archaic(&self, word: &str) -> bool {
        let canonical = self.normalizer.normalize(word);
        !canonical.is_empty() && self.lexicon.archaic.contains(&canonical)
    }

    /// True when at least one alternate spelling is archaic
    pub fn is_archaic_case<S: AsRef<str>>(&self, options: &[S]) -> bool {
        options.iter().any(|option| self.is_archaic(option.as_ref()))
    }

    fn is_attested_modern(&self, word: &str) -> bool {
        self.lexicon.modern.contains(&self.normalizer.normalize(word))
    }

    /// Pick the option that replaces an archaic word, as written in `options`
    pub fn get_modern_word<'o, S: AsRef<str>>(&self, options: &'o [S]) -> Option<&'o str> {
        let mut candidates = options
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|option| !self.is_archaic(option));

        match self.policy {
            ModernWordPolicy::FirstNonArchaic => candidates
                .next()
                .filter(|option| self.is_attested_modern(option)),
            ModernWordPolicy::AnyNonArchaic => {
                candidates.find(|option| self.is_attested_modern(option))
            }
        }
    }
}
