// WHY: lookups compare canonical forms, so punctuation and grammatical particles
// must be gone before a word is searched in either reference list

/// Marks deleted before lookup: shad (sentence terminator) and tsheg (syllable separator)
pub const PUNCTUATION_MARKS: &[char] = &['\u{0F0D}', '\u{0F0B}'];

/// Syllabic particles peeled off by the built-in tokenizer
pub const DEFAULT_PARTICLES: &[&str] = &[
    "ཀྱི", "གྱི", "གི", "ཡི",
    "ཀྱིས", "གྱིས", "གིས", "ཡིས",
    "སུ", "ཏུ", "དུ", "རུ",
    "ནས", "ལས",
    "དང", "ཀྱང", "ཡང", "འང",
    "སྟེ", "ཏེ", "དེ",
];

/// Part of speech as far as normalization cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartOfSpeech {
    Word,
    Particle,
}

/// One segment produced by a tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// `None` when the tagger could not assign a part of speech
    pub pos: Option<PartOfSpeech>,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: Option<PartOfSpeech>) -> Self {
        Self { text: text.into(), pos }
    }
}

/// Segments a punctuation-free word into tagged tokens
///
/// Any linguistic tokenizer can sit behind this; the normalizer only needs
/// surface text and whether a token is a particle.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Tokenizer that splits trailing particles off a word using a fixed particle list
///
/// A word equal to a particle is a single particle token. Otherwise the longest
/// particle suffix is peeled repeatedly, as long as the remaining stem is
/// non-empty and not itself a particle.
#[derive(Debug, Clone)]
pub struct AffixTokenizer {
    /// Longest first so the longest matching suffix wins
    particles: Vec<String>,
}

impl AffixTokenizer {
    pub fn new<I, S>(particles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut particles: Vec<String> = particles
            .into_iter()
            .map(Into::into)
            .map(|p| strip_punctuation(p.trim()))
            .filter(|p| !p.is_empty())
            .collect();
        particles.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        particles.dedup();
        Self { particles }
    }

    pub fn particles(&self) -> &[String] {
        &self.particles
    }

    fn is_particle(&self, text: &str) -> bool {
        self.particles.iter().any(|p| p == text)
    }

    /// Split one particle off the end of `stem`, returning (rest, particle)
    fn peel<'t>(&self, stem: &'t str) -> Option<(&'t str, &'t str)> {
        self.particles.iter().find_map(|particle| {
            let rest = stem.strip_suffix(particle.as_str())?;
            if rest.is_empty() || self.is_particle(rest) {
                None
            } else {
                Some((rest, &stem[rest.len()..]))
            }
        })
    }
}

impl Default for AffixTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_PARTICLES.iter().copied())
    }
}

impl Tokenizer for AffixTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }
        if self.is_particle(text) {
            return vec![Token::new(text, Some(PartOfSpeech::Particle))];
        }

        let mut stem = text;
        let mut suffixes = Vec::new();
        while let Some((rest, particle)) = self.peel(stem) {
            suffixes.push(Token::new(particle, Some(PartOfSpeech::Particle)));
            stem = rest;
        }

        let mut tokens = Vec::with_capacity(suffixes.len() + 1);
        tokens.push(Token::new(stem, Some(PartOfSpeech::Word)));
        tokens.extend(suffixes.into_iter().rev());
        tokens
    }
}

/// Produces the canonical lookup form of a word
pub struct Normalizer {
    tokenizer: Box<dyn Tokenizer>,
}

impl Normalizer {
    pub fn new(tokenizer: impl Tokenizer + 'static) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
        }
    }

    /// Delete punctuation marks, then keep only tagged, non-particle tokens
    /// Result may be empty when the word is nothing but punctuation and particles
    pub fn normalize(&self, word: &str) -> String {
        let mut buffer = String::with_capacity(word.len());
        strip_punctuation_into(word, &mut buffer);
        remove_particles(self.tokenizer.as_ref(), &buffer)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(AffixTokenizer::default())
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

/// Concatenate the surface text of every token that is tagged and not a particle
pub fn remove_particles(tokenizer: &dyn Tokenizer, text: &str) -> String {
    tokenizer
        .tokenize(text)
        .into_iter()
        .filter(|token| matches!(token.pos, Some(ref pos) if *pos != PartOfSpeech::Particle))
        .map(|token| token.text)
        .collect()
}

/// Delete shad and tsheg marks
pub fn strip_punctuation(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    strip_punctuation_into(text, &mut result);
    result
}

/// Delete shad and tsheg marks into a supplied buffer
/// WHY: enables buffer reuse when normalizing many options in a row
pub fn strip_punctuation_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());
    buffer.extend(text.chars().filter(|ch| !PUNCTUATION_MARKS.contains(ch)));
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tagger stand-in that marks a fixed set of whole-token particles
    struct ScriptedTokenizer;

    impl Tokenizer for ScriptedTokenizer {
        fn tokenize(&self, text: &str) -> Vec<Token> {
            match text {
                "" => Vec::new(),
                "ཀཁགི" => vec![
                    Token::new("ཀཁ", Some(PartOfSpeech::Word)),
                    Token::new("གི", Some(PartOfSpeech::Particle)),
                ],
                "ཀཁ?" => vec![
                    Token::new("ཀཁ", Some(PartOfSpeech::Word)),
                    Token::new("?", None),
                ],
                other => vec![Token::new(other, Some(PartOfSpeech::Word))],
            }
        }
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(strip_punctuation("ཀ་ཁ་།"), "ཀཁ");
        assert_eq!(strip_punctuation("།།"), "");
        assert_eq!(strip_punctuation("ཀཁ"), "ཀཁ");
    }

    #[test]
    fn test_strip_punctuation_into_buffer_reuse() {
        let mut buffer = String::new();

        strip_punctuation_into("ཀ་ཁ", &mut buffer);
        assert_eq!(buffer, "ཀཁ");

        strip_punctuation_into("ག།", &mut buffer);
        assert_eq!(buffer, "ག");
    }

    #[test]
    fn test_normalize_with_external_tagger() {
        let normalizer = Normalizer::new(ScriptedTokenizer);
        assert_eq!(normalizer.normalize("ཀ་ཁ་གི་"), "ཀཁ");
        // Untagged tokens are dropped
        assert_eq!(normalizer.normalize("ཀ་ཁ?"), "ཀཁ");
        assert_eq!(normalizer.normalize("་།"), "");
    }

    #[test]
    fn test_affix_tokenizer_peels_trailing_particles() {
        let tokenizer = AffixTokenizer::default();
        let tokens = tokenizer.tokenize("ཆོསཀྱི");
        assert_eq!(
            tokens,
            vec![
                Token::new("ཆོས", Some(PartOfSpeech::Word)),
                Token::new("ཀྱི", Some(PartOfSpeech::Particle)),
            ]
        );
    }

    #[test]
    fn test_affix_tokenizer_prefers_longest_suffix() {
        let tokenizer = AffixTokenizer::default();
        // "ཀྱིས" must win over the shorter "ཀྱི" reading
        let tokens = tokenizer.tokenize("བླམཀྱིས");
        assert_eq!(tokens[0].text, "བླམ");
        assert_eq!(tokens[1].text, "ཀྱིས");
    }

    #[test]
    fn test_affix_tokenizer_keeps_particle_shaped_stem() {
        let tokenizer = AffixTokenizer::default();
        // Peeling would leave a bare particle, so the word stays whole
        let tokens = tokenizer.tokenize("ཡིསུ");
        assert_eq!(tokens, vec![Token::new("ཡིསུ", Some(PartOfSpeech::Word))]);
    }

    #[test]
    fn test_normalize_whole_particle_is_empty() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("ཀྱི་"), "");
        assert_eq!(normalizer.normalize("དང་།"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = Normalizer::default();
        let words = [
            "ཀ་ཁ་", "ཆོས་ཀྱི་", "བླ་མ་ཀྱིས་", "ཡི་སུ", "དང་", "ཀྱི་ཀྱི",
            "སངས་རྒྱས་ཀྱི་དུ།", "", "།", "abc",
        ];
        for word in words {
            let once = normalizer.normalize(word);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice, "normalize not idempotent for {word:?}");
            assert!(!once.contains(PUNCTUATION_MARKS), "punctuation left in {once:?}");
        }
    }

    #[test]
    fn test_custom_particle_list() {
        let tokenizer = AffixTokenizer::new(["ལ་", "", "ལ"]);
        assert_eq!(tokenizer.particles(), &["ལ".to_string()]);
        let normalizer = Normalizer::new(tokenizer);
        assert_eq!(normalizer.normalize("ཁང་པ་ལ"), "ཁངཔ");
    }
}
