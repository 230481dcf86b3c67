// WHY: word lists are ordered by the first base consonant, not by code point
// Ranks follow the traditional Tibetan alphabet order; ཤ and ཥ share a slot

/// Base consonants in alphabet order paired with their rank
pub const ALPHABET_RANKS: &[(char, u8)] = &[
    ('ཀ', 1),
    ('ཁ', 2),
    ('ག', 3),
    ('ང', 4),
    ('ཅ', 5),
    ('ཆ', 6),
    ('ཇ', 7),
    ('ཉ', 8),
    ('ཏ', 9),
    ('ཐ', 10),
    ('ད', 11),
    ('ན', 12),
    ('པ', 13),
    ('ཕ', 14),
    ('བ', 15),
    ('མ', 16),
    ('ཙ', 17),
    ('ཚ', 18),
    ('ཛ', 19),
    ('ཝ', 20),
    ('ཞ', 21),
    ('ཟ', 22),
    ('འ', 23),
    ('ཡ', 24),
    ('ར', 25),
    ('ལ', 26),
    ('ཤ', 27),
    ('ཥ', 27),
    ('ས', 28),
    ('ཧ', 29),
    ('ཨ', 30),
];

/// Rank of a base consonant, `None` for characters outside the table
pub fn rank(ch: char) -> Option<u8> {
    ALPHABET_RANKS
        .iter()
        .find(|(consonant, _)| *consonant == ch)
        .map(|(_, rank)| *rank)
}

/// Rank of the first character of `word`
pub fn leading_rank(word: &str) -> Option<u8> {
    word.chars().next().and_then(rank)
}
