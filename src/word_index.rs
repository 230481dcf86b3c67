use crate::alphabet::leading_rank;

/// Reference word list ordered by the rank of each entry's first character
///
/// Entries sharing a leading rank form one contiguous run. Construction sorts
/// stably, so the relative order of entries inside a run is preserved and
/// entries with an unranked first character come first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();
        words.sort_by_key(|word| leading_rank(word));
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Exact membership test
    ///
    /// Words whose first character has no rank are never found. Otherwise the
    /// run of entries sharing the target's leading rank is located by binary
    /// search and scanned for an exact match.
    pub fn contains(&self, word: &str) -> bool {
        self.rank_run(word)
            .is_some_and(|run| run.iter().any(|entry| entry == word))
    }

    /// Entries whose leading rank equals the leading rank of `word`
    fn rank_run(&self, word: &str) -> Option<&[String]> {
        let target = leading_rank(word)?;
        let lower = self
            .words
            .partition_point(|entry| leading_rank(entry) < Some(target));
        let upper = self
            .words
            .partition_point(|entry| leading_rank(entry) <= Some(target));
        Some(&self.words[lower..upper])
    }
}

impl FromIterator<String> for WordList {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter)
    }
}
