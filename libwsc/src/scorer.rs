use crate::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredWord {
    pub word: String,
    pub score: u64,
}

impl ScoredWord {
    pub fn new(word: impl Into<String>, score: u64) -> Self {
        Self {
            word: word.into(),
            score,
        }
    }
}

/// Outcome of scoring a word list against one source.
#[derive(Debug, Clone)]
pub struct Scoring {
    pub source: String,
    pub entries: Vec<ScoredWord>,
    pub nonzero: usize,
}

impl Scoring {
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} corpora, analyzing {} nouns,    assigned scores to {} nouns",
            self.source,
            self.total(),
            self.nonzero
        )
    }
}

/// Looks up every word in `table`, keeping input order. Unseen words score 0.
pub fn score_words(source: &str, words: &[String], table: &FrequencyTable) -> Scoring {
    let entries = words
        .iter()
        .map(|word| ScoredWord::new(word.as_str(), table.get(word)))
        .collect::<Vec<_>>();
    let nonzero = entries.iter().filter(|entry| entry.score > 0).count();
    Scoring {
        source: source.to_string(),
        entries,
        nonzero,
    }
}

/// Highest score first; equal scores keep their relative order.
pub fn sort_by_score(entries: &mut [ScoredWord]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
}
