// File: src/core/lexicon.rs
use crate::config::LexiconConfig;
use crate::error::{DecipherError, Result};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The built-in English frequency list, `word count` per line.
const BUILTIN_ENGLISH: &str = include_str!("../../data/en_words.txt");

/// Answers how plausible a string is as a word of the target language.
///
/// A return of 0 means the word is unknown and must never validate.
pub trait WordOracle {
    fn probability(&self, word: &str) -> f64;

    fn is_known(&self, word: &str) -> bool {
        self.probability(word) > 0.0
    }
}

/// A word frequency model. P(word) = count(word) / total count.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lexicon {
    counts: FxHashMap<String, u64>,
    total: u64,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut lexicon = Self::new();
        for (word, count) in counts {
            lexicon.add(word, count);
        }
        lexicon
    }

    /// The built-in English list with `config` applied.
    pub fn english(config: &LexiconConfig) -> Result<Self> {
        Ok(Self::parse_frequency_list(BUILTIN_ENGLISH)?.configured(config))
    }

    /// Parses `word count` lines. A bare `word` counts once; blank lines and
    /// `#` comments are skipped.
    pub fn parse_frequency_list(text: &str) -> Result<Self> {
        let mut lexicon = Self::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split_whitespace();
            let (Some(word), count, None) = (fields.next(), fields.next(), fields.next()) else {
                return Err(DecipherError::LexiconParse {
                    line: idx + 1,
                    message: format!("expected `word [count]`, got {line:?}"),
                });
            };
            let count = match count {
                Some(raw) => raw.parse::<u64>().map_err(|e| DecipherError::LexiconParse {
                    line: idx + 1,
                    message: format!("bad count {raw:?}: {e}"),
                })?,
                None => 1,
            };
            lexicon.add(word.to_lowercase(), count);
        }
        Ok(lexicon)
    }

    /// Parses a JSON object of `{"word": count}`.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let counts: BTreeMap<String, u64> = serde_json::from_str(text)?;
        Ok(Self::from_counts(
            counts.into_iter().map(|(w, c)| (w.to_lowercase(), c)),
        ))
    }

    /// Strips the disallowed single letters and loads the supplementary names.
    pub fn configured(mut self, config: &LexiconConfig) -> Self {
        for letter in 'a'..='z' {
            if !config.allowed_single_letters.contains(&letter) {
                self.remove(&letter.to_string());
            }
        }
        self.load_words(config.names.iter().map(String::as_str));
        self
    }

    pub fn add(&mut self, word: impl Into<String>, count: u64) {
        *self.counts.entry(word.into()).or_insert(0) += count;
        self.total += count;
    }

    /// Bumps every word's count by one, adding the unknown ones.
    pub fn load_words<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        for word in words {
            self.add(word.to_lowercase(), 1);
        }
    }

    pub fn remove(&mut self, word: &str) -> Option<u64> {
        let count = self.counts.remove(word)?;
        self.total -= count;
        Some(count)
    }

    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl WordOracle for Lexicon {
    fn probability(&self, word: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total as f64
    }
}
