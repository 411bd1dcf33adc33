// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// One opaque unit of ciphertext, compared by equality only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: impl Into<String>) -> Self {
        Symbol(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(raw: &str) -> Self {
        Symbol::new(raw)
    }
}

/// The cipher analogue of a word. Built once from a corpus line and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The line as it appeared in the corpus, used for messages.
    raw: String,
    symbols: Vec<Symbol>,
}

impl Token {
    pub fn new(raw: impl Into<String>, symbols: Vec<Symbol>) -> Self {
        Self {
            raw: raw.into(),
            symbols,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A full decoding of one token under one filling, with its plausibility.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub word: String,
    pub score: f64,
}
