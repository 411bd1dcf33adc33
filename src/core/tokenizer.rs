// File: src/core/tokenizer.rs
use crate::core::types::{Symbol, Token};
use std::collections::HashSet;

/// Splits cipher lines into tokens on a fixed delimiter.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    delimiter: String,
}

impl Tokenizer {
    pub fn new(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }

    /// Returns `None` for a blank line. Malformed lines are not rejected; they
    /// yield whatever symbols the split produces.
    pub fn tokenize_line(&self, line: &str) -> Option<Token> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let symbols = line.split(self.delimiter.as_str()).map(Symbol::from).collect();
        Some(Token::new(line, symbols))
    }

    pub fn corpus<'a, I>(&self, lines: I) -> Corpus
    where
        I: IntoIterator<Item = &'a str>,
    {
        let lines: Vec<Token> = lines
            .into_iter()
            .filter_map(|line| self.tokenize_line(line))
            .collect();

        let mut seen = HashSet::new();
        let tokens = lines
            .iter()
            .filter(|&token| seen.insert(token.raw()))
            .cloned()
            .collect();

        Corpus { tokens, lines }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DELIMITER)
    }
}

/// The tokens of one cipher text.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Distinct tokens in first-seen order; this is what the search works on.
    tokens: Vec<Token>,
    /// Every non-blank line in file order, for rendering.
    lines: Vec<Token>,
}

impl Corpus {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn lines(&self) -> &[Token] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_delimiter() {
        let tokenizer = Tokenizer::default();
        let token = tokenizer.tokenize_line("12-7-3\n").unwrap();
        let symbols: Vec<&str> = token.symbols().iter().map(Symbol::as_str).collect();
        assert_eq!(symbols, vec!["12", "7", "3"]);
        assert_eq!(token.raw(), "12-7-3");
    }

    #[test]
    fn deduplicates_in_first_seen_order() {
        let corpus = Tokenizer::default().corpus(["2-1", "1-2-3", "", "2-1", "  ", "1-2-3", "4"]);
        let raws: Vec<&str> = corpus.tokens().iter().map(Token::raw).collect();
        assert_eq!(raws, vec!["2-1", "1-2-3", "4"]);
        assert_eq!(corpus.lines().len(), 5);
    }

    #[test]
    fn malformed_line_keeps_empty_symbols() {
        let token = Tokenizer::new("-").tokenize_line("1--2").unwrap();
        assert_eq!(token.len(), 3);
        assert_eq!(token.symbols()[1].as_str(), "");
    }

    #[test]
    fn custom_delimiter() {
        let token = Tokenizer::new(",").tokenize_line("a,b").unwrap();
        assert_eq!(token.symbols(), &[Symbol::from("a"), Symbol::from("b")]);
    }
}
