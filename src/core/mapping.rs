// File: src/core/mapping.rs
use crate::core::types::{Symbol, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder rendered for a symbol that has no letter yet.
pub const PLACEHOLDER: char = '_';

/// The symbol -> letter assignment built up along one search branch.
///
/// Branches fork it by value with [`PartialMapping::extended_with`], so a
/// sibling never observes another branch's assignments. Distinct symbols may
/// share a letter; nothing here enforces a one-to-one cipher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialMapping {
    assignments: BTreeMap<Symbol, char>,
}

impl PartialMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<char> {
        self.assignments.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.assignments.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, char)> {
        self.assignments.iter().map(|(s, &c)| (s, c))
    }

    /// True if some symbol other than `symbol` already maps to `letter`.
    pub fn letter_taken_by_other(&self, letter: char, symbol: &Symbol) -> bool {
        self.assignments
            .iter()
            .any(|(s, &c)| c == letter && s != symbol)
    }

    /// Positions of `token` whose symbol has no letter yet.
    pub fn unresolved_positions(&self, token: &Token) -> Vec<usize> {
        token
            .symbols()
            .iter()
            .enumerate()
            .filter(|(_, symbol)| !self.contains(symbol))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Renders `token` through the mapping, `_` for unknown symbols.
    pub fn render(&self, token: &Token) -> String {
        token
            .symbols()
            .iter()
            .map(|symbol| self.get(symbol).unwrap_or(PLACEHOLDER))
            .collect()
    }

    /// Forks the mapping and assigns each symbol of `token` the letter at the
    /// same position of `word`. Positions are applied left to right, so when a
    /// symbol repeats inside the token the last position wins.
    pub fn extended_with(&self, token: &Token, word: &str) -> PartialMapping {
        let mut forked = self.clone();
        for (symbol, letter) in token.symbols().iter().zip(word.chars()) {
            forked.assignments.insert(symbol.clone(), letter);
        }
        forked
    }
}

impl<S: Into<Symbol>> FromIterator<(S, char)> for PartialMapping {
    fn from_iter<I: IntoIterator<Item = (S, char)>>(iter: I) -> Self {
        Self {
            assignments: iter.into_iter().map(|(s, c)| (s.into(), c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::Tokenizer;

    fn token(raw: &str) -> Token {
        Tokenizer::default().tokenize_line(raw).unwrap()
    }

    #[test]
    fn unresolved_and_render() {
        let mapping: PartialMapping = [("1", 'c'), ("3", 't')].into_iter().collect();
        let t = token("1-2-3");
        assert_eq!(mapping.unresolved_positions(&t), vec![1]);
        assert_eq!(mapping.render(&t), "c_t");
    }

    #[test]
    fn fork_leaves_parent_untouched() {
        let parent: PartialMapping = [("1", 'c')].into_iter().collect();
        let child = parent.extended_with(&token("1-2-3"), "cat");
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 3);
        assert_eq!(child.get(&Symbol::from("2")), Some('a'));
        assert!(parent.iter().all(|(s, c)| child.get(s) == Some(c)));
    }

    #[test]
    fn repeated_symbol_last_position_wins() {
        let child = PartialMapping::new().extended_with(&token("1-1"), "ab");
        assert_eq!(child.len(), 1);
        assert_eq!(child.get(&Symbol::from("1")), Some('b'));
    }

    #[test]
    fn serializes_as_flat_object() {
        let mapping: PartialMapping = [("2", 'a'), ("1", 'c')].into_iter().collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"1":"c","2":"a"}"#);
        let back: PartialMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mapping);
    }

    #[test]
    fn letter_taken_ignores_same_symbol() {
        let mapping: PartialMapping = [("1", 'c')].into_iter().collect();
        assert!(!mapping.letter_taken_by_other('c', &Symbol::from("1")));
        assert!(mapping.letter_taken_by_other('c', &Symbol::from("2")));
    }
}
