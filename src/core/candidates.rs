// File: src/core/candidates.rs
use crate::config::SolverConfig;
use crate::core::lexicon::WordOracle;
use crate::core::mapping::PartialMapping;
use crate::core::types::{Candidate, Token};
use crate::error::{DecipherError, Result};

const ALPHABET: [u8; 26] = *b"abcdefghijklmnopqrstuvwxyz";

/// Enumerates and scores letter fillings for a token's unresolved positions.
pub struct CandidateGenerator<'a, O: ?Sized> {
    oracle: &'a O,
    config: &'a SolverConfig,
}

impl<'a, O: WordOracle + ?Sized> CandidateGenerator<'a, O> {
    pub fn new(oracle: &'a O, config: &'a SolverConfig) -> Self {
        Self { oracle, config }
    }

    /// Every filling of `token` under `mapping` whose score beats the
    /// threshold, in enumeration order (first unresolved position varies
    /// slowest). An empty result means the branch is dead.
    ///
    /// Cost is 26^k oracle lookups for k unresolved positions; k above
    /// `max_unknowns` is refused with [`DecipherError::EnumerationLimit`].
    pub fn generate(&self, token: &Token, mapping: &PartialMapping) -> Result<Vec<Candidate>> {
        let unresolved = mapping.unresolved_positions(token);
        self.generate_at(token, mapping, &unresolved)
    }

    pub(crate) fn generate_at(
        &self,
        token: &Token,
        mapping: &PartialMapping,
        unresolved: &[usize],
    ) -> Result<Vec<Candidate>> {
        if unresolved.len() > self.config.max_unknowns {
            return Err(DecipherError::EnumerationLimit {
                token: token.raw().to_string(),
                unresolved: unresolved.len(),
                limit: self.config.max_unknowns,
            });
        }

        let mut word: Vec<char> = mapping.render(token).chars().collect();
        let mut digits = vec![0usize; unresolved.len()];
        let mut candidates = Vec::new();

        loop {
            for (&pos, &digit) in unresolved.iter().zip(&digits) {
                word[pos] = ALPHABET[digit] as char;
            }

            if self.admissible(token, mapping, &word) {
                let text: String = word.iter().collect();
                let score = self.oracle.probability(&text);
                if score > self.config.threshold {
                    candidates.push(Candidate { word: text, score });
                }
            }

            if !advance(&mut digits) {
                break;
            }
        }

        tracing::trace!(
            token = token.raw(),
            unresolved = unresolved.len(),
            survivors = candidates.len(),
            "generated candidates"
        );
        Ok(candidates)
    }

    /// Optional consistency filters; both pass everything by default.
    fn admissible(&self, token: &Token, mapping: &PartialMapping, word: &[char]) -> bool {
        let symbols = token.symbols();

        if self.config.enforce_repeat_consistency {
            for i in 0..symbols.len() {
                for j in (i + 1)..symbols.len() {
                    if symbols[i] == symbols[j] && word[i] != word[j] {
                        return false;
                    }
                }
            }
        }

        if self.config.enforce_injective {
            for (i, symbol) in symbols.iter().enumerate() {
                if mapping.letter_taken_by_other(word[i], symbol) {
                    return false;
                }
                if symbols[..i]
                    .iter()
                    .zip(word)
                    .any(|(other, &letter)| other != symbol && letter == word[i])
                {
                    return false;
                }
            }
        }

        true
    }
}

/// Odometer step over base-26 digits, last digit fastest. Returns false once
/// every combination has been produced.
fn advance(digits: &mut [usize]) -> bool {
    for digit in digits.iter_mut().rev() {
        *digit += 1;
        if *digit < ALPHABET.len() {
            return true;
        }
        *digit = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::Lexicon;
    use crate::core::tokenizer::Tokenizer;

    fn token(raw: &str) -> Token {
        Tokenizer::default().tokenize_line(raw).unwrap()
    }

    fn config() -> SolverConfig {
        SolverConfig {
            threshold: 0.01,
            ..SolverConfig::default()
        }
    }

    #[test]
    fn odometer_covers_every_combination() {
        let mut digits = vec![0, 0];
        let mut steps = 1;
        while advance(&mut digits) {
            steps += 1;
        }
        assert_eq!(steps, 26 * 26);
        assert_eq!(digits, vec![0, 0]);
        assert!(!advance(&mut []));
    }

    #[test]
    fn fills_only_unresolved_positions() {
        let lexicon = Lexicon::from_counts([("cat", 5), ("cot", 3), ("dog", 2)]);
        let cfg = config();
        let generator = CandidateGenerator::new(&lexicon, &cfg);
        let mapping: PartialMapping = [("1", 'c'), ("3", 't')].into_iter().collect();

        let words: Vec<String> = generator
            .generate(&token("1-2-3"), &mapping)
            .unwrap()
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert_eq!(words, vec!["cat", "cot"]);
    }

    #[test]
    fn drops_candidates_at_or_below_threshold() {
        let lexicon = Lexicon::from_counts([("at", 999), ("ax", 1)]);
        let cfg = config();
        let candidates = CandidateGenerator::new(&lexicon, &cfg)
            .generate(&token("1-2"), &PartialMapping::new())
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].word, "at");
        assert!((candidates[0].score - 0.999).abs() < 1e-12);
    }

    #[test]
    fn resolved_token_scores_itself() {
        let lexicon = Lexicon::from_counts([("at", 1)]);
        let cfg = config();
        let mapping: PartialMapping = [("1", 'a'), ("2", 't')].into_iter().collect();
        let candidates = CandidateGenerator::new(&lexicon, &cfg)
            .generate(&token("1-2"), &mapping)
            .unwrap();
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn refuses_wide_enumerations() {
        let lexicon = Lexicon::new();
        let cfg = SolverConfig {
            max_unknowns: 2,
            ..config()
        };
        let err = CandidateGenerator::new(&lexicon, &cfg)
            .generate(&token("1-2-3"), &PartialMapping::new())
            .unwrap_err();
        assert!(matches!(
            err,
            DecipherError::EnumerationLimit { unresolved: 3, limit: 2, .. }
        ));
    }

    #[test]
    fn repeated_symbols_enumerate_independently_by_default() {
        let lexicon = Lexicon::from_counts([("ab", 1), ("bb", 1)]);
        let cfg = config();
        let generator = CandidateGenerator::new(&lexicon, &cfg);
        assert_eq!(generator.generate(&token("1-1"), &PartialMapping::new()).unwrap().len(), 2);

        let strict = SolverConfig {
            enforce_repeat_consistency: true,
            ..config()
        };
        let words: Vec<String> = CandidateGenerator::new(&lexicon, &strict)
            .generate(&token("1-1"), &PartialMapping::new())
            .unwrap()
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert_eq!(words, vec!["bb"]);
    }

    #[test]
    fn injective_filter_rejects_shared_letters() {
        let lexicon = Lexicon::from_counts([("aa", 1), ("ta", 1), ("at", 1)]);
        let strict = SolverConfig {
            enforce_injective: true,
            ..config()
        };
        let generator = CandidateGenerator::new(&lexicon, &strict);

        let words: Vec<String> = generator
            .generate(&token("1-2"), &PartialMapping::new())
            .unwrap()
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert_eq!(words, vec!["at", "ta"]);

        // symbol 3 already owns 't'
        let mapping: PartialMapping = [("3", 't')].into_iter().collect();
        let words: Vec<String> = generator
            .generate(&token("1-2"), &mapping)
            .unwrap()
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert!(words.is_empty());
    }
}
