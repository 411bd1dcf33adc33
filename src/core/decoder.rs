// File: src/core/decoder.rs
use crate::core::lexicon::WordOracle;
use crate::core::mapping::PartialMapping;
use crate::core::types::Token;

/// Renders every token through `mapping`, joined by single spaces.
pub fn decode(tokens: &[Token], mapping: &PartialMapping) -> String {
    tokens
        .iter()
        .map(|token| mapping.render(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Product over the words of `text` of `P(word) / threshold`. The rescaling
/// keeps long texts from underflowing; only useful for comparing solutions.
pub fn score<O: WordOracle + ?Sized>(text: &str, oracle: &O, threshold: f64) -> f64 {
    text.split(' ')
        .map(|word| oracle.probability(word) * (1.0 / threshold))
        .product()
}

/// A finished solution rendered for presentation.
#[derive(Debug, Clone)]
pub struct RankedSolution {
    pub mapping: PartialMapping,
    pub text: String,
    pub score: f64,
}

/// Renders each solution against `lines` and orders them best first. Equal
/// scores keep discovery order.
pub fn rank_solutions<O: WordOracle + ?Sized>(
    lines: &[Token],
    solutions: &[PartialMapping],
    oracle: &O,
    threshold: f64,
) -> Vec<RankedSolution> {
    let mut ranked: Vec<RankedSolution> = solutions
        .iter()
        .map(|mapping| {
            let text = decode(lines, mapping);
            let score = score(&text, oracle, threshold);
            RankedSolution {
                mapping: mapping.clone(),
                text,
                score,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::Lexicon;
    use crate::core::tokenizer::Tokenizer;

    fn lines(raw: &[&str]) -> Vec<Token> {
        Tokenizer::default().corpus(raw.iter().copied()).lines().to_vec()
    }

    #[test]
    fn decode_joins_tokens_and_marks_unknowns() {
        let tokens = lines(&["1-2-3", "2-3"]);
        let mapping: PartialMapping = [("1", 'c'), ("2", 'a')].into_iter().collect();
        assert_eq!(decode(&tokens, &mapping), "ca_ a_");
        assert_eq!(decode(&tokens, &mapping), decode(&tokens, &mapping));
        assert_eq!(decode(&[], &mapping), "");
    }

    #[test]
    fn score_is_rescaled_product() {
        let lexicon = Lexicon::from_counts([("cat", 1), ("at", 1)]);
        let value = score("cat at", &lexicon, 0.25);
        assert!((value - 4.0).abs() < 1e-12);
        assert_eq!(score("cat zz", &lexicon, 0.25), 0.0);
    }

    #[test]
    fn ranks_best_first() {
        let lexicon = Lexicon::from_counts([("at", 8), ("it", 2)]);
        let tokens = lines(&["1-2"]);
        let weak: PartialMapping = [("1", 'i'), ("2", 't')].into_iter().collect();
        let strong: PartialMapping = [("1", 'a'), ("2", 't')].into_iter().collect();

        let ranked = rank_solutions(&tokens, &[weak, strong.clone()], &lexicon, 0.1);
        assert_eq!(ranked[0].mapping, strong);
        assert_eq!(ranked[0].text, "at");
        assert_eq!(ranked[1].text, "it");
        assert!(ranked[0].score > ranked[1].score);
    }
}
