use crate::config::AppConfig;
use crate::core::decoder::{rank_solutions, RankedSolution};
use crate::core::lexicon::Lexicon;
use crate::core::solver::{SearchObserver, SolveReport, Solver};
use crate::core::tokenizer::{Corpus, Tokenizer};
use crate::error::Result;
use crate::persistence::{load_corpus, load_lexicon};
use std::path::Path;

/// Ties the oracle, tokenizer and solver settings together for the front ends.
pub struct DecipherEngine {
    pub lexicon: Lexicon,
    pub tokenizer: Tokenizer,
    config: AppConfig,
}

impl DecipherEngine {
    pub fn new(lexicon: Lexicon, config: AppConfig) -> Self {
        Self {
            lexicon,
            tokenizer: Tokenizer::new(config.delimiter.clone()),
            config,
        }
    }

    /// Loads the configured frequency source (or the built-in English list)
    /// and applies the lexicon customisation once.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let lexicon = match &config.lexicon_path {
            Some(path) => load_lexicon(path)?.configured(&config.lexicon),
            None => Lexicon::english(&config.lexicon)?,
        };
        tracing::info!(words = lexicon.len(), total = lexicon.total(), "lexicon ready");
        Ok(Self::new(lexicon, config))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn load_corpus(&self, path: &Path) -> Result<Corpus> {
        let corpus = load_corpus(path, &self.tokenizer)?;
        tracing::info!(
            path = %path.display(),
            tokens = corpus.tokens().len(),
            lines = corpus.lines().len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    pub fn solve(&self, corpus: &Corpus, observer: &mut dyn SearchObserver) -> Result<SolveReport> {
        Solver::new(corpus.tokens(), &self.lexicon, &self.config.solver).solve_with(observer)
    }

    /// Renders the solutions against the corpus in file order, best first.
    pub fn rank(&self, corpus: &Corpus, report: &SolveReport) -> Vec<RankedSolution> {
        rank_solutions(
            corpus.lines(),
            &report.solutions,
            &self.lexicon,
            self.config.solver.threshold,
        )
    }
}
