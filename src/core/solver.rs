// File: src/core/solver.rs
use crate::config::SolverConfig;
use crate::core::candidates::CandidateGenerator;
use crate::core::decoder::decode;
use crate::core::lexicon::WordOracle;
use crate::core::mapping::PartialMapping;
use crate::core::types::Token;
use crate::error::Result;
use tracing::{debug, info, warn};

/// Hooks into the search for progress reporting and tracing.
pub trait SearchObserver {
    /// Called with every fully decoded text the search validates.
    fn on_attempt(&mut self, _text: &str) {}

    /// Called for each child mapping forked from `parent`.
    fn on_branch(&mut self, _parent: &PartialMapping, _child: &PartialMapping) {}

    fn on_solution(&mut self, _mapping: &PartialMapping, _text: &str) {}
}

pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// The token chosen for the next expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'t> {
    pub token: &'t Token,
    pub unresolved: Vec<usize>,
}

/// Picks the token with the fewest unresolved positions, ignoring resolved
/// ones. A token with exactly one unresolved position is taken immediately;
/// otherwise the first strict minimum in scan order wins. `None` means every
/// token is resolved.
pub fn find_easiest<'t>(tokens: &'t [Token], mapping: &PartialMapping) -> Option<Selection<'t>> {
    let mut easiest: Option<Selection<'t>> = None;

    for token in tokens {
        let unresolved = mapping.unresolved_positions(token);
        match unresolved.len() {
            0 => continue,
            1 => return Some(Selection { token, unresolved }),
            n => {
                if easiest.as_ref().map_or(true, |best| n < best.unresolved.len()) {
                    easiest = Some(Selection { token, unresolved });
                }
            }
        }
    }

    easiest
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes taken off the worklist.
    pub nodes: u64,
    /// Expansions with no surviving candidate plus failed leaf validations.
    pub dead_ends: u64,
    /// Nodes where every token was resolved.
    pub leaves: u64,
    pub max_depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SolveReport {
    /// In discovery order; duplicates are kept.
    pub solutions: Vec<PartialMapping>,
    pub stats: SearchStats,
    /// False when the branch budget stopped the search early.
    pub exhausted: bool,
}

/// One pending branch. Each frame owns its mapping.
struct Frame {
    mapping: PartialMapping,
    depth: usize,
}

/// Backtracking search for every mapping under which all tokens decode to
/// known words.
pub struct Solver<'a, O: ?Sized> {
    tokens: &'a [Token],
    oracle: &'a O,
    config: &'a SolverConfig,
}

impl<'a, O: WordOracle + ?Sized> Solver<'a, O> {
    pub fn new(tokens: &'a [Token], oracle: &'a O, config: &'a SolverConfig) -> Self {
        Self {
            tokens,
            oracle,
            config,
        }
    }

    pub fn solve(&self) -> Result<SolveReport> {
        self.solve_with(&mut NoopObserver)
    }

    /// Depth-first over candidates in descending score order, exhaustive
    /// unless `max_branches` is hit. Fails only when the cheapest remaining
    /// token is too wide to enumerate.
    pub fn solve_with(&self, observer: &mut dyn SearchObserver) -> Result<SolveReport> {
        let generator = CandidateGenerator::new(self.oracle, self.config);
        let mut report = SolveReport {
            exhausted: true,
            ..SolveReport::default()
        };
        let mut stack = vec![Frame {
            mapping: PartialMapping::new(),
            depth: 0,
        }];

        while let Some(frame) = stack.pop() {
            if let Some(budget) = self.config.max_branches {
                if report.stats.nodes >= budget {
                    warn!(budget, pending = stack.len() + 1, "branch budget exhausted, stopping search");
                    report.exhausted = false;
                    break;
                }
            }
            report.stats.nodes += 1;
            report.stats.max_depth = report.stats.max_depth.max(frame.depth);

            let Some(selection) = find_easiest(self.tokens, &frame.mapping) else {
                report.stats.leaves += 1;
                match self.validate(&frame.mapping, observer) {
                    Some(text) => {
                        info!(solution = %text, depth = frame.depth, "found solution");
                        observer.on_solution(&frame.mapping, &text);
                        report.solutions.push(frame.mapping);
                    }
                    None => report.stats.dead_ends += 1,
                }
                continue;
            };

            let mut candidates =
                generator.generate_at(selection.token, &frame.mapping, &selection.unresolved)?;
            debug!(
                token = selection.token.raw(),
                unresolved = selection.unresolved.len(),
                candidates = candidates.len(),
                depth = frame.depth,
                "expanding"
            );
            if candidates.is_empty() {
                report.stats.dead_ends += 1;
                continue;
            }

            candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
            // Reverse so the best candidate is popped first.
            for candidate in candidates.iter().rev() {
                let child = frame.mapping.extended_with(selection.token, &candidate.word);
                observer.on_branch(&frame.mapping, &child);
                stack.push(Frame {
                    mapping: child,
                    depth: frame.depth + 1,
                });
            }
        }

        info!(
            solutions = report.solutions.len(),
            nodes = report.stats.nodes,
            dead_ends = report.stats.dead_ends,
            exhausted = report.exhausted,
            "search finished"
        );
        Ok(report)
    }

    /// Decodes the whole corpus and accepts it if every word is known to the
    /// oracle at all. Returns the decoded text on success.
    pub fn validate(
        &self,
        mapping: &PartialMapping,
        observer: &mut dyn SearchObserver,
    ) -> Option<String> {
        if mapping.is_empty() {
            return None;
        }
        let text = decode(self.tokens, mapping);
        observer.on_attempt(&text);
        let valid = text.split(' ').all(|word| self.oracle.is_known(word));
        valid.then_some(text)
    }
}
