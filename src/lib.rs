// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;

pub use crate::core::engine::DecipherEngine;
pub use crate::core::lexicon::{Lexicon, WordOracle};
pub use crate::core::mapping::PartialMapping;
pub use crate::core::solver::{find_easiest, SearchObserver, SolveReport, Solver};
pub use crate::error::{DecipherError, Result};
