pub mod candidates;
pub mod decoder;
pub mod engine;
pub mod lexicon;
pub mod mapping;
pub mod solver;
pub mod tokenizer;
pub mod types;
