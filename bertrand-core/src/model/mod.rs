//! Top-level module for the word-level Markov chain.
//!
//! This module provides:
//! - Weighted sampling structures (`WeightedCollection`)
//! - Chain training (`ChainBuilder`)
//! - The trained, read-only chain (`Chain`) and its generation methods
//! - The sentence ends table (`punctuation`)
//! - Generation settings (`GenerationConfig`)

/// Trained chain state and loading from a message store.
pub mod chain;

/// Tokenization and transition counting.
///
/// Consumed into a `Chain` once training is done.
pub mod chain_builder;

/// Generation settings (step bound, sentences per `generate_many`).
pub mod generation_config;

/// Sentence generation over a trained `Chain`.
mod generator;

/// Process-wide sentence ends table and termination rules.
pub mod punctuation;

/// Insertion-ordered weighted values supporting weighted random draws.
pub mod weighted;
