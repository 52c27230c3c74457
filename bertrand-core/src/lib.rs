//! Word-level Markov chain library mimicking the phrasing of chat users.
//!
//! This crate provides:
//! - A first-order Markov chain trained on per-user message samples
//! - Weighted random generation of sentences with punctuation termination
//! - Message stores (in-memory and file-backed) with per-user opt-in
//! - Handlers for the chat events that feed and prune those stores
//!
//! The chain is never persisted: it is rebuilt from the stored messages on
//! each load.

/// Chain training, generation and sampling structures.
pub mod model;

/// Message stores and user registries.
pub mod store;

/// Chat event handlers (message intake, member departure).
pub mod events;

/// Error types.
pub mod error;

/// I/O utilities (corpus files, folder listing).
pub mod io;

pub use error::{ChainError, ConfigError, LoadError, StoreError};
pub use model::chain::{Chain, Successor};
pub use model::chain_builder::{ChainBuilder, LoadPolicy, TrainingReport};
pub use model::generation_config::GenerationConfig;
pub use store::UserId;
