use std::collections::{HashMap, HashSet};

use crate::error::LoadError;
use crate::store::{MessageStore, UserId};
use super::chain_builder::{ChainBuilder, LoadPolicy};
use super::generation_config::GenerationConfig;
use super::weighted::WeightedCollection;

/// A successor of a word in the transition map.
///
/// `End` is the sentinel meaning "a training sample ended after this word".
/// It is never a key of the transition map, only a successor value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Successor {
	Word(String),
	End,
}

impl Successor {
	/// Returns the word, or `None` for the end sentinel.
	pub fn as_word(&self) -> Option<&str> {
		match self {
			Successor::Word(word) => Some(word),
			Successor::End => None,
		}
	}
}

/// A trained first-order Markov chain over words.
///
/// A `Chain` is only obtained from a finished [`ChainBuilder`] (or from
/// [`Chain::load`]) and is never mutated afterwards, so generation only needs
/// `&self` and can run from many threads at once.
///
/// ## Invariants
/// - Every successor collection in `transitions` is non-empty
/// - `start_words` holds each start word once, in first-seen order
/// - `start_set` mirrors `start_words` for membership tests
///
/// `==` also compares the order of start words and successors, which depends
/// on the order samples were trained in. Use [`same_model`](Self::same_model)
/// to compare chains trained on the same samples in any order.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
	pub(crate) transitions: HashMap<String, WeightedCollection<Successor>>,
	pub(crate) start_words: Vec<String>,
	pub(crate) start_set: HashSet<String>,
	pub(crate) end_words: HashSet<String>,
	pub(crate) config: GenerationConfig,
}

impl Chain {
	/// Loads the messages of the given users from `store` and trains a chain.
	///
	/// Invalid samples are skipped, and the default [`GenerationConfig`] is used.
	///
	/// # Errors
	/// Returns an error if the store query fails.
	pub fn load(store: &dyn MessageStore, user_ids: &[UserId]) -> Result<Self, LoadError> {
		Self::load_with(store, user_ids, LoadPolicy::default(), GenerationConfig::default())
	}

	/// Same as [`load`](Self::load) with an explicit policy and generation config.
	///
	/// # Errors
	/// - Returns an error if the store query fails.
	/// - With [`LoadPolicy::AbortOnInvalid`], returns the first training error.
	pub fn load_with(
		store: &dyn MessageStore,
		user_ids: &[UserId],
		policy: LoadPolicy,
		config: GenerationConfig,
	) -> Result<Self, LoadError> {
		let inputs = store.messages_for_users(user_ids)?;

		let mut builder = ChainBuilder::new().policy(policy).config(config);
		let report = builder.add_samples(&inputs)?;
		log::info!(
			"Loaded chain for {:?} ({} samples, {} rejected)",
			user_ids,
			report.accepted,
			report.rejected
		);

		Ok(builder.build())
	}

	/// Returns `true` if the chain has no start word, i.e. nothing can be generated.
	pub fn is_empty(&self) -> bool {
		self.start_words.is_empty()
	}

	/// Returns the successors observed after `word`.
	pub fn successors(&self, word: &str) -> Option<&WeightedCollection<Successor>> {
		self.transitions.get(word)
	}

	/// Returns the full transition map.
	pub fn transitions(&self) -> &HashMap<String, WeightedCollection<Successor>> {
		&self.transitions
	}

	/// Start words, in first-seen order.
	pub fn start_words(&self) -> &[String] {
		&self.start_words
	}

	pub fn is_start_word(&self, word: &str) -> bool {
		self.start_set.contains(word)
	}

	pub fn end_words(&self) -> &HashSet<String> {
		&self.end_words
	}

	pub fn config(&self) -> &GenerationConfig {
		&self.config
	}

	/// Returns `true` if both chains hold the same transitions with the same
	/// weights, the same start and end words, and the same config.
	///
	/// Unlike `==`, insertion order is ignored.
	pub fn same_model(&self, other: &Self) -> bool {
		self.transitions.len() == other.transitions.len()
			&& self.transitions.iter().all(|(word, successors)| {
				other
					.transitions
					.get(word)
					.is_some_and(|o| successors.same_weights(o))
			})
			&& self.start_set == other.start_set
			&& self.end_words == other.end_words
			&& self.config == other.config
	}
}
