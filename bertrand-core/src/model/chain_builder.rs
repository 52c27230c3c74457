use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use super::chain::{Chain, Successor};
use super::generation_config::GenerationConfig;
use super::punctuation::is_end_word;
use super::weighted::WeightedCollection;

/// Minimum number of tokens a training sample must contain.
pub const MIN_TOKENS: usize = 3;

/// How a batch of samples reacts to a sample that is too short.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPolicy {
	/// Log the offending sample and keep training on the rest.
	#[default]
	SkipInvalid,
	/// Stop on the first offending sample and return its error.
	AbortOnInvalid,
}

/// Outcome of training on a batch of samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrainingReport {
	pub accepted: usize,
	pub rejected: usize,
}

/// Splits a sample on runs of whitespace, dropping empty tokens.
pub fn tokenize(sample: &str) -> Vec<&str> {
	sample.split_whitespace().collect()
}

/// Accumulates training samples into the state of a [`Chain`].
///
/// # Responsibilities
/// - Tokenize samples and reject those shorter than [`MIN_TOKENS`]
/// - Count word -> successor transitions
/// - Collect start words (first token) and end words (`.`, `!`, `?` suffix)
///
/// The builder is consumed by [`build`](Self::build), so a chain can never be
/// observed half-trained.
#[derive(Debug, Default)]
pub struct ChainBuilder {
	transitions: HashMap<String, WeightedCollection<Successor>>,
	start_words: Vec<String>,
	start_set: HashSet<String>,
	end_words: HashSet<String>,
	policy: LoadPolicy,
	config: GenerationConfig,
}

impl ChainBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the policy applied by [`add_samples`](Self::add_samples).
	pub fn policy(mut self, policy: LoadPolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Sets the generation settings carried by the built chain.
	pub fn config(mut self, config: GenerationConfig) -> Self {
		self.config = config;
		self
	}

	/// Adds one sample to the chain.
	///
	/// - The first token is registered as a start word.
	/// - A token ending with `.`, `!` or `?` becomes an end word and
	///   transitions to [`Successor::End`]; it is not linked to the next token.
	/// - The last token transitions to [`Successor::End`].
	/// - Any other token transitions to the following token.
	///
	/// # Errors
	/// Returns [`ChainError::InputTooShort`] if the sample has fewer than
	/// [`MIN_TOKENS`] tokens. The chain is left untouched in that case.
	pub fn add_sample(&mut self, sample: &str) -> Result<(), ChainError> {
		let tokens = tokenize(sample);
		if tokens.len() < MIN_TOKENS {
			return Err(ChainError::InputTooShort {
				sample: sample.to_owned(),
				tokens: tokens.len(),
			});
		}

		let last = tokens.len() - 1;
		for (i, &word) in tokens.iter().enumerate() {
			if i == 0 && self.start_set.insert(word.to_owned()) {
				self.start_words.push(word.to_owned());
			}

			if is_end_word(word) {
				self.end_words.insert(word.to_owned());
				self.record(word, Successor::End);
				continue;
			}

			if i == last {
				self.record(word, Successor::End);
				break;
			}

			let next = tokens[i + 1];
			if next.is_empty() {
				continue;
			}
			self.record(word, Successor::Word(next.to_owned()));
		}

		Ok(())
	}

	/// Adds every sample, applying the configured [`LoadPolicy`] to invalid ones.
	///
	/// # Errors
	/// With [`LoadPolicy::AbortOnInvalid`], returns the first error met.
	/// Samples before it remain in the builder.
	pub fn add_samples<I, S>(&mut self, samples: I) -> Result<TrainingReport, ChainError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut report = TrainingReport::default();
		for sample in samples {
			match self.add_sample(sample.as_ref()) {
				Ok(()) => report.accepted += 1,
				Err(e) => match self.policy {
					LoadPolicy::SkipInvalid => {
						log::warn!("Skipping training sample: {}", e);
						report.rejected += 1;
					}
					LoadPolicy::AbortOnInvalid => return Err(e),
				},
			}
		}
		Ok(report)
	}

	/// Finishes training and returns the read-only chain.
	pub fn build(self) -> Chain {
		Chain {
			transitions: self.transitions,
			start_words: self.start_words,
			start_set: self.start_set,
			end_words: self.end_words,
			config: self.config,
		}
	}

	/// Records one occurrence of `word -> successor`.
	fn record(&mut self, word: &str, successor: Successor) {
		self.transitions
			.entry(word.to_owned())
			.or_default()
			.increment(successor);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tokenize_collapses_whitespace_runs() {
		assert_eq!(tokenize("  a \t b\r\n c \n"), vec!["a", "b", "c"]);
		assert!(tokenize(" \n ").is_empty());
	}

	#[test]
	fn rejected_sample_leaves_builder_untouched() {
		let mut builder = ChainBuilder::new();
		let err = builder.add_sample("hi there").unwrap_err();
		assert_eq!(err, ChainError::InputTooShort { sample: "hi there".to_owned(), tokens: 2 });

		let chain = builder.build();
		assert!(chain.is_empty());
		assert!(chain.transitions().is_empty());
	}

	#[test]
	fn first_token_is_start_and_end_word() {
		let mut builder = ChainBuilder::new();
		builder.add_sample("Hi! how are you").unwrap();
		let chain = builder.build();

		assert_eq!(chain.start_words(), ["Hi!"]);
		assert!(chain.end_words().contains("Hi!"));
		let successors = chain.successors("Hi!").unwrap();
		assert_eq!(successors.len(), 1);
		assert!(successors.get(&Successor::End).is_some());
		// "Hi!" is not linked to "how"
		assert!(successors.get(&Successor::Word("how".to_owned())).is_none());
	}
}
