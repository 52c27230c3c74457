use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default bound on the number of transitions walked for one sentence.
pub const DEFAULT_MAX_STEPS: usize = 256;

/// Settings used when generating text from a [`Chain`](super::chain::Chain).
///
/// # Invariants (checked by [`validate`](Self::validate))
/// - `max_steps >= 1`
/// - `1 <= min_sentences <= max_sentences`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
	/// Maximum number of words appended after the start word.
	/// Guards against cycles that never reach an end word.
	pub max_steps: usize,

	/// Minimum number of sentences produced by `generate_many`.
	pub min_sentences: usize,

	/// Maximum number of sentences produced by `generate_many` (inclusive).
	pub max_sentences: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			max_steps: DEFAULT_MAX_STEPS,
			min_sentences: 1,
			max_sentences: 5,
		}
	}
}

impl GenerationConfig {
	/// Checks the invariants of the settings.
	///
	/// # Errors
	/// Returns the first violated invariant.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_steps == 0 {
			return Err(ConfigError::ZeroMaxSteps);
		}
		if self.min_sentences == 0 || self.min_sentences > self.max_sentences {
			return Err(ConfigError::InvalidSentenceRange {
				min: self.min_sentences,
				max: self.max_sentences,
			});
		}
		Ok(())
	}

	/// Sets the number of sentences range for `generate_many`.
	///
	/// # Errors
	/// Returns an error if the range is empty or starts at 0.
	pub fn set_sentence_range(&mut self, min: usize, max: usize) -> Result<(), ConfigError> {
		if min == 0 || min > max {
			return Err(ConfigError::InvalidSentenceRange { min, max });
		}
		self.min_sentences = min;
		self.max_sentences = max;
		Ok(())
	}

	/// Sets the step bound of a single sentence.
	///
	/// # Errors
	/// Returns an error if `max_steps` is 0.
	pub fn set_max_steps(&mut self, max_steps: usize) -> Result<(), ConfigError> {
		if max_steps == 0 {
			return Err(ConfigError::ZeroMaxSteps);
		}
		self.max_steps = max_steps;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_valid() {
		assert_eq!(GenerationConfig::default().validate(), Ok(()));
	}

	#[test]
	fn setters_reject_invalid_values() {
		let mut config = GenerationConfig::default();
		assert_eq!(config.set_max_steps(0), Err(ConfigError::ZeroMaxSteps));
		assert!(config.set_sentence_range(0, 3).is_err());
		assert!(config.set_sentence_range(4, 2).is_err());
		assert_eq!(config, GenerationConfig::default());

		config.set_sentence_range(2, 2).unwrap();
		assert_eq!((config.min_sentences, config.max_sentences), (2, 2));
	}
}
