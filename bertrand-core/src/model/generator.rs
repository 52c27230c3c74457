use rand::Rng;

use super::chain::{Chain, Successor};
use super::punctuation;
use super::weighted::WeightedElement;

/// Why a walk over the chain stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Termination {
	/// The end sentinel was drawn.
	Sentinel,
	/// An end word was appended.
	EndWord,
	/// The current word has no successors.
	MissingSuccessors,
	/// `max_steps` words were appended without reaching an end.
	StepLimit,
}

impl Chain {
	/// Generates a single sentence using the thread-local generator.
	///
	/// See [`generate_one_with`](Self::generate_one_with).
	pub fn generate_one(&self) -> String {
		self.generate_one_with(&mut rand::rng())
	}

	/// Generates a single sentence.
	///
	/// # Behavior
	/// - Picks a start word uniformly at random.
	/// - Walks the transitions with weighted draws until the end sentinel is
	///   drawn, an end word is appended, the current word has no successors or
	///   the step limit is reached.
	/// - Joins the words with single spaces and appends a punctuation mark
	///   from the sentence ends table if the last character is not already
	///   terminal.
	///
	/// Returns an empty string if the chain is empty.
	pub fn generate_one_with<R: Rng>(&self, rng: &mut R) -> String {
		if self.start_words.is_empty() {
			return String::new();
		}

		let start = &self.start_words[rng.random_range(0..self.start_words.len())];
		let (words, termination) = self.walk(start, rng);
		if termination == Termination::StepLimit {
			log::warn!("Step limit of {} reached from '{}'", self.config.max_steps, start);
		}

		let sentence = punctuation::terminate(words.join(" "), rng);
		log::debug!("Generated: {}", sentence);
		sentence
	}

	/// Generates several sentences using the thread-local generator.
	///
	/// See [`generate_many_with`](Self::generate_many_with).
	pub fn generate_many(&self) -> String {
		self.generate_many_with(&mut rand::rng())
	}

	/// Generates between `min_sentences` and `max_sentences` sentences
	/// (1 to 5 by default) and joins them with a single space.
	pub fn generate_many_with<R: Rng>(&self, rng: &mut R) -> String {
		let min = self.config.min_sentences.max(1);
		let max = self.config.max_sentences.max(min);
		let count = rng.random_range(min..=max);

		(0..count)
			.map(|_| self.generate_one_with(rng))
			.collect::<Vec<_>>()
			.join(" ")
	}

	/// Walks the chain from `start`, returning the collected words and why the walk stopped.
	fn walk<'a, R: Rng>(&'a self, start: &'a str, rng: &mut R) -> (Vec<&'a str>, Termination) {
		let mut words = vec![start];
		let mut current = start;

		for _ in 0..self.config.max_steps {
			let Some(successors) = self.transitions.get(current) else {
				return (words, Termination::MissingSuccessors);
			};

			match successors.draw_random(rng).map(WeightedElement::value) {
				Some(Successor::Word(next)) => {
					words.push(next.as_str());
					current = next.as_str();
					if self.end_words.contains(next) {
						return (words, Termination::EndWord);
					}
				}
				Some(Successor::End) => return (words, Termination::Sentinel),
				// Unreachable for a built chain: successor collections are never empty
				None => return (words, Termination::MissingSuccessors),
			}
		}

		(words, Termination::StepLimit)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::chain_builder::ChainBuilder;
	use crate::model::generation_config::GenerationConfig;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn cycle_is_cut_by_step_limit() {
		let mut config = GenerationConfig::default();
		config.set_max_steps(10).unwrap();
		let mut builder = ChainBuilder::new().config(config);
		// "a" and "b" only ever follow each other except at the very end
		builder.add_sample("a b a b a b a b a b a b a b a b a b a b a b a b a b a b a b c").unwrap();
		let chain = builder.build();

		let mut rng = StdRng::seed_from_u64(7);
		let (words, termination) = chain.walk("a", &mut rng);
		assert!(words.len() <= 11);
		assert!(matches!(termination, Termination::StepLimit | Termination::Sentinel));
	}

	#[test]
	fn unknown_word_terminates_immediately() {
		let mut builder = ChainBuilder::new();
		builder.add_sample("one two three").unwrap();
		let chain = builder.build();

		let mut rng = StdRng::seed_from_u64(7);
		let (words, termination) = chain.walk("zzz", &mut rng);
		assert_eq!(words, vec!["zzz"]);
		assert_eq!(termination, Termination::MissingSuccessors);
	}

	#[test]
	fn single_path_is_reproduced() {
		let mut builder = ChainBuilder::new();
		builder.add_sample("one two three").unwrap();
		let chain = builder.build();

		let mut rng = StdRng::seed_from_u64(7);
		let sentence = chain.generate_one_with(&mut rng);
		assert!(sentence.starts_with("one two three"));
		assert!(punctuation::is_terminated(&sentence));
	}
}
