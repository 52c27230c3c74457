use std::collections::HashMap;

use bertrand_core::model::chain_builder::tokenize;
use bertrand_core::model::punctuation::{TERMINAL_CHARS, is_end_word};
use bertrand_core::{ChainBuilder, Successor};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn sample() -> impl Strategy<Value = String> {
	prop::collection::vec("[a-d]{1,3}[.!?]?", 3..12).prop_map(|words| words.join(" "))
}

/// Counts the (word, successor) pairs a sample should contribute.
fn expected_pairs(samples: &[String]) -> HashMap<(String, Successor), f64> {
	let mut pairs = HashMap::new();
	for sample in samples {
		let tokens = tokenize(sample);
		for (i, word) in tokens.iter().enumerate() {
			let successor = if is_end_word(word) || i == tokens.len() - 1 {
				Successor::End
			} else {
				Successor::Word(tokens[i + 1].to_owned())
			};
			*pairs.entry(((*word).to_owned(), successor)).or_insert(0.0) += 1.0;
		}
	}
	pairs
}

proptest! {
	#[test]
	fn transition_weights_equal_observed_pairs(samples in prop::collection::vec(sample(), 1..8)) {
		let mut builder = ChainBuilder::new();
		builder.add_samples(&samples).unwrap();
		let chain = builder.build();

		let expected = expected_pairs(&samples);
		let mut recorded = 0;
		for (word, successors) in chain.transitions() {
			for element in successors.iter() {
				let key = (word.clone(), element.value().clone());
				prop_assert_eq!(expected.get(&key).copied(), Some(element.weight()));
				recorded += 1;
			}
		}
		prop_assert_eq!(recorded, expected.len());
	}

	#[test]
	fn generated_sentences_are_terminated(samples in prop::collection::vec(sample(), 1..8), seed in any::<u64>()) {
		let mut builder = ChainBuilder::new();
		builder.add_samples(&samples).unwrap();
		let chain = builder.build();
		let mut rng = StdRng::seed_from_u64(seed);

		for _ in 0..20 {
			let sentence = chain.generate_one_with(&mut rng);
			let last = sentence.chars().last().unwrap();
			prop_assert!(TERMINAL_CHARS.contains(&last));
		}
	}

	#[test]
	fn builds_are_idempotent(samples in prop::collection::vec(sample(), 1..8)) {
		let build = || {
			let mut builder = ChainBuilder::new();
			builder.add_samples(&samples).unwrap();
			builder.build()
		};
		prop_assert_eq!(build(), build());
	}

	#[test]
	fn training_order_does_not_change_the_model(samples in prop::collection::vec(sample(), 1..8)) {
		let mut forward = ChainBuilder::new();
		forward.add_samples(&samples).unwrap();
		let mut backward = ChainBuilder::new();
		backward.add_samples(samples.iter().rev()).unwrap();

		prop_assert!(forward.build().same_model(&backward.build()));
	}
}
