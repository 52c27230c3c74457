//! Training: transition counting, start/end words, rejected samples.

use bertrand_core::model::weighted::WeightedElement;
use bertrand_core::{Chain, ChainBuilder, ChainError, LoadPolicy, Successor};

fn word(w: &str) -> Successor {
	Successor::Word(w.to_owned())
}

fn weight(chain: &Chain, from: &str, to: &Successor) -> Option<f64> {
	chain.successors(from)?.get(to).map(WeightedElement::weight)
}

fn train(samples: &[&str]) -> Chain {
	let mut builder = ChainBuilder::new();
	builder.add_samples(samples).unwrap();
	builder.build()
}

#[test]
fn test_cat_and_dog_scenario() {
	let chain = train(&["the cat sat on the mat.", "the dog ran in the park!"]);

	assert_eq!(chain.start_words(), ["the"]);
	assert!(chain.is_start_word("the"));

	assert_eq!(weight(&chain, "the", &word("cat")), Some(1.0));
	assert_eq!(weight(&chain, "the", &word("dog")), Some(1.0));
	assert_eq!(weight(&chain, "the", &word("mat.")), Some(1.0));
	assert_eq!(weight(&chain, "the", &word("park!")), Some(1.0));
	assert_eq!(chain.successors("the").unwrap().len(), 4);

	assert!(chain.end_words().contains("mat."));
	assert!(chain.end_words().contains("park!"));
	assert_eq!(chain.end_words().len(), 2);

	assert_eq!(weight(&chain, "mat.", &Successor::End), Some(1.0));
	assert_eq!(weight(&chain, "park!", &Successor::End), Some(1.0));
}

#[test]
fn test_two_token_sample_is_rejected() {
	let mut builder = ChainBuilder::new();
	let err = builder.add_sample("hi there").unwrap_err();
	assert!(matches!(err, ChainError::InputTooShort { tokens: 2, .. }));

	let chain = builder.build();
	assert!(chain.is_empty());
	assert!(chain.transitions().is_empty());
	assert!(chain.end_words().is_empty());
}

#[test]
fn test_whitespace_only_tokens_do_not_count() {
	let mut builder = ChainBuilder::new();
	assert!(builder.add_sample("  hi \t\n there \r\n").is_err());
	assert!(builder.add_sample("hi  there\tfriend\n").is_ok());

	let chain = builder.build();
	assert_eq!(weight(&chain, "hi", &word("there")), Some(1.0));
	assert_eq!(weight(&chain, "friend", &Successor::End), Some(1.0));
}

#[test]
fn test_end_word_mid_sample_is_not_linked_forward() {
	let chain = train(&["I agree. you are right"]);

	let successors = chain.successors("agree.").unwrap();
	assert_eq!(successors.len(), 1);
	assert!(successors.get(&Successor::End).is_some());
	assert!(successors.get(&word("you")).is_none());

	// The sentence after the stop is still trained, but "you" is not a start word
	assert_eq!(weight(&chain, "you", &word("are")), Some(1.0));
	assert_eq!(weight(&chain, "right", &Successor::End), Some(1.0));
	assert_eq!(chain.start_words(), ["I"]);
}

#[test]
fn test_repeated_pairs_accumulate_weight() {
	let chain = train(&["go go go go", "go go stop"]);

	assert_eq!(weight(&chain, "go", &word("go")), Some(4.0));
	assert_eq!(weight(&chain, "go", &word("stop")), Some(1.0));
	assert_eq!(weight(&chain, "go", &Successor::End), Some(1.0));
	assert_eq!(chain.successors("go").unwrap().total_weight(), 6.0);
}

#[test]
fn test_start_words_keep_first_seen_order() {
	let chain = train(&["b x y", "a x y", "b z y", "c x y"]);
	assert_eq!(chain.start_words(), ["b", "a", "c"]);
}

#[test]
fn test_skip_policy_keeps_valid_samples() {
	let mut builder = ChainBuilder::new();
	let report = builder.add_samples(["one two three", "nope", "four five six"]).unwrap();
	assert_eq!((report.accepted, report.rejected), (2, 1));

	let chain = builder.build();
	assert_eq!(chain.start_words(), ["one", "four"]);
}

#[test]
fn test_abort_policy_stops_on_first_invalid_sample() {
	let mut builder = ChainBuilder::new().policy(LoadPolicy::AbortOnInvalid);
	let err = builder
		.add_samples(["one two three", "nope", "four five six"])
		.unwrap_err();
	assert_eq!(err, ChainError::InputTooShort { sample: "nope".to_owned(), tokens: 1 });

	let chain = builder.build();
	assert_eq!(chain.start_words(), ["one"]);
	assert!(chain.successors("four").is_none());
}

#[test]
fn test_identical_inputs_build_identical_chains() {
	let samples = [
		"the cat sat on the mat.",
		"the dog ran in the park!",
		"did the cat see the dog? it did",
	];
	assert_eq!(train(&samples), train(&samples));
}

#[test]
fn test_training_order_only_changes_ordering() {
	let samples = ["the cat sat.", "the dog ran far", "a cat ran."];
	let forward = train(&samples);
	let mut reversed = samples;
	reversed.reverse();
	let backward = train(&reversed);

	assert!(forward.same_model(&backward));
	assert_ne!(forward, backward);
	assert_ne!(forward.start_words(), backward.start_words());
}

#[test]
fn test_sentinel_is_never_a_key() {
	let chain = train(&["END_WORD is just a word", "and so is END_WORD"]);

	assert_eq!(weight(&chain, "END_WORD", &word("is")), Some(1.0));
	assert_eq!(weight(&chain, "END_WORD", &Successor::End), Some(1.0));
	assert_eq!(weight(&chain, "is", &word("END_WORD")), Some(1.0));
}
