use std::sync::LazyLock;

use rand::Rng;

use super::weighted::{WeightedCollection, WeightedElement};

/// Appended when the punctuation draw unexpectedly yields nothing.
///
/// The table is never empty, so seeing this in output means a bug.
pub const NO_PUNCTUATION_MARKER: &str = "@@@@@@@";

/// Suffixes that make a token an end word.
pub const SENTENCE_STOPS: [char; 3] = ['.', '!', '?'];

/// Trailing characters that already terminate a generated sentence.
pub const TERMINAL_CHARS: &[char] = &[
	'.', '!', '?', '`', '+', '>', '-', '=', '_', ':', '@', '~', ';', '\'', '#', '[', ']', '{', '}',
	'(', ')', '/', '|', '\\',
];

/// Sentence endings with frequencies measured on a sample of user messages.
static SENTENCE_ENDS: LazyLock<WeightedCollection<&'static str>> = LazyLock::new(|| {
	let mut collection = WeightedCollection::new();
	for (symbol, probability) in [
		(".", 0.4369),
		("!", 0.1660),
		("?", 0.2733),
		("!!", 0.0132),
		("??", 0.0114),
		("!?", 0.0027),
		("...", 0.0965),
	] {
		// Impossible to panic, symbols are distinct
		collection.add(WeightedElement::new(symbol, probability)).unwrap();
	}
	collection
});

/// Returns the process-wide punctuation table.
pub fn sentence_ends() -> &'static WeightedCollection<&'static str> {
	&SENTENCE_ENDS
}

/// Returns `true` if the token ends with `.`, `!` or `?`.
pub fn is_end_word(word: &str) -> bool {
	word.ends_with(SENTENCE_STOPS)
}

/// Returns `true` if the sentence already ends with a terminal character.
///
/// An empty sentence is considered terminated.
pub fn is_terminated(sentence: &str) -> bool {
	sentence.chars().next_back().is_none_or(|c| TERMINAL_CHARS.contains(&c))
}

/// Appends a punctuation mark drawn from the table if the sentence is not terminated.
pub fn terminate<R: Rng>(mut sentence: String, rng: &mut R) -> String {
	if is_terminated(&sentence) {
		return sentence;
	}

	match sentence_ends().draw_random(rng) {
		Some(end) => sentence.push_str(end.value()),
		None => {
			log::error!("No punctuation drawn for '{}'", sentence);
			sentence.push_str(NO_PUNCTUATION_MARKER);
		}
	}
	sentence
}
