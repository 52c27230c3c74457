/// Chain training and weighted-collection errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ChainError {
	#[error("input '{sample}' is too short: {tokens} tokens, at least 3 required")]
	InputTooShort { sample: String, tokens: usize },

	#[error("value {value} is already present in the collection")]
	DuplicateValue { value: String },

	#[error("value {value} not found in the collection")]
	NotFound { value: String },

	#[error("invalid weight {weight} for value {value}: weights must be finite and strictly positive")]
	InvalidWeight { value: String, weight: f64 },
}

/// Generation settings errors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
	#[error("max steps must be at least 1")]
	ZeroMaxSteps,

	#[error("invalid sentence range {min}..={max}: min must be >= 1 and <= max")]
	InvalidSentenceRange { min: usize, max: usize },
}

/// Message store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
	#[error("store I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("store snapshot error: {0}")]
	Serialization(#[from] postcard::Error),

	#[error("store lock poisoned")]
	Poisoned,
}

/// Errors raised while loading a chain from a message store.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error(transparent)]
	Store(#[from] StoreError),

	#[error(transparent)]
	Chain(#[from] ChainError),
}
