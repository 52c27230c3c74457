use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use bertrand_core::{GenerationConfig, LoadPolicy};
use serde::Deserialize;

/// Environment variable pointing to the configuration file.
pub const CONFIG_ENV: &str = "BERTRAND_CONFIG";

/// Configuration file used when `BERTRAND_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "./bertrand.toml";

/// Server settings, read from a TOML file.
///
/// Every field is optional in the file; missing ones take their default.
///
/// ```toml
/// host = "0.0.0.0"
/// port = 5000
/// store_path = "./data/bertrand.bin"
/// load_policy = "skip_invalid"
///
/// [generation]
/// max_steps = 128
/// min_sentences = 1
/// max_sentences = 3
/// ```
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Number of HTTP workers, one per CPU by default.
	pub workers: usize,
	/// Postcard snapshot of stored messages and opt-in flags.
	pub store_path: PathBuf,
	/// Origin allowed by CORS. Any origin is allowed when unset.
	pub allowed_origin: Option<String>,
	pub load_policy: LoadPolicy,
	pub generation: GenerationConfig,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			workers: num_cpus::get(),
			store_path: PathBuf::from("./data/bertrand.bin"),
			allowed_origin: None,
			load_policy: LoadPolicy::default(),
			generation: GenerationConfig::default(),
		}
	}
}

impl ServerConfig {
	/// Loads the configuration from `BERTRAND_CONFIG` or `./bertrand.toml`.
	///
	/// Falls back to the defaults if the file does not exist.
	///
	/// # Errors
	/// Returns an error if the file exists but is unreadable or invalid.
	pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
		let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
		let path = Path::new(&path);
		if !path.exists() {
			log::info!("No configuration at {}, using defaults", path.display());
			return Ok(Self::default());
		}
		Self::from_toml(&fs::read_to_string(path)?)
	}

	/// Parses and validates a TOML configuration.
	///
	/// # Errors
	/// Returns an error if the TOML is malformed or the generation settings are invalid.
	pub fn from_toml(contents: &str) -> Result<Self, Box<dyn std::error::Error>> {
		let config: Self = toml::from_str(contents)?;
		config.generation.validate()?;
		if config.workers == 0 {
			return Err("workers must be at least 1".into());
		}
		Ok(config)
	}
}
