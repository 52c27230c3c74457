//! Message stores feeding chain training.
//!
//! The chain only needs two capabilities from its surroundings:
//! - fetch every stored message of a set of users ([`MessageStore`])
//! - forget a user entirely ([`UserRegistry::delete_user`])
//!
//! Both [`MemoryStore`] and [`FileStore`] implement the two traits on top of
//! the same [`StoreState`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Numeric identifier of a chat user.
pub type UserId = u64;

/// Source of training samples.
pub trait MessageStore: Send + Sync {
	/// Returns the messages of every listed user.
	///
	/// Messages are grouped by user, in the order the ids are given (duplicate
	/// ids are only read once), then in insertion order.
	fn messages_for_users(&self, user_ids: &[UserId]) -> Result<Vec<String>, StoreError>;

	/// Stores one message for `user_id`.
	fn add_message(&self, user_id: UserId, message: &str) -> Result<(), StoreError>;
}

/// Per-user opt-in flags.
pub trait UserRegistry: Send + Sync {
	fn is_opted_in(&self, user_id: UserId) -> Result<bool, StoreError>;

	fn opt_in(&self, user_id: UserId) -> Result<(), StoreError>;

	/// Removes the opt-in flag and every stored message of `user_id`.
	///
	/// Returns the number of deleted messages.
	fn delete_user(&self, user_id: UserId) -> Result<usize, StoreError>;
}

/// Raw state shared by the store implementations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
	opted_in: BTreeSet<UserId>,
	messages: BTreeMap<UserId, Vec<String>>,
}

impl StoreState {
	pub(crate) fn messages_for_users(&self, user_ids: &[UserId]) -> Vec<String> {
		let mut seen = BTreeSet::new();
		user_ids
			.iter()
			.filter(|id| seen.insert(**id))
			.filter_map(|id| self.messages.get(id))
			.flatten()
			.cloned()
			.collect()
	}

	pub(crate) fn add_message(&mut self, user_id: UserId, message: &str) {
		self.messages.entry(user_id).or_default().push(message.to_owned());
	}

	pub(crate) fn is_opted_in(&self, user_id: UserId) -> bool {
		self.opted_in.contains(&user_id)
	}

	pub(crate) fn opt_in(&mut self, user_id: UserId) {
		self.opted_in.insert(user_id);
	}

	pub(crate) fn delete_user(&mut self, user_id: UserId) -> usize {
		self.opted_in.remove(&user_id);
		self.messages.remove(&user_id).map_or(0, |messages| messages.len())
	}
}
