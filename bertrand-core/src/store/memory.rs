use std::sync::RwLock;

use crate::error::StoreError;
use super::{MessageStore, StoreState, UserId, UserRegistry};

/// Volatile store, mostly useful for tests and one-shot corpora.
#[derive(Debug, Default)]
pub struct MemoryStore {
	state: RwLock<StoreState>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl MessageStore for MemoryStore {
	fn messages_for_users(&self, user_ids: &[UserId]) -> Result<Vec<String>, StoreError> {
		let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
		Ok(state.messages_for_users(user_ids))
	}

	fn add_message(&self, user_id: UserId, message: &str) -> Result<(), StoreError> {
		let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
		state.add_message(user_id, message);
		Ok(())
	}
}

impl UserRegistry for MemoryStore {
	fn is_opted_in(&self, user_id: UserId) -> Result<bool, StoreError> {
		let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
		Ok(state.is_opted_in(user_id))
	}

	fn opt_in(&self, user_id: UserId) -> Result<(), StoreError> {
		let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
		state.opt_in(user_id);
		Ok(())
	}

	fn delete_user(&self, user_id: UserId) -> Result<usize, StoreError> {
		let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
		Ok(state.delete_user(user_id))
	}
}
