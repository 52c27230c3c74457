//! Handlers for the chat events that keep the message store in sync.

use crate::error::StoreError;
use crate::model::chain_builder::{MIN_TOKENS, tokenize};
use crate::store::{MessageStore, UserId, UserRegistry};

/// Outcome of a received message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intake {
	Stored,
	/// The author has not opted in.
	NotOptedIn,
	/// The message is too short to ever be a training sample.
	TooShort,
}

/// Stores a message if its author opted in and it can be used for training.
pub fn on_message(
	store: &dyn MessageStore,
	registry: &dyn UserRegistry,
	user_id: UserId,
	message: &str,
) -> Result<Intake, StoreError> {
	if !registry.is_opted_in(user_id)? {
		return Ok(Intake::NotOptedIn);
	}
	if tokenize(message).len() < MIN_TOKENS {
		log::debug!("Ignoring short message from {}", user_id);
		return Ok(Intake::TooShort);
	}

	store.add_message(user_id, message)?;
	Ok(Intake::Stored)
}

/// Deletes all data of a user leaving the server, if they had opted in.
///
/// Returns `true` if the user was opted in and their data was deleted.
pub fn on_member_leave(registry: &dyn UserRegistry, user_id: UserId) -> Result<bool, StoreError> {
	if !registry.is_opted_in(user_id)? {
		return Ok(false);
	}

	log::info!("User {} left the server.", user_id);
	let deleted = registry.delete_user(user_id)?;
	log::debug!("Deleted {} messages of {}", deleted, user_id);
	Ok(true)
}
