use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockWriteGuard};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use super::{MessageStore, StoreState, UserId, UserRegistry};

/// Store persisted as a postcard snapshot.
///
/// - The snapshot is read once on [`open`](Self::open)
/// - Every mutation rewrites the whole snapshot through a temporary file
///   persisted over the target, so a crash never leaves a truncated file
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	state: RwLock<StoreState>,
}

impl FileStore {
	/// Opens the store at `path`, starting empty if the file does not exist yet.
	///
	/// # Errors
	/// Returns an error if the file exists but cannot be read or decoded.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
		let path = path.as_ref().to_path_buf();
		let state = if path.exists() {
			let bytes = fs::read(&path)?;
			postcard::from_bytes(&bytes)?
		} else {
			StoreState::default()
		};

		Ok(Self { path, state: RwLock::new(state) })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, StoreError> {
		self.state.write().map_err(|_| StoreError::Poisoned)
	}

	/// Applies `change` to a copy of the state and only keeps it once it is on disk.
	///
	/// A failed write leaves both the file and the in-memory state untouched.
	fn mutate<R>(&self, change: impl FnOnce(&mut StoreState) -> R) -> Result<R, StoreError> {
		let mut state = self.write()?;
		let mut next = state.clone();
		let result = change(&mut next);
		self.persist(&next)?;
		*state = next;
		Ok(result)
	}

	/// Writes the snapshot while the caller still holds the write lock.
	fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
		let parent = self
			.path
			.parent()
			.filter(|p| !p.as_os_str().is_empty())
			.unwrap_or_else(|| Path::new("."));
		fs::create_dir_all(parent)?;

		let bytes = postcard::to_stdvec(state)?;
		let mut temp_file = NamedTempFile::new_in(parent)?;
		temp_file.write_all(&bytes)?;
		temp_file.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
		Ok(())
	}
}

impl MessageStore for FileStore {
	fn messages_for_users(&self, user_ids: &[UserId]) -> Result<Vec<String>, StoreError> {
		let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
		Ok(state.messages_for_users(user_ids))
	}

	fn add_message(&self, user_id: UserId, message: &str) -> Result<(), StoreError> {
		self.mutate(|state| state.add_message(user_id, message))
	}
}

impl UserRegistry for FileStore {
	fn is_opted_in(&self, user_id: UserId) -> Result<bool, StoreError> {
		let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
		Ok(state.is_opted_in(user_id))
	}

	fn opt_in(&self, user_id: UserId) -> Result<(), StoreError> {
		self.mutate(|state| state.opt_in(user_id))
	}

	fn delete_user(&self, user_id: UserId) -> Result<usize, StoreError> {
		self.mutate(|state| state.delete_user(user_id))
	}
}
