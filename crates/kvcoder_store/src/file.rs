use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kvcoder::coder::Value;
use tracing::{debug, trace};

use crate::{KeyValueStore, MemoryStore, Result};

/// Store persisted as a JSON object of serialized values.
///
/// Changes stay in memory until [`flush`](Self::flush) writes the whole file
/// back through a temporary sibling and a rename.
#[derive(Debug)]
pub struct JsonFileStore {
	path: PathBuf,
	entries: MemoryStore,
	dirty: bool,
}

impl JsonFileStore {
	/// Load the store at `path`; a missing file opens as an empty store.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let entries = match fs::read(&path) {
			Ok(bytes) => serde_json::from_slice::<BTreeMap<String, Value>>(&bytes)?,
			Err(err) if err.kind() == ErrorKind::NotFound => BTreeMap::new(),
			Err(err) => return Err(err.into()),
		};
		debug!(path = %path.display(), entries = entries.len(), "store loaded");

		Ok(Self {
			path,
			entries: MemoryStore::from(entries),
			dirty: false,
		})
	}

	/// Backing file path.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Whether in-memory changes have not been flushed.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Write every entry back to disk.
	pub fn flush(&mut self) -> Result<()> {
		let bytes = serde_json::to_vec_pretty(self.entries.entries())?;
		let tmp = self.temp_path();
		if let Err(err) = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, &self.path)) {
			// Best effort; the original error is what the caller needs.
			let _ = fs::remove_file(&tmp);
			debug!(path = %self.path.display(), error = %err, "store flush failed");
			return Err(err.into());
		}
		self.dirty = false;
		debug!(path = %self.path.display(), entries = self.entries.len(), "store flushed");
		Ok(())
	}

	fn temp_path(&self) -> PathBuf {
		let mut name = self.path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
		name.push(".tmp");
		self.path.with_file_name(name)
	}
}

impl KeyValueStore for JsonFileStore {
	fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	fn set(&mut self, key: String, value: Value) {
		trace!(key = %key, "store set");
		self.entries.set(key, value);
		self.dirty = true;
	}

	fn remove(&mut self, key: &str) -> Option<Value> {
		let removed = self.entries.remove(key);
		self.dirty |= removed.is_some();
		removed
	}

	fn keys(&self) -> Vec<&str> {
		self.entries.keys()
	}
}
