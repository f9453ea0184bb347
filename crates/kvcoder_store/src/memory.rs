use std::collections::BTreeMap;

use kvcoder::coder::Value;

use crate::KeyValueStore;

/// In-memory store with sorted keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
	entries: BTreeMap<String, Value>,
}

impl MemoryStore {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the store has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Borrow every entry.
	pub fn entries(&self) -> &BTreeMap<String, Value> {
		&self.entries
	}
}

impl From<BTreeMap<String, Value>> for MemoryStore {
	fn from(entries: BTreeMap<String, Value>) -> Self {
		Self { entries }
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Option<&Value> {
		self.entries.get(key)
	}

	fn set(&mut self, key: String, value: Value) {
		self.entries.insert(key, value);
	}

	fn remove(&mut self, key: &str) -> Option<Value> {
		self.entries.remove(key)
	}

	fn keys(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}
}
