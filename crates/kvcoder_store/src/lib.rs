//! Key-value stores holding dynamic values, with typed access through `kvcoder`.

mod codable;
mod error;
mod file;
mod memory;

pub use codable::CodableStore;
pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

use kvcoder::coder::Value;

/// String-keyed storage of dynamic values.
pub trait KeyValueStore {
	/// Value stored under `key`.
	fn get(&self, key: &str) -> Option<&Value>;

	/// Store `value` under `key`, replacing any previous value.
	fn set(&mut self, key: String, value: Value);

	/// Remove and return the value under `key`.
	fn remove(&mut self, key: &str) -> Option<Value>;

	/// Every stored key in ascending order.
	fn keys(&self) -> Vec<&str>;
}
