use kvcoder::coder::{CodingError, Decode, DecodeOptions, Encode, EncodeOptions, decode_value, encode_value};
use tracing::trace;

use crate::{KeyValueStore, Result, StoreError};

/// Typed entry access for any [`KeyValueStore`].
pub trait CodableStore: KeyValueStore {
	/// Encode `value` with default options and store it under `key`.
	fn encode_entry<T: Encode + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
		self.encode_entry_with(key, value, &EncodeOptions::default())
	}

	/// Encode `value` and store it under `key`.
	fn encode_entry_with<T: Encode + ?Sized>(&mut self, key: &str, value: &T, options: &EncodeOptions) -> Result<()> {
		let encoded = encode_value(value, options).map_err(|source| coding(key, source))?;
		trace!(key, kind = encoded.kind_name(), "entry encoded");
		self.set(key.to_owned(), encoded);
		Ok(())
	}

	/// Store `value` under `key`, or remove the entry when it is `None`.
	fn encode_optional_entry<T: Encode + ?Sized>(&mut self, key: &str, value: Option<&T>) -> Result<()> {
		self.encode_optional_entry_with(key, value, &EncodeOptions::default())
	}

	/// Like [`encode_optional_entry`](Self::encode_optional_entry) with explicit options.
	fn encode_optional_entry_with<T: Encode + ?Sized>(&mut self, key: &str, value: Option<&T>, options: &EncodeOptions) -> Result<()> {
		match value {
			Some(value) => self.encode_entry_with(key, value, options),
			None => {
				self.remove(key);
				Ok(())
			}
		}
	}

	/// Decode the entry under `key` with default options.
	fn decode_entry<T: Decode>(&self, key: &str) -> Result<T> {
		self.decode_entry_with(key, &DecodeOptions::default())
	}

	/// Decode the entry under `key`; a missing entry is [`StoreError::Missing`].
	fn decode_entry_with<T: Decode>(&self, key: &str, options: &DecodeOptions) -> Result<T> {
		match self.decode_optional_entry_with(key, options)? {
			Some(value) => Ok(value),
			None => Err(StoreError::Missing { key: key.to_owned() }),
		}
	}

	/// Decode the entry under `key`, or `None` when there is no entry.
	fn decode_optional_entry<T: Decode>(&self, key: &str) -> Result<Option<T>> {
		self.decode_optional_entry_with(key, &DecodeOptions::default())
	}

	/// Like [`decode_optional_entry`](Self::decode_optional_entry) with explicit options.
	fn decode_optional_entry_with<T: Decode>(&self, key: &str, options: &DecodeOptions) -> Result<Option<T>> {
		let Some(value) = self.get(key) else {
			trace!(key, "entry missing");
			return Ok(None);
		};
		decode_value(value, options).map(Some).map_err(|source| coding(key, source))
	}
}

impl<S: KeyValueStore + ?Sized> CodableStore for S {}

fn coding(key: &str, source: CodingError) -> StoreError {
	StoreError::Coding { key: key.to_owned(), source }
}
