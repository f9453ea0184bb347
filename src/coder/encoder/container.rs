use crate::coder::encoder::arena::{Arena, EncodedValue, NodeRef};
use crate::coder::encoder::{EncodeOptions, Encoder, encode_child};
use crate::coder::{CodingPath, Encode, Result, SUPER_KEY, UserInfo, Value};

/// Map-building container.
pub struct KeyedEncodingContainer<'a> {
	arena: &'a mut Arena,
	node: usize,
	path: CodingPath,
	options: &'a EncodeOptions,
}

impl<'a> KeyedEncodingContainer<'a> {
	pub(crate) fn new(arena: &'a mut Arena, node: usize, path: CodingPath, options: &'a EncodeOptions) -> Self {
		Self { arena, node, path, options }
	}

	/// Location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &UserInfo {
		&self.options.user_info
	}

	/// Store null under `key`.
	pub fn encode_nil(&mut self, key: &str) {
		self.store(key, EncodedValue::Null);
	}

	/// Store a resolved dynamic value under `key`.
	pub fn encode_value(&mut self, value: Value, key: &str) {
		self.store(key, resolved(value));
	}

	/// Encode `value` under `key`, replacing any earlier entry.
	pub fn encode<T: Encode + ?Sized>(&mut self, value: &T, key: &str) -> Result<()> {
		let encoded = encode_child(self.arena, || self.path.appending_key(key), self.options, value)?;
		self.store(key, encoded);
		Ok(())
	}

	/// Encode `value` under `key` only when it is present.
	pub fn encode_if_present<T: Encode + ?Sized>(&mut self, value: Option<&T>, key: &str) -> Result<()> {
		match value {
			Some(value) => self.encode(value, key),
			None => Ok(()),
		}
	}

	/// Create a map container stored under `key`.
	pub fn nested_container(&mut self, key: &str) -> KeyedEncodingContainer<'_> {
		let node = self.arena.alloc_keyed();
		self.store(key, EncodedValue::Pending(NodeRef::Keyed(node)));
		KeyedEncodingContainer::new(self.arena, node, self.path.appending_key(key), self.options)
	}

	/// Create a sequence container stored under `key`.
	pub fn nested_unkeyed_container(&mut self, key: &str) -> UnkeyedEncodingContainer<'_> {
		let node = self.arena.alloc_unkeyed();
		self.store(key, EncodedValue::Pending(NodeRef::Unkeyed(node)));
		UnkeyedEncodingContainer::new(self.arena, node, self.path.appending_key(key), self.options)
	}

	/// Child encoder stored under the reserved `"super"` key.
	pub fn super_encoder(&mut self) -> Encoder<'_> {
		self.super_encoder_for_key(SUPER_KEY)
	}

	/// Child encoder stored under `key`, for chained parent encoding.
	pub fn super_encoder_for_key(&mut self, key: &str) -> Encoder<'_> {
		let slot = self.arena.alloc_slot();
		self.store(key, EncodedValue::Pending(NodeRef::Encoder(slot)));
		Encoder::new(self.arena, slot, self.path.appending_key(key), self.options)
	}

	fn store(&mut self, key: &str, value: EncodedValue) {
		self.arena.keyed_mut(self.node).insert(key.to_owned(), value);
	}
}

/// Append-only sequence-building container.
pub struct UnkeyedEncodingContainer<'a> {
	arena: &'a mut Arena,
	node: usize,
	path: CodingPath,
	options: &'a EncodeOptions,
}

impl<'a> UnkeyedEncodingContainer<'a> {
	pub(crate) fn new(arena: &'a mut Arena, node: usize, path: CodingPath, options: &'a EncodeOptions) -> Self {
		Self { arena, node, path, options }
	}

	/// Location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &UserInfo {
		&self.options.user_info
	}

	/// Number of elements appended so far, including nulls.
	pub fn count(&self) -> usize {
		self.arena.unkeyed_len(self.node)
	}

	/// Append null.
	pub fn encode_nil(&mut self) {
		self.push(EncodedValue::Null);
	}

	/// Append a resolved dynamic value.
	pub fn encode_value(&mut self, value: Value) {
		self.push(resolved(value));
	}

	/// Append `value`.
	pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
		let index = self.count();
		let encoded = encode_child(self.arena, || self.path.appending_index(index), self.options, value)?;
		self.push(encoded);
		Ok(())
	}

	/// Append every item of `values` in order.
	pub fn encode_all<'v, T: Encode + 'v>(&mut self, values: impl IntoIterator<Item = &'v T>) -> Result<()> {
		for value in values {
			self.encode(value)?;
		}
		Ok(())
	}

	/// Append a map container.
	pub fn nested_container(&mut self) -> KeyedEncodingContainer<'_> {
		let path = self.path.appending_index(self.count());
		let node = self.arena.alloc_keyed();
		self.push(EncodedValue::Pending(NodeRef::Keyed(node)));
		KeyedEncodingContainer::new(self.arena, node, path, self.options)
	}

	/// Append a sequence container.
	pub fn nested_unkeyed_container(&mut self) -> UnkeyedEncodingContainer<'_> {
		let path = self.path.appending_index(self.count());
		let node = self.arena.alloc_unkeyed();
		self.push(EncodedValue::Pending(NodeRef::Unkeyed(node)));
		UnkeyedEncodingContainer::new(self.arena, node, path, self.options)
	}

	/// Append a child encoder.
	pub fn super_encoder(&mut self) -> Encoder<'_> {
		let path = self.path.appending_index(self.count());
		let slot = self.arena.alloc_slot();
		self.push(EncodedValue::Pending(NodeRef::Encoder(slot)));
		Encoder::new(self.arena, slot, path, self.options)
	}

	fn push(&mut self, value: EncodedValue) {
		self.arena.unkeyed_mut(self.node).push(value);
	}
}

/// Container holding at most one value; later writes replace earlier ones.
///
/// A container that is never written resolves as null.
pub struct SingleValueEncodingContainer<'a> {
	arena: &'a mut Arena,
	node: usize,
	path: CodingPath,
	options: &'a EncodeOptions,
}

impl<'a> SingleValueEncodingContainer<'a> {
	pub(crate) fn new(arena: &'a mut Arena, node: usize, path: CodingPath, options: &'a EncodeOptions) -> Self {
		Self { arena, node, path, options }
	}

	/// Location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &UserInfo {
		&self.options.user_info
	}

	/// Write null.
	pub fn encode_nil(&mut self) {
		self.set(EncodedValue::Null);
	}

	/// Write a resolved dynamic value.
	pub fn encode_value(&mut self, value: Value) {
		self.set(resolved(value));
	}

	/// Write `value`.
	pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
		let encoded = encode_child(self.arena, || self.path.clone(), self.options, value)?;
		self.set(encoded);
		Ok(())
	}

	fn set(&mut self, value: EncodedValue) {
		*self.arena.slot_mut(self.node) = Some(value);
	}
}

fn resolved(value: Value) -> EncodedValue {
	match value {
		Value::Null => EncodedValue::Null,
		value => EncodedValue::Resolved(value),
	}
}
