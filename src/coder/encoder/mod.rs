mod arena;
mod container;

use tracing::{debug, trace};

use crate::coder::{CodingPath, Encode, NullStrategy, Result, UserInfo, Value};

use self::arena::{Arena, EncodedValue, NodeRef};

pub use self::container::{KeyedEncodingContainer, SingleValueEncodingContainer, UnkeyedEncodingContainer};

/// Per-call configuration for encoding.
#[derive(Debug, Clone, Default)]
pub struct EncodeOptions {
	/// Representation written for null values.
	pub null_strategy: NullStrategy,
	/// Read-only context visible to every `Encode` implementation.
	pub user_info: UserInfo,
}

impl EncodeOptions {
	/// Preset for stores that cannot hold null, using the `"$null"` marker.
	pub fn for_plist() -> Self {
		Self {
			null_strategy: NullStrategy::string_null(),
			user_info: UserInfo::new(),
		}
	}
}

/// Encode `value` into a dynamic tree with default options.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Result<Value> {
	encode_value(value, &EncodeOptions::default())
}

/// Encode `value` into a dynamic tree.
///
/// A null root under [`NullStrategy::Omit`] yields `Value::Null`.
pub fn encode_value<T: Encode + ?Sized>(value: &T, options: &EncodeOptions) -> Result<Value> {
	trace!(null_strategy = options.null_strategy.label(), "encode start");

	let mut arena = Arena::default();
	let root = arena.alloc_slot();
	let mut encoder = Encoder::new(&mut arena, root, CodingPath::root(), options);
	if let Err(err) = value.encode(&mut encoder) {
		debug!(path = ?err.path().map(ToString::to_string), error = %err, "encode failed");
		return Err(err);
	}

	let resolved = arena.resolve(&EncodedValue::Pending(NodeRef::Encoder(root)), &options.null_strategy);
	Ok(resolved.unwrap_or(Value::Null))
}

/// Encoding context handed to [`Encode::encode`].
///
/// An encoder owns a single container slot: exactly one of
/// [`container`](Self::container), [`unkeyed_container`](Self::unkeyed_container)
/// or [`single_value_container`](Self::single_value_container) may be called.
/// An encoder that never installs a container produces an empty map.
pub struct Encoder<'a> {
	arena: &'a mut Arena,
	slot: usize,
	path: CodingPath,
	options: &'a EncodeOptions,
}

impl<'a> Encoder<'a> {
	pub(crate) fn new(arena: &'a mut Arena, slot: usize, path: CodingPath, options: &'a EncodeOptions) -> Self {
		Self { arena, slot, path, options }
	}

	/// Location of the value being encoded.
	pub fn coding_path(&self) -> &CodingPath {
		&self.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &UserInfo {
		&self.options.user_info
	}

	/// Null representation in effect.
	pub fn null_strategy(&self) -> &NullStrategy {
		&self.options.null_strategy
	}

	/// Install a keyed (map) container.
	///
	/// # Panics
	///
	/// Panics if this encoder already has a container.
	pub fn container(&mut self) -> KeyedEncodingContainer<'_> {
		let node = self.arena.alloc_keyed();
		self.install(NodeRef::Keyed(node));
		KeyedEncodingContainer::new(self.arena, node, self.path.clone(), self.options)
	}

	/// Install an unkeyed (sequence) container.
	///
	/// # Panics
	///
	/// Panics if this encoder already has a container.
	pub fn unkeyed_container(&mut self) -> UnkeyedEncodingContainer<'_> {
		let node = self.arena.alloc_unkeyed();
		self.install(NodeRef::Unkeyed(node));
		UnkeyedEncodingContainer::new(self.arena, node, self.path.clone(), self.options)
	}

	/// Install a single-value container.
	///
	/// # Panics
	///
	/// Panics if this encoder already has a container.
	pub fn single_value_container(&mut self) -> SingleValueEncodingContainer<'_> {
		let node = self.arena.alloc_slot();
		self.install(NodeRef::Single(node));
		SingleValueEncodingContainer::new(self.arena, node, self.path.clone(), self.options)
	}

	fn install(&mut self, node: NodeRef) {
		let slot = self.arena.slot_mut(self.slot);
		assert!(slot.is_none(), "encoder at {} already owns a top-level container", self.path);
		*slot = Some(EncodedValue::Pending(node));
	}
}

/// Encode a non-scalar value through a fresh child encoder.
pub(crate) fn encode_nested<T: Encode + ?Sized>(arena: &mut Arena, path: CodingPath, options: &EncodeOptions, value: &T) -> Result<EncodedValue> {
	let slot = arena.alloc_slot();
	let mut encoder = Encoder::new(arena, slot, path, options);
	value.encode(&mut encoder)?;
	Ok(EncodedValue::Pending(NodeRef::Encoder(slot)))
}

/// Stored form of `value` at `path`: resolved for scalars, pending otherwise.
pub(crate) fn encode_child<T: Encode + ?Sized>(arena: &mut Arena, path: impl FnOnce() -> CodingPath, options: &EncodeOptions, value: &T) -> Result<EncodedValue> {
	match value.scalar_value() {
		Some(Value::Null) => Ok(EncodedValue::Null),
		Some(scalar) => Ok(EncodedValue::Resolved(scalar)),
		None => encode_nested(arena, path(), options, value),
	}
}
