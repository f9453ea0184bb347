mod container;

use tracing::{debug, trace};

use crate::coder::diagnostics::{depth_exceeded, mismatch};
use crate::coder::{CodingPath, Decode, NullStrategy, Result, UserInfo, Value};

pub use self::container::{KeyedDecodingContainer, SingleValueDecodingContainer, UnkeyedDecodingContainer};

/// Default ceiling on nested container depth.
const DEFAULT_MAX_DEPTH: u32 = 128;

/// Per-call configuration for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Representation recognised as null.
	pub null_strategy: NullStrategy,
	/// Read-only context visible to every `Decode` implementation.
	pub user_info: UserInfo,
	/// Maximum nesting of keyed and unkeyed containers.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			null_strategy: NullStrategy::default(),
			user_info: UserInfo::new(),
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl DecodeOptions {
	/// Preset matching [`EncodeOptions::for_plist`](crate::coder::EncodeOptions::for_plist).
	pub fn for_plist() -> Self {
		Self {
			null_strategy: NullStrategy::string_null(),
			..Self::default()
		}
	}
}

/// Decode a `T` from `value` with default options.
pub fn decode<T: Decode>(value: &Value) -> Result<T> {
	decode_value(value, &DecodeOptions::default())
}

/// Decode a `T` from `value`.
pub fn decode_value<T: Decode>(value: &Value, options: &DecodeOptions) -> Result<T> {
	trace!(
		null_strategy = options.null_strategy.label(),
		max_depth = options.max_depth,
		kind = value.kind_name(),
		"decode start"
	);

	let decoder = Decoder::new(Node {
		value,
		path: CodingPath::root(),
		options,
		depth: 0,
	});
	T::decode(&decoder).inspect_err(|err| {
		debug!(path = ?err.path().map(ToString::to_string), error = %err, "decode failed");
	})
}

/// Location inside the source tree shared by the decoder and its containers.
#[derive(Debug, Clone)]
pub(crate) struct Node<'a> {
	pub(crate) value: &'a Value,
	pub(crate) path: CodingPath,
	pub(crate) options: &'a DecodeOptions,
	/// Number of keyed/unkeyed containers entered above this value.
	pub(crate) depth: u32,
}

impl<'a> Node<'a> {
	pub(crate) fn child(&self, value: &'a Value, path: CodingPath) -> Self {
		Self {
			value,
			path,
			options: self.options,
			depth: self.depth,
		}
	}

	pub(crate) fn strategy(&self) -> &'a NullStrategy {
		&self.options.null_strategy
	}

	pub(crate) fn is_null(&self) -> bool {
		self.options.null_strategy.is_null(self.value)
	}

	fn enter(&self) -> Result<Self> {
		let depth = self.depth + 1;
		if depth > self.options.max_depth {
			return Err(depth_exceeded(&self.path, self.options.max_depth));
		}
		Ok(Self { depth, ..self.clone() })
	}
}

/// Decoding context handed to [`Decode::decode`].
///
/// Unlike the encoder, a decoder may be asked for any number of containers;
/// each one is a fresh view over the same immutable value.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
	node: Node<'a>,
}

impl<'a> Decoder<'a> {
	pub(crate) fn new(node: Node<'a>) -> Self {
		Self { node }
	}

	/// Location of the value being decoded.
	pub fn coding_path(&self) -> &CodingPath {
		&self.node.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &'a UserInfo {
		&self.node.options.user_info
	}

	/// Null representation in effect.
	pub fn null_strategy(&self) -> &'a NullStrategy {
		self.node.strategy()
	}

	/// View the value as a map.
	pub fn container(&self) -> Result<KeyedDecodingContainer<'a>> {
		let node = self.node.enter()?;
		match node.value {
			Value::Map(map) => Ok(KeyedDecodingContainer::new(node, map)),
			other => Err(mismatch("Map", &node.path, other, node.strategy())),
		}
	}

	/// View the value as a sequence.
	pub fn unkeyed_container(&self) -> Result<UnkeyedDecodingContainer<'a>> {
		let node = self.node.enter()?;
		match node.value {
			Value::Sequence(items) => Ok(UnkeyedDecodingContainer::new(node, items)),
			other => Err(mismatch("Sequence", &node.path, other, node.strategy())),
		}
	}

	/// View the value as a single scalar.
	pub fn single_value_container(&self) -> SingleValueDecodingContainer<'a> {
		SingleValueDecodingContainer::new(self.node.clone())
	}
}

#[cfg(test)]
mod tests;
