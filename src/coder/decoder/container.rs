use std::collections::BTreeMap;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use url::Url;

use crate::coder::decoder::{Decoder, Node};
use crate::coder::diagnostics::{index_not_found, inexact, key_not_found, mismatch};
use crate::coder::numeric::{ExactInteger, Number, decimal_to_f64};
use crate::coder::{CodingError, CodingPath, Decode, Result, UserInfo, Value};

/// Read-only view over a map value.
#[derive(Debug, Clone)]
pub struct KeyedDecodingContainer<'a> {
	node: Node<'a>,
	map: &'a BTreeMap<String, Value>,
}

impl<'a> KeyedDecodingContainer<'a> {
	pub(crate) fn new(node: Node<'a>, map: &'a BTreeMap<String, Value>) -> Self {
		Self { node, map }
	}

	/// Location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		&self.node.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &'a UserInfo {
		&self.node.options.user_info
	}

	/// Every key present in the map, in key order.
	pub fn all_keys(&self) -> Vec<&'a str> {
		self.map.keys().map(String::as_str).collect()
	}

	/// Whether `key` has an entry, null or not.
	pub fn contains(&self, key: &str) -> bool {
		self.map.contains_key(key)
	}

	/// Decode the entry under `key`.
	pub fn decode<T: Decode>(&self, key: &str) -> Result<T> {
		T::decode(&self.super_decoder_for_key(key)?)
	}

	/// Whether the entry under `key` is null. A missing key is an error.
	pub fn decode_nil(&self, key: &str) -> Result<bool> {
		Ok(self.entry(key)?.is_null())
	}

	/// Decode the entry under `key`, mapping a missing or null entry to `None`.
	pub fn decode_if_present<T: Decode>(&self, key: &str) -> Result<Option<T>> {
		if !self.contains(key) || self.decode_nil(key)? {
			return Ok(None);
		}
		self.decode(key).map(Some)
	}

	/// View the entry under `key` as a map.
	pub fn nested_container(&self, key: &str) -> Result<KeyedDecodingContainer<'a>> {
		self.super_decoder_for_key(key)?.container()
	}

	/// View the entry under `key` as a sequence.
	pub fn nested_unkeyed_container(&self, key: &str) -> Result<UnkeyedDecodingContainer<'a>> {
		self.super_decoder_for_key(key)?.unkeyed_container()
	}

	/// Decoder over the whole map at this container's path.
	pub fn super_decoder(&self) -> Decoder<'a> {
		Decoder::new(self.node.clone())
	}

	/// Decoder over the entry under `key`.
	pub fn super_decoder_for_key(&self, key: &str) -> Result<Decoder<'a>> {
		self.entry(key).map(Decoder::new)
	}

	fn entry(&self, key: &str) -> Result<Node<'a>> {
		let value = self.map.get(key).ok_or_else(|| key_not_found(&self.node.path, key))?;
		Ok(self.node.child(value, self.node.path.appending_key(key)))
	}
}

/// Cursor over a sequence value.
///
/// Every successful read advances the cursor by one; a failed read leaves
/// it where it was.
#[derive(Debug, Clone)]
pub struct UnkeyedDecodingContainer<'a> {
	node: Node<'a>,
	items: &'a [Value],
	index: usize,
}

impl<'a> UnkeyedDecodingContainer<'a> {
	pub(crate) fn new(node: Node<'a>, items: &'a [Value]) -> Self {
		Self { node, items, index: 0 }
	}

	/// Location of this container.
	pub fn coding_path(&self) -> &CodingPath {
		&self.node.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &'a UserInfo {
		&self.node.options.user_info
	}

	/// Total number of elements.
	pub fn count(&self) -> usize {
		self.items.len()
	}

	/// Whether every element has been consumed.
	pub fn is_at_end(&self) -> bool {
		self.index >= self.items.len()
	}

	/// Position of the next element to read.
	pub fn current_index(&self) -> usize {
		self.index
	}

	/// Decode the next element.
	pub fn decode<T: Decode>(&mut self) -> Result<T> {
		let value = T::decode(&Decoder::new(self.next()?))?;
		self.index += 1;
		Ok(value)
	}

	/// Consume the next element, reporting whether it was null.
	pub fn decode_nil(&mut self) -> Result<bool> {
		let is_null = self.next()?.is_null();
		self.index += 1;
		Ok(is_null)
	}

	/// Decode the next element, mapping null or the end of the sequence to `None`.
	pub fn decode_if_present<T: Decode>(&mut self) -> Result<Option<T>> {
		if self.is_at_end() {
			return Ok(None);
		}
		if self.next()?.is_null() {
			self.index += 1;
			return Ok(None);
		}
		self.decode().map(Some)
	}

	/// View the next element as a map.
	pub fn nested_container(&mut self) -> Result<KeyedDecodingContainer<'a>> {
		let container = Decoder::new(self.next()?).container()?;
		self.index += 1;
		Ok(container)
	}

	/// View the next element as a sequence.
	pub fn nested_unkeyed_container(&mut self) -> Result<UnkeyedDecodingContainer<'a>> {
		let container = Decoder::new(self.next()?).unkeyed_container()?;
		self.index += 1;
		Ok(container)
	}

	/// Decoder over the whole sequence; the cursor does not move.
	pub fn super_decoder(&self) -> Decoder<'a> {
		Decoder::new(self.node.clone())
	}

	fn next(&self) -> Result<Node<'a>> {
		let value = self.items.get(self.index).ok_or_else(|| index_not_found(&self.node.path, self.index))?;
		Ok(self.node.child(value, self.node.path.appending_index(self.index)))
	}
}

/// View of one value as a scalar.
#[derive(Debug, Clone)]
pub struct SingleValueDecodingContainer<'a> {
	node: Node<'a>,
}

impl<'a> SingleValueDecodingContainer<'a> {
	pub(crate) fn new(node: Node<'a>) -> Self {
		Self { node }
	}

	/// Location of the value.
	pub fn coding_path(&self) -> &CodingPath {
		&self.node.path
	}

	/// Caller-supplied context for this call.
	pub fn user_info(&self) -> &'a UserInfo {
		&self.node.options.user_info
	}

	/// Whether the value is null under the configured strategy.
	pub fn decode_nil(&self) -> bool {
		self.node.is_null()
	}

	/// Raw dynamic value.
	pub fn decode_value(&self) -> &'a Value {
		self.node.value
	}

	/// Boolean value.
	pub fn decode_bool(&self) -> Result<bool> {
		match self.node.value {
			Value::Bool(value) if !self.node.is_null() => Ok(*value),
			other => Err(self.type_error("Bool", other)),
		}
	}

	/// Borrowed string value.
	pub fn decode_str(&self) -> Result<&'a str> {
		match self.node.value {
			Value::String(value) if !self.node.is_null() => Ok(value),
			other => Err(self.type_error("String", other)),
		}
	}

	/// Owned string value.
	pub fn decode_string(&self) -> Result<String> {
		self.decode_str().map(str::to_owned)
	}

	/// Single-character string.
	pub fn decode_char(&self) -> Result<char> {
		let text = self.decode_str().map_err(|_| self.type_error("char", self.node.value))?;
		let mut chars = text.chars();
		match (chars.next(), chars.next()) {
			(Some(ch), None) => Ok(ch),
			_ => Err(self.type_error("char", self.node.value)),
		}
	}

	/// Integer of width `N`, converted exactly from an integer or integral double.
	pub fn decode_integer<N: ExactInteger>(&self) -> Result<N> {
		let number = self.number(N::NAME)?;
		number.to_exact::<N>().ok_or_else(|| inexact(N::NAME, &self.node.path, number))
	}

	/// Double-precision value, widening integers and decimals.
	pub fn decode_f64(&self) -> Result<f64> {
		match self.node.value {
			Value::Decimal(value) => decimal_to_f64(value).ok_or_else(|| inexact("f64", &self.node.path, value)),
			_ => self.number("f64").map(Number::to_f64),
		}
	}

	/// Single-precision value, narrowed from [`decode_f64`](Self::decode_f64).
	pub fn decode_f32(&self) -> Result<f32> {
		match self.node.value {
			Value::Decimal(value) => decimal_to_f64(value).map(|value| value as f32).ok_or_else(|| inexact("f32", &self.node.path, value)),
			_ => self.number("f32").map(|number| number.to_f64() as f32),
		}
	}

	/// Decimal value, converted from any finite number.
	pub fn decode_decimal(&self) -> Result<Decimal> {
		match self.node.value {
			Value::Decimal(value) => Ok(*value),
			_ => {
				let number = self.number("Decimal")?;
				number.to_decimal().ok_or_else(|| inexact("Decimal", &self.node.path, number))
			}
		}
	}

	/// URL value, parsing strings on demand.
	pub fn decode_url(&self) -> Result<Url> {
		match self.node.value {
			Value::Uri(url) => Ok(url.clone()),
			Value::String(text) if !self.node.is_null() => Url::parse(text).map_err(|_| self.type_error("Url", self.node.value)),
			other => Err(self.type_error("Url", other)),
		}
	}

	/// Timestamp value.
	pub fn decode_timestamp(&self) -> Result<OffsetDateTime> {
		match self.node.value {
			Value::Timestamp(value) if !self.node.is_null() => Ok(*value),
			other => Err(self.type_error("Timestamp", other)),
		}
	}

	/// Byte blob.
	pub fn decode_bytes(&self) -> Result<Vec<u8>> {
		match self.node.value {
			Value::Bytes(value) if !self.node.is_null() => Ok(value.clone()),
			other => Err(self.type_error("Bytes", other)),
		}
	}

	/// Decode any `T` through a child decoder over the same value.
	pub fn decode<T: Decode>(&self) -> Result<T> {
		T::decode(&Decoder::new(self.node.clone()))
	}

	fn number(&self, expected: &'static str) -> Result<Number> {
		if self.node.is_null() {
			return Err(self.type_error(expected, self.node.value));
		}
		Number::from_value(self.node.value).ok_or_else(|| self.type_error(expected, self.node.value))
	}

	fn type_error(&self, expected: &'static str, found: &Value) -> CodingError {
		mismatch(expected, &self.node.path, found, self.node.strategy())
	}
}
