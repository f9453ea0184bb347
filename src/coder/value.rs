use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use crate::coder::{CodingPath, PathStep};

/// Read-only user context threaded through every container of one call.
pub type UserInfo = BTreeMap<String, Value>;

/// Dynamic value tree moved between typed values and stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Value {
	/// Explicit absence of a value.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Integer scalar, signed or unsigned 64-bit.
	Integer(Integer),
	/// Double-precision floating scalar.
	Float(f64),
	/// UTF-8 string scalar.
	String(String),
	/// Opaque byte blob.
	Bytes(Vec<u8>),
	/// Point in time.
	Timestamp(#[serde(with = "time::serde::rfc3339")] OffsetDateTime),
	/// Validated URI.
	Uri(Url),
	/// High-precision decimal number.
	Decimal(Decimal),
	/// Ordered list of values.
	Sequence(Vec<Value>),
	/// String-keyed map of values.
	Map(BTreeMap<String, Value>),
}

/// Integer payload keeping the signedness it was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Integer {
	/// Signed 64-bit integer.
	Signed(i64),
	/// Unsigned 64-bit integer.
	Unsigned(u64),
}

impl std::fmt::Display for Integer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Integer::Signed(value) => write!(f, "{value}"),
			Integer::Unsigned(value) => write!(f, "{value}"),
		}
	}
}

impl Value {
	/// Runtime kind label used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Value::Null => "Null",
			Value::Bool(_) => "Bool",
			Value::Integer(Integer::Signed(_)) => "Int",
			Value::Integer(Integer::Unsigned(_)) => "UInt",
			Value::Float(_) => "Double",
			Value::String(_) => "String",
			Value::Bytes(_) => "Bytes",
			Value::Timestamp(_) => "Timestamp",
			Value::Uri(_) => "Url",
			Value::Decimal(_) => "Decimal",
			Value::Sequence(_) => "Sequence",
			Value::Map(_) => "Map",
		}
	}

	/// Whether this is `Value::Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Boolean payload, if any.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// String payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(value) => Some(value),
			_ => None,
		}
	}

	/// Integer payload as `i64` when it fits.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Integer(Integer::Signed(value)) => Some(*value),
			Value::Integer(Integer::Unsigned(value)) => i64::try_from(*value).ok(),
			_ => None,
		}
	}

	/// Integer payload as `u64` when it fits.
	pub fn as_u64(&self) -> Option<u64> {
		match self {
			Value::Integer(Integer::Signed(value)) => u64::try_from(*value).ok(),
			Value::Integer(Integer::Unsigned(value)) => Some(*value),
			_ => None,
		}
	}

	/// Floating payload, widening integers.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float(value) => Some(*value),
			Value::Integer(Integer::Signed(value)) => Some(*value as f64),
			Value::Integer(Integer::Unsigned(value)) => Some(*value as f64),
			_ => None,
		}
	}

	/// Map payload, if any.
	pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Sequence payload, if any.
	pub fn as_sequence(&self) -> Option<&[Value]> {
		match self {
			Value::Sequence(items) => Some(items),
			_ => None,
		}
	}

	/// Look up one key of a map value.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_map().and_then(|map| map.get(key))
	}

	/// Follow a coding path through nested maps and sequences.
	pub fn lookup(&self, path: &CodingPath) -> Option<&Value> {
		let mut current = self;
		for step in path.steps() {
			current = match step {
				PathStep::Field(name) => current.get(name)?,
				PathStep::Index(index) => current.as_sequence()?.get(*index)?,
			};
		}
		Some(current)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

macro_rules! impl_from_signed {
	($($ty:ty),*) => {
		$(impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Value::Integer(Integer::Signed(value as i64))
			}
		})*
	};
}

macro_rules! impl_from_unsigned {
	($($ty:ty),*) => {
		$(impl From<$ty> for Value {
			fn from(value: $ty) -> Self {
				Value::Integer(Integer::Unsigned(value as u64))
			}
		})*
	};
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::Float(f64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<OffsetDateTime> for Value {
	fn from(value: OffsetDateTime) -> Self {
		Value::Timestamp(value)
	}
}

impl From<Url> for Value {
	fn from(value: Url) -> Self {
		Value::Uri(value)
	}
}

impl From<Decimal> for Value {
	fn from(value: Decimal) -> Self {
		Value::Decimal(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::Sequence(value)
	}
}

impl From<BTreeMap<String, Value>> for Value {
	fn from(value: BTreeMap<String, Value>) -> Self {
		Value::Map(value)
	}
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Value::Map(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}
