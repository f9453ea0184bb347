//! Schema visitor contract: how typed values drive the containers.
//!
//! Implement [`Encode`] to describe a value's fields to an [`Encoder`] and
//! [`Decode`] to rebuild it from a [`Decoder`]. Absence is modelled with
//! `Option<T>`; nothing is inferred from the runtime shape of a value.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use rust_decimal::Decimal;
use time::OffsetDateTime;
use url::Url;

use crate::coder::{Decoder, Encoder, Result, Value};

/// Typed value that can write itself into encoding containers.
pub trait Encode {
	/// Describe `self` to `encoder`.
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()>;

	/// Leaf representation for scalars and pass-through kinds.
	///
	/// When this returns `Some`, containers store the value directly instead
	/// of allocating a child encoder.
	fn scalar_value(&self) -> Option<Value> {
		None
	}
}

/// Typed value that can rebuild itself from decoding containers.
pub trait Decode: Sized {
	/// Construct `Self` from `decoder`.
	fn decode(decoder: &Decoder<'_>) -> Result<Self>;
}

macro_rules! impl_scalar {
	($($ty:ty => $method:ident),* $(,)?) => {
		$(impl Encode for $ty {
			fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
				encoder.single_value_container().encode_value(Value::from(*self));
				Ok(())
			}

			fn scalar_value(&self) -> Option<Value> {
				Some(Value::from(*self))
			}
		}

		impl Decode for $ty {
			fn decode(decoder: &Decoder<'_>) -> Result<Self> {
				decoder.single_value_container().$method()
			}
		})*
	};
}

impl_scalar!(
	bool => decode_bool,
	f32 => decode_f32,
	f64 => decode_f64,
	i8 => decode_integer,
	i16 => decode_integer,
	i32 => decode_integer,
	i64 => decode_integer,
	isize => decode_integer,
	u8 => decode_integer,
	u16 => decode_integer,
	u32 => decode_integer,
	u64 => decode_integer,
	usize => decode_integer,
	OffsetDateTime => decode_timestamp,
	Decimal => decode_decimal,
);

impl Encode for str {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.single_value_container().encode_value(Value::from(self));
		Ok(())
	}

	fn scalar_value(&self) -> Option<Value> {
		Some(Value::from(self))
	}
}

impl Encode for String {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		self.as_str().encode(encoder)
	}

	fn scalar_value(&self) -> Option<Value> {
		self.as_str().scalar_value()
	}
}

impl Decode for String {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		decoder.single_value_container().decode_string()
	}
}

impl Encode for char {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.single_value_container().encode_value(Value::String(self.to_string()));
		Ok(())
	}

	fn scalar_value(&self) -> Option<Value> {
		Some(Value::String(self.to_string()))
	}
}

impl Decode for char {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		decoder.single_value_container().decode_char()
	}
}

impl Encode for Url {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.single_value_container().encode_value(Value::Uri(self.clone()));
		Ok(())
	}

	fn scalar_value(&self) -> Option<Value> {
		Some(Value::Uri(self.clone()))
	}
}

impl Decode for Url {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		decoder.single_value_container().decode_url()
	}
}

impl Encode for bytes::Bytes {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.single_value_container().encode_value(Value::Bytes(self.to_vec()));
		Ok(())
	}

	fn scalar_value(&self) -> Option<Value> {
		Some(Value::Bytes(self.to_vec()))
	}
}

impl Decode for bytes::Bytes {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		decoder.single_value_container().decode_bytes().map(bytes::Bytes::from)
	}
}

impl Encode for Value {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		match self {
			Value::Map(entries) => {
				let mut container = encoder.container();
				for (key, value) in entries {
					container.encode(value, key)?;
				}
				Ok(())
			}
			Value::Sequence(items) => encoder.unkeyed_container().encode_all(items),
			Value::Null => {
				encoder.single_value_container().encode_nil();
				Ok(())
			}
			leaf => {
				encoder.single_value_container().encode_value(leaf.clone());
				Ok(())
			}
		}
	}

	fn scalar_value(&self) -> Option<Value> {
		match self {
			Value::Map(_) | Value::Sequence(_) => None,
			leaf => Some(leaf.clone()),
		}
	}
}

impl Decode for Value {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		Ok(decoder.single_value_container().decode_value().clone())
	}
}

impl<T: Encode> Encode for Option<T> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		match self {
			Some(value) => value.encode(encoder),
			None => {
				encoder.single_value_container().encode_nil();
				Ok(())
			}
		}
	}

	fn scalar_value(&self) -> Option<Value> {
		match self {
			Some(value) => value.scalar_value(),
			None => Some(Value::Null),
		}
	}
}

impl<T: Decode> Decode for Option<T> {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		if decoder.single_value_container().decode_nil() {
			return Ok(None);
		}
		T::decode(decoder).map(Some)
	}
}

impl<T: Encode + ?Sized> Encode for &T {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		(**self).encode(encoder)
	}

	fn scalar_value(&self) -> Option<Value> {
		(**self).scalar_value()
	}
}

impl<T: Encode + ?Sized> Encode for Box<T> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		(**self).encode(encoder)
	}

	fn scalar_value(&self) -> Option<Value> {
		(**self).scalar_value()
	}
}

impl<T: Decode> Decode for Box<T> {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		T::decode(decoder).map(Box::new)
	}
}

impl<T: Encode> Encode for [T] {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		encoder.unkeyed_container().encode_all(self)
	}
}

impl<T: Encode> Encode for Vec<T> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		self.as_slice().encode(encoder)
	}
}

impl<T: Decode> Decode for Vec<T> {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		let mut container = decoder.unkeyed_container()?;
		let mut items = Vec::with_capacity(container.count());
		while !container.is_at_end() {
			items.push(container.decode()?);
		}
		Ok(items)
	}
}

impl<T: Encode> Encode for BTreeMap<String, T> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		let mut container = encoder.container();
		for (key, value) in self {
			container.encode(value, key)?;
		}
		Ok(())
	}
}

impl<T: Decode> Decode for BTreeMap<String, T> {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		let container = decoder.container()?;
		container
			.all_keys()
			.into_iter()
			.map(|key| Ok((key.to_owned(), container.decode(key)?)))
			.collect()
	}
}

impl<T: Encode, S: BuildHasher> Encode for HashMap<String, T, S> {
	fn encode(&self, encoder: &mut Encoder<'_>) -> Result<()> {
		let mut container = encoder.container();
		for (key, value) in self {
			container.encode(value, key)?;
		}
		Ok(())
	}
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		let container = decoder.container()?;
		container
			.all_keys()
			.into_iter()
			.map(|key| Ok((key.to_owned(), container.decode(key)?)))
			.collect()
	}
}
