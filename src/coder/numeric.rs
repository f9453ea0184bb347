//! Exact numeric coercion between dynamic numbers and fixed-width targets.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::coder::{Integer, Value};

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Width-erased number read out of a dynamic value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
	/// Signed 64-bit integer source.
	Signed(i64),
	/// Unsigned 64-bit integer source.
	Unsigned(u64),
	/// Double-precision source.
	Double(f64),
}

impl Number {
	/// Interpret an integer or floating value as a number.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Integer(Integer::Signed(value)) => Some(Number::Signed(*value)),
			Value::Integer(Integer::Unsigned(value)) => Some(Number::Unsigned(*value)),
			Value::Float(value) => Some(Number::Double(*value)),
			_ => None,
		}
	}

	/// Convert to `N` only when the value is integral and in range.
	pub fn to_exact<N: ExactInteger>(self) -> Option<N> {
		match self {
			Number::Signed(value) => N::from_i64(value),
			Number::Unsigned(value) => N::from_u64(value),
			Number::Double(value) => {
				if !value.is_finite() || value.fract() != 0.0 {
					return None;
				}
				if value >= 0.0 {
					if value >= TWO_POW_64 {
						return None;
					}
					N::from_u64(value as u64)
				} else {
					if value < -TWO_POW_63 {
						return None;
					}
					N::from_i64(value as i64)
				}
			}
		}
	}

	/// Widen to double precision.
	pub fn to_f64(self) -> f64 {
		match self {
			Number::Signed(value) => value as f64,
			Number::Unsigned(value) => value as f64,
			Number::Double(value) => value,
		}
	}

	/// Convert to a decimal; non-finite doubles have no decimal form.
	pub fn to_decimal(self) -> Option<Decimal> {
		match self {
			Number::Signed(value) => Some(Decimal::from(value)),
			Number::Unsigned(value) => Some(Decimal::from(value)),
			Number::Double(value) => Decimal::from_f64(value),
		}
	}
}

impl fmt::Display for Number {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Number::Signed(value) => write!(f, "{value}"),
			Number::Unsigned(value) => write!(f, "{value}"),
			Number::Double(value) => write!(f, "{value}"),
		}
	}
}

/// Fixed-width integer target with exact conversions from 64-bit sources.
pub trait ExactInteger: Copy + Sized {
	/// Width label used in diagnostics.
	const NAME: &'static str;

	/// Exact conversion from a signed source.
	fn from_i64(value: i64) -> Option<Self>;

	/// Exact conversion from an unsigned source.
	fn from_u64(value: u64) -> Option<Self>;
}

macro_rules! impl_exact_integer {
	($($ty:ty => $name:literal),* $(,)?) => {
		$(impl ExactInteger for $ty {
			const NAME: &'static str = $name;

			fn from_i64(value: i64) -> Option<Self> {
				<$ty>::try_from(value).ok()
			}

			fn from_u64(value: u64) -> Option<Self> {
				<$ty>::try_from(value).ok()
			}
		})*
	};
}

impl_exact_integer!(
	i8 => "i8",
	i16 => "i16",
	i32 => "i32",
	i64 => "i64",
	isize => "isize",
	u8 => "u8",
	u16 => "u16",
	u32 => "u32",
	u64 => "u64",
	usize => "usize",
);

/// Lossy decimal widening used by floating decode.
pub(crate) fn decimal_to_f64(value: &Decimal) -> Option<f64> {
	value.to_f64()
}

#[cfg(test)]
mod tests;
