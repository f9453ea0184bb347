use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::coder::numeric::{ExactInteger, Number};
use crate::coder::{Integer, Value};

#[test]
fn unsigned_byte_boundary() {
	assert_eq!(Number::Signed(255).to_exact::<u8>(), Some(255));
	assert_eq!(Number::Signed(256).to_exact::<u8>(), None);
	assert_eq!(Number::Signed(-1).to_exact::<u8>(), None);
}

#[test]
fn signed_byte_boundary() {
	assert_eq!(Number::Unsigned(127).to_exact::<i8>(), Some(127));
	assert_eq!(Number::Unsigned(128).to_exact::<i8>(), None);
	assert_eq!(Number::Signed(-128).to_exact::<i8>(), Some(-128));
	assert_eq!(Number::Signed(-129).to_exact::<i8>(), None);
}

#[test]
fn doubles_convert_only_when_integral() {
	assert_eq!(Number::Double(42.0).to_exact::<u16>(), Some(42));
	assert_eq!(Number::Double(-3.0).to_exact::<i32>(), Some(-3));
	assert_eq!(Number::Double(1.5).to_exact::<i64>(), None);
	assert_eq!(Number::Double(f64::NAN).to_exact::<i64>(), None);
	assert_eq!(Number::Double(f64::INFINITY).to_exact::<u64>(), None);
	assert_eq!(Number::Double(18_446_744_073_709_551_616.0).to_exact::<u64>(), None);
}

#[test]
fn from_value_accepts_integers_and_floats_only() {
	assert_eq!(Number::from_value(&Value::Integer(Integer::Unsigned(7))), Some(Number::Unsigned(7)));
	assert_eq!(Number::from_value(&Value::Float(0.5)), Some(Number::Double(0.5)));
	assert_eq!(Number::from_value(&Value::Bool(true)), None);
	assert_eq!(Number::from_value(&Value::from("7")), None);
}

#[test]
fn decimals_from_every_number_kind() {
	assert_eq!(Number::Signed(-12).to_decimal(), Some(Decimal::from(-12)));
	assert_eq!(Number::Unsigned(u64::MAX).to_decimal(), Some(Decimal::from(u64::MAX)));
	assert_eq!(Number::Double(2.5).to_decimal(), Some(Decimal::new(25, 1)));
	assert_eq!(Number::Double(f64::NAN).to_decimal(), None);
}

#[test]
fn width_names_match_rust_types() {
	assert_eq!(<u8 as ExactInteger>::NAME, "u8");
	assert_eq!(<isize as ExactInteger>::NAME, "isize");
}

proptest! {
	#[test]
	fn signed_sources_narrow_exactly(value in any::<i64>()) {
		prop_assert_eq!(Number::Signed(value).to_exact::<i8>(), i8::try_from(value).ok());
		prop_assert_eq!(Number::Signed(value).to_exact::<u32>(), u32::try_from(value).ok());
		prop_assert_eq!(Number::Signed(value).to_exact::<i64>(), Some(value));
	}

	#[test]
	fn unsigned_sources_narrow_exactly(value in any::<u64>()) {
		prop_assert_eq!(Number::Unsigned(value).to_exact::<u16>(), u16::try_from(value).ok());
		prop_assert_eq!(Number::Unsigned(value).to_exact::<i64>(), i64::try_from(value).ok());
	}

	#[test]
	fn integral_doubles_match_their_integer(value in -1_000_000_i64..1_000_000) {
		prop_assert_eq!(Number::Double(value as f64).to_exact::<i32>(), i32::try_from(value).ok());
		prop_assert_eq!(Number::Double(value as f64 + 0.25).to_exact::<i32>(), None);
	}
}
