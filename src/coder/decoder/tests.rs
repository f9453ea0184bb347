use std::collections::BTreeMap;

use crate::coder::{CodingError, Decode, DecodeOptions, Decoder, NullStrategy, Result, Value, decode, decode_value};

fn map(entries: impl IntoIterator<Item = (&'static str, Value)>) -> Value {
	entries.into_iter().collect()
}

fn unwrap_err<T: std::fmt::Debug>(result: Result<T>) -> CodingError {
	match result {
		Ok(value) => panic!("expected failure, got {value:?}"),
		Err(err) => err,
	}
}

#[derive(Debug, PartialEq)]
struct Profile {
	name: String,
	age: u8,
	nickname: Option<String>,
}

impl Decode for Profile {
	fn decode(decoder: &Decoder<'_>) -> Result<Self> {
		let container = decoder.container()?;
		Ok(Self {
			name: container.decode("name")?,
			age: container.decode("age")?,
			nickname: container.decode_if_present("nickname")?,
		})
	}
}

#[test]
fn keyed_container_reads_fields() {
	let source = map([("name", Value::from("ada")), ("age", Value::from(36_i64)), ("nickname", Value::Null)]);
	let profile: Profile = decode(&source).expect("decode succeeds");
	assert_eq!(
		profile,
		Profile {
			name: "ada".to_owned(),
			age: 36,
			nickname: None,
		}
	);
}

#[test]
fn missing_key_reports_full_path() {
	let source = map([("name", Value::from("ada"))]);
	let err = unwrap_err(decode::<Profile>(&source));
	assert!(matches!(&err, CodingError::KeyNotFound { key, .. } if key == "age"));
	assert_eq!(err.to_string(), "Map does not contain key SELF.age");
}

#[test]
fn decode_nil_requires_the_key() {
	struct KeyCheck;

	impl Decode for KeyCheck {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			let container = decoder.container()?;
			assert!(container.decode_nil("gone")?);
			assert!(!container.decode_nil("here")?);
			assert!(container.contains("gone"));
			assert_eq!(container.all_keys(), vec!["gone", "here"]);
			container.decode_nil("missing")?;
			Ok(KeyCheck)
		}
	}

	let source = map([("gone", Value::Null), ("here", Value::from(1_i64))]);
	let err = unwrap_err(decode::<KeyCheck>(&source).map(|_| ()));
	assert!(matches!(err, CodingError::KeyNotFound { .. }));
}

#[test]
fn marker_strategy_reads_marker_as_null() {
	let source = map([("name", Value::from("ada")), ("age", Value::from(3_u64)), ("nickname", Value::from("$null"))]);
	let profile: Profile = decode_value(&source, &DecodeOptions::for_plist()).expect("decode succeeds");
	assert_eq!(profile.nickname, None);

	let sentinel: Profile = decode(&source).expect("decode succeeds");
	assert_eq!(sentinel.nickname.as_deref(), Some("$null"));
}

#[test]
fn scalar_mismatch_names_kind_and_path() {
	let source = map([("name", Value::from(10_i64)), ("age", Value::from(1_i64))]);
	let err = unwrap_err(decode::<Profile>(&source));
	assert!(matches!(err, CodingError::TypeMismatch { expected: "String", .. }));
	assert_eq!(err.to_string(), "Expected String at SELF.name, found Int");

	let null_name = map([("name", Value::Null), ("age", Value::from(1_i64))]);
	let err = unwrap_err(decode::<Profile>(&null_name));
	assert!(matches!(err, CodingError::ValueNotFound { .. }));
	assert_eq!(err.to_string(), "Expected String at SELF.name, found nil");
}

#[test]
fn integer_widths_are_checked_exactly() {
	assert_eq!(decode::<u8>(&Value::from(255_i64)).expect("fits"), 255);
	let err = unwrap_err(decode::<u8>(&Value::from(256_i64)));
	assert_eq!(err.to_string(), "256 at SELF, cannot be exactly represented by u8");

	assert_eq!(decode::<i8>(&Value::from(127_u64)).expect("fits"), 127);
	assert!(matches!(unwrap_err(decode::<i8>(&Value::from(128_u64))), CodingError::TypeMismatch { expected: "i8", .. }));

	assert_eq!(decode::<i32>(&Value::Float(12.0)).expect("integral double"), 12);
	assert!(decode::<i32>(&Value::Float(12.5)).is_err());
	assert!(decode::<u64>(&Value::from("12")).is_err());
}

#[test]
fn floats_widen_integers_and_decimals() {
	assert_eq!(decode::<f64>(&Value::from(3_i64)).expect("widens"), 3.0);
	assert_eq!(decode::<f32>(&Value::Float(0.5)).expect("narrows"), 0.5);
	assert_eq!(decode::<f64>(&Value::Decimal(rust_decimal::Decimal::new(25, 1))).expect("decimal"), 2.5);
	assert!(matches!(unwrap_err(decode::<f64>(&Value::Bool(true))), CodingError::TypeMismatch { expected: "f64", .. }));
}

#[test]
fn urls_parse_from_strings() {
	let url: url::Url = decode(&Value::from("https://example.com/a")).expect("parses");
	assert_eq!(url.path(), "/a");
	let err = unwrap_err(decode::<url::Url>(&Value::from("not a url")));
	assert_eq!(err.to_string(), "Expected Url at SELF, found String");
}

#[test]
fn unkeyed_cursor_advances_per_read() {
	struct Cursor;

	impl Decode for Cursor {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			let mut items = decoder.unkeyed_container()?;
			assert_eq!(items.count(), 5);
			for expected in 0..3 {
				assert_eq!(items.current_index(), expected);
				assert_eq!(items.decode::<u8>()?, expected as u8);
			}
			assert!(!items.is_at_end());

			assert!(items.decode::<String>().is_err());
			assert_eq!(items.current_index(), 3);
			assert_eq!(items.decode::<u8>()?, 3);
			assert_eq!(items.decode_if_present::<u8>()?, None);
			assert_eq!(items.current_index(), 5);
			assert!(items.is_at_end());
			assert_eq!(items.decode_if_present::<u8>()?, None);

			let whole = items.super_decoder().unkeyed_container()?;
			assert_eq!(whole.count(), 5);
			items.decode::<u8>()?;
			Ok(Cursor)
		}
	}

	let source = Value::Sequence(vec![
		Value::from(0_u8),
		Value::from(1_u8),
		Value::from(2_u8),
		Value::from(3_u8),
		Value::Null,
	]);
	let err = unwrap_err(decode::<Cursor>(&source).map(|_| ()));
	assert!(matches!(err, CodingError::IndexNotFound { index: 5, .. }));
	assert_eq!(err.to_string(), "Sequence does not contain index SELF[5]");
}

#[test]
fn unkeyed_decode_nil_always_consumes_one_element() {
	struct Flags(Vec<bool>);

	impl Decode for Flags {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			let mut items = decoder.unkeyed_container()?;
			let mut flags = Vec::new();
			while !items.is_at_end() {
				let before = items.current_index();
				flags.push(items.decode_nil()?);
				assert_eq!(items.current_index(), before + 1);
			}
			Ok(Flags(flags))
		}
	}

	let source = Value::Sequence(vec![Value::from(1_i64), Value::Null, Value::from(2_i64)]);
	let flags = decode::<Flags>(&source).map(|flags| flags.0).expect("decode succeeds");
	assert_eq!(flags, vec![false, true, false]);
}

#[test]
fn unkeyed_decode_if_present_reads_values_and_skips_nulls() {
	let source = Value::Sequence(vec![Value::from(1_i64), Value::Null, Value::from(2_i64)]);
	let values: Vec<Option<i64>> = decode(&source).expect("decode succeeds");
	assert_eq!(values, vec![Some(1), None, Some(2)]);

	struct Present(Vec<Option<i64>>);

	impl Decode for Present {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			let mut items = decoder.unkeyed_container()?;
			let mut values = Vec::new();
			for _ in 0..4 {
				values.push(items.decode_if_present()?);
			}
			assert_eq!(items.current_index(), 3);
			Ok(Present(values))
		}
	}

	let present = decode::<Present>(&source).map(|present| present.0).expect("decode succeeds");
	assert_eq!(present, vec![Some(1), None, Some(2), None]);
}

#[test]
fn nested_mismatch_path_includes_indices() {
	#[derive(Debug)]
	struct Item {
		#[allow(dead_code)]
		t_string: String,
	}

	impl Decode for Item {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			Ok(Self {
				t_string: decoder.container()?.decode("tString")?,
			})
		}
	}

	#[derive(Debug)]
	struct Wrapper {
		#[allow(dead_code)]
		items: Vec<Item>,
	}

	impl Decode for Wrapper {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			Ok(Self {
				items: decoder.container()?.decode("tArray")?,
			})
		}
	}

	let source = map([("tArray", Value::Sequence(vec![map([("tString", Value::from(5_i64))])]))]);
	let err = unwrap_err(decode::<Wrapper>(&source));
	assert_eq!(err.to_string(), "Expected String at SELF.tArray[0].tString, found Int");
}

#[test]
fn container_kind_mismatch() {
	let err = unwrap_err(decode::<Vec<u8>>(&Value::from("abc")));
	assert_eq!(err.to_string(), "Expected Sequence at SELF, found String");
	let err = unwrap_err(decode::<BTreeMap<String, u8>>(&Value::Null));
	assert!(matches!(err, CodingError::ValueNotFound { expected: "Map", .. }));
}

#[test]
fn depth_limit_stops_deep_nesting() {
	let mut value = Value::Sequence(Vec::new());
	for _ in 0..10 {
		value = Value::Sequence(vec![value]);
	}

	#[derive(Debug)]
	struct Deep;

	impl Decode for Deep {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			let mut items = decoder.unkeyed_container()?;
			if !items.is_at_end() {
				items.decode::<Deep>()?;
			}
			Ok(Deep)
		}
	}

	decode::<Deep>(&value).expect("default depth is enough");

	let shallow = DecodeOptions {
		max_depth: 4,
		..DecodeOptions::default()
	};
	let err = unwrap_err(decode_value::<Deep>(&value, &shallow));
	assert!(matches!(err, CodingError::DepthExceeded { max_depth: 4, .. }));
	assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("SELF[0][0][0][0]"));
}

#[test]
fn token_strategy_matches_by_equality() {
	let options = DecodeOptions {
		null_strategy: NullStrategy::Token(Value::from(-1_i64)),
		..DecodeOptions::default()
	};
	let value: Option<i64> = decode_value(&Value::from(-1_i64), &options).expect("decode succeeds");
	assert_eq!(value, None);
	let value: Option<i64> = decode_value(&Value::from(2_i64), &options).expect("decode succeeds");
	assert_eq!(value, Some(2));
}

#[test]
fn user_info_is_visible_to_visitors() {
	struct Scaled(i64);

	impl Decode for Scaled {
		fn decode(decoder: &Decoder<'_>) -> Result<Self> {
			let factor = decoder.user_info().get("factor").and_then(Value::as_i64).unwrap_or(1);
			Ok(Scaled(decoder.single_value_container().decode::<i64>()? * factor))
		}
	}

	let mut options = DecodeOptions::default();
	options.user_info.insert("factor".to_owned(), Value::from(3_i64));
	let scaled: Scaled = decode_value(&Value::from(7_i64), &options).expect("decode succeeds");
	assert_eq!(scaled.0, 21);
}
