use crate::coder::Value;

/// Marker string used by [`NullStrategy::string_null`].
pub const NULL_MARKER: &str = "$null";

/// How null is represented in a dynamic tree.
///
/// Encoder and decoder must be configured with the same strategy for nulls
/// to survive a round trip; neither side checks the other.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NullStrategy {
	/// Null map entries and sequence elements are dropped entirely.
	Omit,
	/// Null is `Value::Null`.
	#[default]
	Sentinel,
	/// Null is a reserved string literal.
	Marker(Box<str>),
	/// Null is a dedicated token value matched by equality.
	Token(Value),
}

impl NullStrategy {
	/// Marker strategy using `"$null"`, usable with stores that cannot hold null.
	pub fn string_null() -> Self {
		NullStrategy::Marker(NULL_MARKER.into())
	}

	/// Value written in place of null, or `None` when the entry is omitted.
	pub fn placeholder(&self) -> Option<Value> {
		match self {
			NullStrategy::Omit => None,
			NullStrategy::Sentinel => Some(Value::Null),
			NullStrategy::Marker(marker) => Some(Value::String(marker.to_string())),
			NullStrategy::Token(token) => Some(token.clone()),
		}
	}

	/// Whether `value` represents null under this strategy.
	pub fn is_null(&self, value: &Value) -> bool {
		match self {
			NullStrategy::Omit | NullStrategy::Sentinel => value.is_null(),
			NullStrategy::Marker(marker) => value.as_str() == Some(marker.as_ref()),
			NullStrategy::Token(token) => value == token,
		}
	}

	/// Short label for logs.
	pub fn label(&self) -> &'static str {
		match self {
			NullStrategy::Omit => "omit",
			NullStrategy::Sentinel => "sentinel",
			NullStrategy::Marker(_) => "marker",
			NullStrategy::Token(_) => "token",
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::coder::{NullStrategy, Value};

	#[test]
	fn placeholders_match_their_own_predicate() {
		let strategies = [
			NullStrategy::Sentinel,
			NullStrategy::string_null(),
			NullStrategy::Token(Value::Bytes(Vec::new())),
		];
		for strategy in strategies {
			let placeholder = strategy.placeholder().expect("placeholder strategies produce a value");
			assert!(strategy.is_null(&placeholder), "{} should recognise its placeholder", strategy.label());
		}
		assert_eq!(NullStrategy::Omit.placeholder(), None);
	}

	#[test]
	fn marker_only_matches_exact_string() {
		let strategy = NullStrategy::string_null();
		assert!(strategy.is_null(&Value::from("$null")));
		assert!(!strategy.is_null(&Value::from("null")));
		assert!(!strategy.is_null(&Value::Null));
	}

	#[test]
	fn token_matches_by_equality() {
		let strategy = NullStrategy::Token(Value::from("<none>"));
		assert!(strategy.is_null(&Value::from("<none>")));
		assert!(!strategy.is_null(&Value::Null));
	}
}
