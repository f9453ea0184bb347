//! Diagnostic message assembly shared by the decode containers.

use std::fmt::Display;

use crate::coder::{CodingError, CodingPath, NullStrategy, Value};

/// Describe what was found at a location: `nil` or the runtime kind.
pub(crate) fn found_label(value: &Value, strategy: &NullStrategy) -> &'static str {
	if strategy.is_null(value) { "nil" } else { value.kind_name() }
}

/// Value had the wrong kind. Null values report as not-found instead.
pub(crate) fn mismatch(expected: &'static str, path: &CodingPath, value: &Value, strategy: &NullStrategy) -> CodingError {
	let found = found_label(value, strategy);
	let message = format!("Expected {expected} at {path}, found {found}");
	if strategy.is_null(value) {
		CodingError::ValueNotFound {
			expected,
			path: path.clone(),
			message,
		}
	} else {
		CodingError::TypeMismatch {
			expected,
			path: path.clone(),
			message,
		}
	}
}

/// Numeric value was the right kind but does not fit the requested width.
pub(crate) fn inexact(expected: &'static str, path: &CodingPath, source: impl Display) -> CodingError {
	CodingError::TypeMismatch {
		expected,
		path: path.clone(),
		message: format!("{source} at {path}, cannot be exactly represented by {expected}"),
	}
}

pub(crate) fn key_not_found(path: &CodingPath, key: &str) -> CodingError {
	CodingError::KeyNotFound {
		key: key.to_owned(),
		path: path.clone(),
		message: format!("Map does not contain key {}", path.appending_key(key)),
	}
}

pub(crate) fn index_not_found(path: &CodingPath, index: usize) -> CodingError {
	CodingError::IndexNotFound {
		index,
		path: path.clone(),
		message: format!("Sequence does not contain index {}", path.appending_index(index)),
	}
}

pub(crate) fn depth_exceeded(path: &CodingPath, max_depth: u32) -> CodingError {
	CodingError::DepthExceeded {
		max_depth,
		path: path.clone(),
	}
}
