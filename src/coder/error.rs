use thiserror::Error;

use crate::coder::CodingPath;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, CodingError>;

/// Errors produced while encoding typed values or decoding dynamic values.
///
/// Every data error carries the coding path it was raised at. Contract
/// violations, such as installing two containers on one encoder, panic
/// instead of surfacing here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodingError {
	/// A value was required but the location held null.
	#[error("{message}")]
	ValueNotFound {
		/// Expected type or width label.
		expected: &'static str,
		/// Location of the null value.
		path: CodingPath,
		/// Rendered diagnostic.
		message: String,
	},
	/// A value was present but had the wrong shape or range.
	#[error("{message}")]
	TypeMismatch {
		/// Expected type or width label.
		expected: &'static str,
		/// Location of the offending value.
		path: CodingPath,
		/// Rendered diagnostic.
		message: String,
	},
	/// A keyed container had no entry for the requested key.
	#[error("{message}")]
	KeyNotFound {
		/// Requested key.
		key: String,
		/// Location of the keyed container.
		path: CodingPath,
		/// Rendered diagnostic.
		message: String,
	},
	/// An unkeyed container was read past its last element.
	#[error("{message}")]
	IndexNotFound {
		/// Cursor position of the failed read.
		index: usize,
		/// Location of the unkeyed container.
		path: CodingPath,
		/// Rendered diagnostic.
		message: String,
	},
	/// Container nesting exceeded the configured decode depth.
	#[error("decode depth exceeded at {path} (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
		/// Location where the limit was hit.
		path: CodingPath,
	},
	/// A visitor rejected otherwise well-shaped data.
	#[error("data corrupted at {path}: {message}")]
	DataCorrupted {
		/// Location of the rejected value.
		path: CodingPath,
		/// Visitor-supplied reason.
		message: String,
	},
	/// Coding path expression syntax is invalid.
	#[error("invalid coding path: {path}")]
	InvalidPath {
		/// Original user-provided path string.
		path: String,
	},
}

impl CodingError {
	/// Build a visitor-level error at `path`.
	pub fn data_corrupted(path: &CodingPath, message: impl Into<String>) -> Self {
		CodingError::DataCorrupted {
			path: path.clone(),
			message: message.into(),
		}
	}

	/// Coding path the error was raised at, if it has one.
	pub fn path(&self) -> Option<&CodingPath> {
		match self {
			CodingError::ValueNotFound { path, .. }
			| CodingError::TypeMismatch { path, .. }
			| CodingError::KeyNotFound { path, .. }
			| CodingError::IndexNotFound { path, .. }
			| CodingError::DepthExceeded { path, .. }
			| CodingError::DataCorrupted { path, .. } => Some(path),
			CodingError::InvalidPath { .. } => None,
		}
	}
}
