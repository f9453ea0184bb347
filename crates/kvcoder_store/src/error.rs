use kvcoder::coder::CodingError;
use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors produced by store persistence and typed entry access.
#[derive(Debug, Error)]
pub enum StoreError {
	/// Filesystem failure while loading or flushing.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Store file is not a JSON object of serialized values.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Typed encode or decode of an entry failed.
	#[error("entry {key}: {source}")]
	Coding {
		/// Entry key being encoded or decoded.
		key: String,
		/// Underlying coding failure.
		#[source]
		source: CodingError,
	},
	/// No entry exists for a required key.
	#[error("missing entry: {key}")]
	Missing {
		/// Requested key.
		key: String,
	},
}
