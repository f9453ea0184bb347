mod decoder;
mod diagnostics;
mod encoder;
mod error;
mod null;
pub mod numeric;
mod path;
mod schema;
mod value;

/// Decode engine entry points, options, and containers.
pub use decoder::{
	DecodeOptions, Decoder, KeyedDecodingContainer, SingleValueDecodingContainer, UnkeyedDecodingContainer, decode, decode_value,
};
/// Encode engine entry points, options, and containers.
pub use encoder::{EncodeOptions, Encoder, KeyedEncodingContainer, SingleValueEncodingContainer, UnkeyedEncodingContainer, encode, encode_value};
/// Error and result aliases.
pub use error::{CodingError, Result};
/// Null representation policy.
pub use null::{NULL_MARKER, NullStrategy};
/// Coding path types.
pub use path::{CodingPath, PathStep, SUPER_KEY};
/// Schema visitor contract implemented by typed values.
pub use schema::{Decode, Encode};
/// Dynamic value tree types.
pub use value::{Integer, UserInfo, Value};
