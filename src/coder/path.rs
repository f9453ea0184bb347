use std::fmt;

use crate::coder::{CodingError, Result};

/// Reserved key used by `super_encoder()` and read back by `super_decoder_for_key("super")`.
pub const SUPER_KEY: &str = "super";

const ROOT_LABEL: &str = "SELF";

/// One step of a coding path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
	/// Named map field.
	Field(String),
	/// Zero-based sequence index.
	Index(usize),
}

/// Immutable location of a value inside nested containers.
///
/// Appending returns a new path; the receiver is never changed. Paths only
/// feed diagnostics and lookups, never control flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodingPath {
	steps: Vec<PathStep>,
}

impl CodingPath {
	/// Empty path addressing the root value.
	pub fn root() -> Self {
		Self::default()
	}

	/// Ordered steps from the root.
	pub fn steps(&self) -> &[PathStep] {
		&self.steps
	}

	/// Whether this path addresses the root value.
	pub fn is_root(&self) -> bool {
		self.steps.is_empty()
	}

	/// New path with a trailing field step.
	pub fn appending_key(&self, key: &str) -> Self {
		self.appending(PathStep::Field(key.to_owned()))
	}

	/// New path with a trailing index step.
	pub fn appending_index(&self, index: usize) -> Self {
		self.appending(PathStep::Index(index))
	}

	/// New path with one more step.
	pub fn appending(&self, step: PathStep) -> Self {
		let mut steps = Vec::with_capacity(self.steps.len() + 1);
		steps.extend_from_slice(&self.steps);
		steps.push(step);
		Self { steps }
	}

	/// Parse dotted field syntax with optional `[index]` selectors, e.g. `items[0].name`.
	///
	/// A leading `SELF` segment, as produced by `Display`, is accepted and ignored.
	pub fn parse(input: &str) -> Result<Self> {
		let body = match input.strip_prefix(ROOT_LABEL) {
			Some(rest) if rest.is_empty() => return Ok(Self::root()),
			Some(rest) if rest.starts_with('.') => &rest[1..],
			Some(rest) if rest.starts_with('[') => rest,
			_ => input,
		};
		if body.is_empty() {
			return Err(CodingError::InvalidPath { path: input.to_owned() });
		}

		let bytes = body.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && bytes[idx] != b'.' && bytes[idx] != b'[' {
				idx += 1;
			}

			// Only a leading index may omit its field name.
			if idx == start && !(start == 0 && bytes[idx] == b'[') {
				return Err(CodingError::InvalidPath { path: input.to_owned() });
			}
			if idx > start {
				steps.push(PathStep::Field(body[start..idx].to_owned()));
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(CodingError::InvalidPath { path: input.to_owned() });
				}

				let number = body[n_start..idx]
					.parse::<usize>()
					.map_err(|_| CodingError::InvalidPath { path: input.to_owned() })?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(CodingError::InvalidPath { path: input.to_owned() });
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(CodingError::InvalidPath { path: input.to_owned() });
				}
			}
		}

		Ok(Self { steps })
	}
}

impl fmt::Display for CodingPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(ROOT_LABEL)?;
		for step in &self.steps {
			match step {
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}
