//! Shared test helpers for workspace crates.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture as UTF-8 text.
///
/// # Panics
///
/// Panics when the fixture is missing or unreadable.
pub fn read_fixture(name: &str) -> String {
	let path = fixture_path(name);
	std::fs::read_to_string(&path).unwrap_or_else(|err| panic!("fixture {} unreadable: {err}", path.display()))
}

/// Read and deserialize a JSON fixture.
///
/// # Panics
///
/// Panics when the fixture is missing or does not deserialize as `T`.
pub fn read_json_fixture<T: DeserializeOwned>(name: &str) -> T {
	serde_json::from_str(&read_fixture(name)).unwrap_or_else(|err| panic!("fixture {name} is not valid JSON for the requested type: {err}"))
}
