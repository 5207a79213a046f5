//! Project configuration (§10.3 of SPEC_FULL.md): an optional `langc.toml` read with `toml_edit`.
//! Absence of the file is not an error - every field falls back to its default.

/// The project configuration, read from `langc.toml` if present.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
	/// C compilers to try before falling back to the built-in candidate list, in order.
	pub preferred_compilers: Vec<String>,
	/// Directory emitted `.c`/runtime/native-executable output is written to.
	pub output_directory: std::path::PathBuf,
	/// Whether to print a compiler's raw stderr verbatim on failure, rather than a condensed
	/// message.
	pub show_raw_stderr: bool,
}

impl Default for ProjectConfig {
	fn default() -> Self {
		Self {
			preferred_compilers: Vec::new(),
			output_directory: std::path::PathBuf::from("."),
			show_raw_stderr: false,
		}
	}
}

/// Loads a [`ProjectConfig`] from `path`. Returns the default configuration, unchanged, if `path`
/// does not exist.
///
/// # Errors
/// Returns an error if `path` exists but cannot be read or does not parse as TOML.
pub fn load(path: &std::path::Path) -> anyhow::Result<ProjectConfig> {
	if !path.exists() {
		return Ok(ProjectConfig::default());
	}

	let text = std::fs::read_to_string(path)?;
	let document = text.parse::<toml_edit::DocumentMut>()?;
	let mut config = ProjectConfig::default();

	if let Some(compilers) = document.get("compilers").and_then(toml_edit::Item::as_array) {
		config.preferred_compilers = compilers.iter().filter_map(|value| value.as_str().map(str::to_owned)).collect();
	}
	if let Some(directory) = document.get("output_directory").and_then(toml_edit::Item::as_str) {
		config.output_directory = std::path::PathBuf::from(directory);
	}
	if let Some(show_raw_stderr) = document.get("show_raw_stderr").and_then(toml_edit::Item::as_bool) {
		config.show_raw_stderr = show_raw_stderr;
	}

	Ok(config)
}

#[cfg(test)]
mod tests {
	use super::{load, ProjectConfig};

	#[test]
	fn missing_file_yields_defaults() {
		let config = load(std::path::Path::new("/nonexistent/langc.toml")).unwrap();
		assert!(config.preferred_compilers.is_empty());
		assert_eq!(config.output_directory, std::path::PathBuf::from("."));
		assert!(!config.show_raw_stderr);
	}

	#[test]
	fn default_is_permissive() {
		let config = ProjectConfig::default();
		assert!(!config.show_raw_stderr);
	}
}
