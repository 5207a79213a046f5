//! The native C compiler driver (§1, out-of-scope-as-external-collaborator, carried in-crate per
//! SPEC_FULL.md §1): locates an installed C compiler, invokes it on emitted output, and runs the
//! resulting native executable. Grounded on the teacher's own compiler-invocation module.

use anyhow::Context as _;

/// The C compilers this driver knows how to invoke, in preference order.
const CANDIDATE_COMPILERS: [&str; 3] = ["clang", "gcc", "zig"];

/// The host operating system, relevant only for the native executable's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
	Windows,
	Unix,
}

impl Os {
	/// Detects the host operating system at compile time.
	#[must_use]
	pub fn current() -> Self {
		if cfg!(windows) {
			Self::Windows
		} else {
			Self::Unix
		}
	}

	/// The file extension a native executable takes on this OS (including the leading dot, or
	/// empty on Unix).
	#[must_use]
	pub fn executable_extension(self) -> &'static str {
		match self {
			Self::Windows => ".exe",
			Self::Unix => "",
		}
	}
}

/// Searches `PATH` for the first available compiler among `CANDIDATE_COMPILERS`, honoring
/// `preferred_order` first if given (from [`crate::config::ProjectConfig`]).
#[must_use]
pub fn find_c_compiler(preferred_order: &[String]) -> Option<String> {
	preferred_order
		.iter()
		.map(String::as_str)
		.chain(CANDIDATE_COMPILERS)
		.find(|candidate| which::which(candidate).is_ok())
		.map(str::to_owned)
}

/// Invokes a C compiler on `source_path`, producing a native executable at `output_path`.
///
/// # Errors
/// Returns an error if no C compiler is found on `PATH`, if the compiler process cannot be
/// spawned, or if the compiler exits with a failure status (the compiler's stderr is included in
/// the error).
pub fn compile_c_to(source_path: &std::path::Path, output_path: &std::path::Path, preferred_order: &[String]) -> anyhow::Result<()> {
	let compiler = find_c_compiler(preferred_order).context("no C compiler found on PATH (tried clang, gcc, zig)")?;

	let mut command = std::process::Command::new(&compiler);
	if compiler == "zig" {
		command.arg("cc");
	}
	command.arg(source_path).arg("-o").arg(output_path);

	let output = command.output().with_context(|| format!("failed to invoke `{compiler}`"))?;
	if !output.status.success() {
		anyhow::bail!("{compiler} failed to compile {}:\n{}", source_path.display(), String::from_utf8_lossy(&output.stderr));
	}
	Ok(())
}

/// Runs a previously compiled native executable, returning its exit status.
///
/// # Errors
/// Returns an error if the executable cannot be spawned.
pub fn run_native_executable(path: &std::path::Path) -> anyhow::Result<std::process::ExitStatus> {
	std::process::Command::new(path).status().with_context(|| format!("failed to run {}", path.display()))
}

#[cfg(test)]
mod tests {
	use super::Os;

	#[test]
	fn current_os_extension_is_empty_or_dot_exe() {
		let extension = Os::current().executable_extension();
		assert!(extension.is_empty() || extension == ".exe");
	}
}
