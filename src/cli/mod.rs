//! The CLI surface (§10.1): subcommands, verbosity-gated progress reporting, and terminal theming.
//! Modeled on the teacher's `clap`-derived subcommand dispatch and `step`/`start`/`finish` progress
//! helpers.

pub mod commands;
pub mod theme;

/// How much progress output a subcommand should print to standard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
	/// Print nothing but the final result.
	Quiet,
	/// Print a success/failure banner only.
	Normal,
	/// Print every pipeline stage as it runs (`Reading`, `Tokenizing`, `Parsing`, `Writing`).
	Verbose,
}

/// Prints one pipeline stage, gated on `verbosity` being [`Verbosity::Verbose`].
pub fn step(verbosity: Verbosity, stage: &str, detail: &str) {
	if verbosity == Verbosity::Verbose {
		if detail.is_empty() {
			eprintln!("  {}", theme::stage(stage));
		} else {
			eprintln!("  {} {detail}", theme::stage(stage));
		}
	}
}

/// Prints a final success banner, gated on `verbosity` being at least [`Verbosity::Normal`].
pub fn finish_success(verbosity: Verbosity, action: &str) {
	if verbosity != Verbosity::Quiet {
		eprintln!("{} {action}", theme::success("done"));
	}
}

/// Prints a final failure banner, unconditionally - a failing subcommand is always reported,
/// regardless of `--quiet`.
pub fn finish_failure(error: &anyhow::Error) {
	eprintln!("{} {error}", theme::failure("error"));
}

/// Runs the core pipeline end to end: reads `path`, tokenizes, and parses/checks/emits, reporting
/// each stage at [`Verbosity::Verbose`]. Returns the emitted C translation unit.
///
/// # Errors
/// Returns an I/O error if `path` cannot be read, or the first
/// [`treelang::diagnostics::CompileError`](crate::diagnostics::CompileError) encountered while
/// compiling.
pub fn run_pipeline(path: &std::path::Path, verbosity: Verbosity) -> anyhow::Result<String> {
	use anyhow::Context as _;

	step(verbosity, "Reading", &path.display().to_string());
	let source = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

	step(verbosity, "Tokenizing", "");
	let tokens = crate::lexer::tokenize(&source);

	step(verbosity, "Parsing", "");
	let mut context = crate::context::Context::new(path.display().to_string());
	crate::parser::parse_program(tokens, &mut context)?;

	Ok(context.finish_output())
}

/// The default output `.c` path for a given source path: the same file stem, in the same
/// directory, with a `.c` extension (§6).
#[must_use]
pub fn default_output_path(source_path: &std::path::Path) -> std::path::PathBuf {
	source_path.with_extension("c")
}
