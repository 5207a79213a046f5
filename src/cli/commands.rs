//! The CLI subcommands (§10.1 of SPEC_FULL.md): `transpile`, `check`, `build`, and `run`, dispatched
//! through an `enum_dispatch`-generated trait, the same shape as the teacher's `CabinCommand` and
//! `SubCommand`.

use anyhow::Context as _;

use crate::cli::{self, Verbosity};

/// The behavior shared by every subcommand: run it to completion, reporting progress and errors to
/// standard error, and return an error iff the subcommand's exit code should be non-zero.
#[enum_dispatch::enum_dispatch]
pub trait CompilerCommand {
	/// Executes this subcommand.
	///
	/// # Errors
	/// Returns the first I/O, compile, or native-compiler error encountered.
	fn execute(self) -> anyhow::Result<()>;
}

/// The top-level subcommand enum parsed by `clap` from the command line (§6 "CLI (driver)").
#[derive(clap::Subcommand)]
#[enum_dispatch::enum_dispatch(CompilerCommand)]
pub enum SubCommand {
	/// Runs the core pipeline and writes the emitted `.c` file (and the bundled runtime header)
	/// beside it. The direct analogue of the bare CLI surface in spec §6.
	Transpile(TranspileCommand),
	/// Runs the core pipeline but discards the emitted C text, reporting success/failure only.
	Check(CheckCommand),
	/// Transpiles, then invokes a native C compiler to produce a native binary.
	Build(BuildCommand),
	/// Builds, then executes the resulting binary and forwards its exit code.
	Run(RunCommand),
}

/// Shared arguments accepted by every subcommand that reads a source file.
fn verbosity_from(verbose: bool, quiet: bool) -> Verbosity {
	if quiet {
		Verbosity::Quiet
	} else if verbose {
		Verbosity::Verbose
	} else {
		Verbosity::Normal
	}
}

/// Loads the project configuration from `--config`, falling back to `langc.toml` in the current
/// directory, and finally to built-in defaults if neither exists (§10.3).
fn load_config(config_path: &Option<std::path::PathBuf>) -> anyhow::Result<crate::config::ProjectConfig> {
	let path = config_path.clone().unwrap_or_else(|| std::path::PathBuf::from("langc.toml"));
	crate::config::load(&path)
}

/// `transpile <file> [-o <path>]`.
#[derive(clap::Parser)]
pub struct TranspileCommand {
	/// Path to the source file to compile.
	pub file: std::path::PathBuf,
	/// Output path for the emitted C file. Defaults to the source file with its extension replaced
	/// by `.c` (§6).
	#[arg(short, long)]
	pub output: Option<std::path::PathBuf>,
	/// Print every pipeline stage as it runs.
	#[arg(short, long)]
	pub verbose: bool,
	/// Suppress all non-error output.
	#[arg(short, long)]
	pub quiet: bool,
	/// Path to a project configuration file. Defaults to `langc.toml` in the current directory.
	#[arg(long)]
	pub config: Option<std::path::PathBuf>,
}

impl CompilerCommand for TranspileCommand {
	fn execute(self) -> anyhow::Result<()> {
		let verbosity = verbosity_from(self.verbose, self.quiet);
		let config = load_config(&self.config)?;

		let emitted = cli::run_pipeline(&self.file, verbosity)?;
		let output_path = self.output.unwrap_or_else(|| cli::default_output_path(&self.file));

		cli::step(verbosity, "Writing", &output_path.display().to_string());
		std::fs::write(&output_path, emitted).with_context(|| format!("failed to write {}", output_path.display()))?;
		let runtime_directory = output_path.parent().unwrap_or(&config.output_directory);
		crate::runtime::write_beside(runtime_directory).with_context(|| format!("failed to write the runtime header beside {}", output_path.display()))?;

		cli::finish_success(verbosity, &format!("wrote {}", output_path.display()));
		Ok(())
	}
}

/// `check <file>`.
#[derive(clap::Parser)]
pub struct CheckCommand {
	/// Path to the source file to check.
	pub file: std::path::PathBuf,
	/// Print every pipeline stage as it runs.
	#[arg(short, long)]
	pub verbose: bool,
	/// Suppress all non-error output.
	#[arg(short, long)]
	pub quiet: bool,
}

impl CompilerCommand for CheckCommand {
	fn execute(self) -> anyhow::Result<()> {
		let verbosity = verbosity_from(self.verbose, self.quiet);
		cli::run_pipeline(&self.file, verbosity)?;
		cli::finish_success(verbosity, &format!("{} is well-formed", self.file.display()));
		Ok(())
	}
}

/// `build <file> [-o <path>]`.
#[derive(clap::Parser)]
pub struct BuildCommand {
	/// Path to the source file to compile.
	pub file: std::path::PathBuf,
	/// Output path for the native executable. Defaults to the source file's stem in the current
	/// directory.
	#[arg(short, long)]
	pub output: Option<std::path::PathBuf>,
	/// Print every pipeline stage as it runs.
	#[arg(short, long)]
	pub verbose: bool,
	/// Suppress all non-error output.
	#[arg(short, long)]
	pub quiet: bool,
	/// Path to a project configuration file. Defaults to `langc.toml` in the current directory.
	#[arg(long)]
	pub config: Option<std::path::PathBuf>,
}

impl CompilerCommand for BuildCommand {
	fn execute(self) -> anyhow::Result<()> {
		let verbosity = verbosity_from(self.verbose, self.quiet);
		let config = load_config(&self.config)?;
		let executable_path = build_native(&self.file, self.output, verbosity, &config)?;
		cli::finish_success(verbosity, &format!("built {}", executable_path.display()));
		Ok(())
	}
}

/// `run <file>`.
#[derive(clap::Parser)]
pub struct RunCommand {
	/// Path to the source file to compile and run.
	pub file: std::path::PathBuf,
	/// Print every pipeline stage as it runs.
	#[arg(short, long)]
	pub verbose: bool,
	/// Suppress all non-error output.
	#[arg(short, long)]
	pub quiet: bool,
	/// Path to a project configuration file. Defaults to `langc.toml` in the current directory.
	#[arg(long)]
	pub config: Option<std::path::PathBuf>,
}

impl CompilerCommand for RunCommand {
	fn execute(self) -> anyhow::Result<()> {
		let verbosity = verbosity_from(self.verbose, self.quiet);
		let config = load_config(&self.config)?;
		let executable_path = build_native(&self.file, None, verbosity, &config)?;

		cli::step(verbosity, "Running", &executable_path.display().to_string());
		let status = crate::compiler::run_native_executable(&executable_path)?;
		std::process::exit(status.code().unwrap_or(1));
	}
}

/// Shared by `build` and `run`: transpile to a temporary `.c` file, then invoke a native C compiler
/// on it, returning the path to the resulting native executable.
fn build_native(source_path: &std::path::Path, output: Option<std::path::PathBuf>, verbosity: Verbosity, config: &crate::config::ProjectConfig) -> anyhow::Result<std::path::PathBuf> {
	let emitted = cli::run_pipeline(source_path, verbosity)?;

	let work_directory = std::env::temp_dir();
	let c_path = work_directory.join(source_path.with_extension("c").file_name().context("source path has no file name")?);
	cli::step(verbosity, "Writing", &c_path.display().to_string());
	std::fs::write(&c_path, emitted)?;
	crate::runtime::write_beside(&work_directory)?;

	let executable_extension = crate::compiler::Os::current().executable_extension();
	let executable_path = output.unwrap_or_else(|| {
		let stem = source_path.file_stem().map(std::ffi::OsStr::to_owned).unwrap_or_default();
		std::path::PathBuf::from(stem).with_extension(executable_extension.trim_start_matches('.'))
	});

	cli::step(verbosity, "Compiling", &format!("{} -> {}", c_path.display(), executable_path.display()));
	match crate::compiler::compile_c_to(&c_path, &executable_path, &config.preferred_compilers) {
		Ok(()) => Ok(executable_path),
		Err(error) if config.show_raw_stderr => Err(error),
		Err(error) => Err(error.context("native C compilation failed (pass --config with show_raw_stderr = true for full compiler output)")),
	}
}
