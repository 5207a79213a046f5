//! # treelang
//!
//! A single-source-file compiler for a small statically-typed imperative language that targets
//! portable C source code.
//!
//! ## Installation
//!
//! treelang can be installed cross-platform with Cargo:
//!
//! ```bash
//! cargo install treelang
//! ```

/// Bring the `Parser` trait into scope from `clap`, which allows parsing argument structs from the
/// command line. We assign it to underscore to indicate clearly that it's not used outside of
/// bringing its trait methods into scope.
use clap::Parser as _;

use treelang::cli::commands::{CompilerCommand as _, SubCommand};

/// The command-line arguments for the compiler.
#[derive(clap::Parser)]
struct TreelangArguments {
	/// The subcommand to run, such as `run`, `build`, `check`, or `transpile`.
	#[command(subcommand)]
	command: SubCommand,
}

/// The main entry point for the treelang compiler. This parses the arguments passed at the
/// command-line, and runs the given subcommand.
fn main() {
	if let Err(error) = TreelangArguments::parse().command.execute() {
		treelang::cli::finish_failure(&error);
		std::process::exit(1);
	}
}
