//! # treelang
//!
//! A single-source-file compiler for a small statically-typed imperative language that targets
//! portable C source code. A program is read in, tokenized, and run through a fused
//! recursive-descent parser, type checker, and C emitter in a single forward pass, producing a
//! self-contained C translation unit that can be fed to a standard C compiler.
//!
//! The front end (lexer, symbol/UDT tables, signature codec, and the fused parser/checker/emitter)
//! lives in [`lexer`], [`scopes`], [`udt_table`], [`signature`], and [`parser`]. Everything around
//! it - the CLI, the native C compiler driver, the bundled runtime, and project configuration - is
//! ambient tooling that every subcommand goes through.

/// The diagnostics module. Defines the taxonomy of compile errors (lex, parse, name, type, scope,
/// reserved-name) and their `FILE:LINE:COL: KIND message` rendering.
pub mod diagnostics;

/// The lexer module, which tokenizes source code into a stream of tokens.
pub mod lexer;

/// The context module, which threads the single mutable compilation state (scopes, UDT table,
/// output buffer, file name) through every parser production.
pub mod context;

/// The scopes module, which manages the lexical scope stack of variables and functions (C2).
pub mod scopes;

/// The UDT table module, mapping user-defined type names to their attribute and method scopes (C3).
pub mod udt_table;

/// The signature codec module, encoding and decoding the canonical signature strings stored in
/// the symbol and UDT tables (C5).
pub mod signature;

/// The parser module: the fused recursive-descent parser, type checker, and C emitter (C1 + C6).
pub mod parser;

/// The bundled C runtime ("stdlib_c") embedded into the binary and copied beside emitted output.
pub mod runtime;

/// The native C compiler driver: locating a C compiler, compiling emitted C, and running the result.
pub mod compiler;

/// The project configuration module (`langc.toml`).
pub mod config;

/// The CLI module: subcommands, verbosity-gated progress reporting, and terminal theming.
pub mod cli;

/// Compiles a single source string into C source text, written as the observable artifact that a
/// `transpile`/`build`/`run` subcommand hands off to disk or to a native C compiler.
///
/// # Parameters
/// - `source` - the full text of the language source file.
/// - `file_name` - the display name used in diagnostics (usually the path the source was read from).
///
/// # Returns
/// The emitted C translation unit, or the first diagnostic encountered while compiling.
///
/// # Errors
/// Returns the first [`diagnostics::CompileError`] encountered: an unrecognized token, an
/// unexpected token kind, an undeclared or duplicate name, a type mismatch, or a reserved-name
/// violation.
pub fn compile(source: &str, file_name: &str) -> anyhow::Result<String> {
	let mut context = context::Context::new(file_name.to_owned());
	let tokens = lexer::tokenize(source);
	parser::parse_program(tokens, &mut context)?;
	Ok(context.finish_output())
}
