//! The fused parser, type checker, and C emitter (C6): grammar recognition, type inference and
//! checking, and C text emission, all happening together in a single forward pass over tokens
//! (§1, §4.5).
//!
//! `Program` = zero or more `Import` lines, then a repeated mix of UDT and function definitions,
//! then a mandatory `start` block (see DESIGN.md for how this resolves §4.5's "either a UDT
//! definition or a Script" against the UDT round-trip scenario in §8, which needs both together).

pub mod builtins;
pub mod expression;
pub mod function;
pub mod statement;
pub mod stream;
pub mod types;
pub mod udt;

use crate::context::Context;
use crate::diagnostics::ErrorKind;
use crate::lexer::{Token, TokenKind};
use stream::TokenStream;

/// Parses and compiles an entire program from `tokens`, appending emitted C text to `context`.
///
/// # Errors
/// Returns the first [`crate::diagnostics::CompileError`] encountered anywhere in the program
/// (§4.5 "Failure semantics").
pub fn parse_program(tokens: std::collections::VecDeque<Token>, context: &mut Context) -> anyhow::Result<()> {
	let mut stream = TokenStream::new(tokens, context)?;

	// An empty source file is the one program shape that may skip the otherwise-mandatory `start`
	// block (§8 "Empty source -> emit the header only; exit 0"); anything that parses at least one
	// token still requires a `Script`'s mandatory `start` per §4.5.
	if stream.next_is(TokenKind::Eof) {
		return Ok(());
	}

	while stream.next_is(TokenKind::KeywordImport) {
		parse_import(&mut stream, context)?;
	}

	loop {
		if stream.next_is(TokenKind::KeywordStart) {
			break;
		}
		if stream.next_is(TokenKind::LeftParenthesis) {
			function::parse_function_definition(&mut stream, context, None)?;
		} else if stream.next_is(TokenKind::Identifier) {
			udt::parse_udt(&mut stream, context)?;
		} else {
			let current = stream.peek().clone();
			return Err(context
				.error(ErrorKind::Parse, current.line, current.column, format!("expected a UDT definition, a function definition, or `start`, found `{}`", current.value))
				.into());
		}
	}

	parse_start_block(&mut stream, context)?;
	stream.expect(TokenKind::Eof, context)?;
	Ok(())
}

/// Parses `Import` = `import Identifier : string-location`. Resolution of the referenced file is an
/// external concern (§1, §4.5); this only validates and consumes the syntax.
fn parse_import(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	stream.expect(TokenKind::KeywordImport, context)?;
	stream.expect(TokenKind::Identifier, context)?;
	stream.expect(TokenKind::Colon, context)?;
	stream.expect(TokenKind::StringLiteral, context)?;
	Ok(())
}

/// Parses the mandatory `start { ... }` block and emits it as C's `int main()` (§4.5).
fn parse_start_block(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	stream.expect(TokenKind::KeywordStart, context)?;
	context.emit_line("int main() {");
	context.scopes.enter_scope();
	context.enter_indent();

	stream.expect(TokenKind::LeftBrace, context)?;
	while !stream.next_is(TokenKind::RightBrace) {
		statement::parse_statement(stream, context)?;
	}
	stream.expect(TokenKind::RightBrace, context)?;

	context.exit_indent();
	context.scopes.exit_scope()?;
	context.emit_line("}");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::parse_program;
	use crate::context::Context;

	fn compile(source: &str) -> anyhow::Result<String> {
		let mut context = Context::new("test.tl".to_owned());
		let tokens = crate::lexer::tokenize(source);
		parse_program(tokens, &mut context)?;
		Ok(context.finish_output())
	}

	#[test]
	fn empty_source_skips_the_mandatory_start_block() {
		let emitted = compile("").unwrap();
		assert!(!emitted.contains("int main()"));
	}

	#[test]
	fn non_empty_source_without_start_is_a_parse_error() {
		assert!(compile("(fun f (void) (void) { })").is_err());
	}

	#[test]
	fn scope_depth_is_balanced_after_a_successful_compile() {
		let mut context = Context::new("test.tl".to_owned());
		let tokens = crate::lexer::tokenize("start { dec int x = 1 }");
		parse_program(tokens, &mut context).unwrap();
		assert_eq!(context.scopes.depth(), 1);
	}
}
