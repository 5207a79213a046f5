//! `Block`, `Statement`, `Tree`/`Branch`, `Return`, and `Declaration` (§4.5).

use crate::context::Context;
use crate::diagnostics::ErrorKind;
use crate::lexer::TokenKind;
use crate::parser::expression::{self, type_name_to_c};
use crate::parser::stream::TokenStream;
use crate::parser::types::{self, type_mismatch_error};
use crate::signature;

/// Parses a `Block` = `{ Statement* }`. Opens a new lexical scope and indentation level on entry,
/// closes both on exit (§3 Lifecycles); does not emit the braces themselves, since their surrounding
/// text (a bare block vs. a function prologue vs. an `if`/`else if`) is the caller's concern.
///
/// # Errors
/// Propagates any *Parse*/*Name*/*Type*/*Scope*/*Reserved-Name* error raised while parsing the
/// block's statements.
pub fn parse_block(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	stream.expect(TokenKind::LeftBrace, context)?;
	context.scopes.enter_scope();
	context.enter_indent();

	while !stream.next_is(TokenKind::RightBrace) {
		parse_statement(stream, context)?;
	}

	stream.expect(TokenKind::RightBrace, context)?;
	context.exit_indent();
	context.scopes.exit_scope()?;
	Ok(())
}

/// Parses a `Statement` = `Tree | Return | Declaration | Expression`, dispatching on the current
/// token.
///
/// # Errors
/// See [`parse_block`].
pub fn parse_statement(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	match stream.peek().kind {
		TokenKind::KeywordTree => parse_tree(stream, context),
		TokenKind::KeywordReturn => parse_return(stream, context),
		TokenKind::KeywordDec => parse_declaration(stream, context),
		_ => parse_expression_statement(stream, context),
	}
}

/// An `Expression` used as a standalone statement is wrapped in parentheses to delimit it from the
/// statement that follows, e.g. `(display_str("hello"))`.
fn parse_expression_statement(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	stream.expect(TokenKind::LeftParenthesis, context)?;
	let value = expression::parse_expression(stream, context)?;
	stream.expect(TokenKind::RightParenthesis, context)?;
	context.emit_line(&format!("{};", value.code));
	Ok(())
}

/// Parses `Tree` = `tree ( Branch+ )`, where `Branch` = `( | Expression | Block )`. Emits a chained
/// `if (…) { … } else if (…) { … }`; falls through with no trailing `else` if no branch matches
/// (§4.5).
fn parse_tree(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	let tree_token = stream.expect(TokenKind::KeywordTree, context)?;
	stream.expect(TokenKind::LeftParenthesis, context)?;

	let mut branch_count = 0;
	while !stream.next_is(TokenKind::RightParenthesis) {
		stream.expect(TokenKind::LeftParenthesis, context)?;
		stream.expect(TokenKind::Pipe, context)?;
		let condition = expression::parse_expression(stream, context)?;
		if condition.type_name != "bool" {
			return Err(type_mismatch_error(context, tree_token.line, tree_token.column, "bool", &condition.type_name));
		}
		stream.expect(TokenKind::Pipe, context)?;

		let keyword = if branch_count == 0 { "if" } else { "else if" };
		context.emit_line(&format!("{keyword} ({}) {{", condition.code));
		parse_block(stream, context)?;
		context.emit_line("}");

		stream.expect(TokenKind::RightParenthesis, context)?;
		branch_count += 1;
	}
	stream.expect(TokenKind::RightParenthesis, context)?;

	if branch_count == 0 {
		return Err(context.error(ErrorKind::Parse, tree_token.line, tree_token.column, "`tree` requires at least one branch").into());
	}
	Ok(())
}

/// Parses `Return` = `return Expression`. The expression's type must equal the declared output type
/// of the enclosing function (§4.5).
fn parse_return(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	let return_token = stream.expect(TokenKind::KeywordReturn, context)?;
	let value = expression::parse_expression(stream, context)?;

	let expected = context
		.current_return_type
		.clone()
		.ok_or_else(|| context.error(ErrorKind::Scope, return_token.line, return_token.column, "`return` used outside a function body"))?;
	if value.type_name != expected {
		return Err(type_mismatch_error(context, return_token.line, return_token.column, &expected, &value.type_name));
	}

	context.emit_line(&format!("return {};", value.code));
	Ok(())
}

/// Parses `Declaration` = `dec Variable = Expression`. The variable's type must equal the
/// expression's type; the new binding is inserted into the current scope (§4.5).
fn parse_declaration(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	stream.expect(TokenKind::KeywordDec, context)?;
	let (declared_type, name_token) = types::parse_variable(stream, context)?;
	stream.expect(TokenKind::Equal, context)?;
	let value = expression::parse_expression(stream, context)?;

	if value.type_name != declared_type {
		return Err(type_mismatch_error(context, name_token.line, name_token.column, &declared_type, &value.type_name));
	}
	if !context.scopes.insert(name_token.value.clone(), signature::encode_variable(&declared_type)) {
		return Err(context.error(ErrorKind::Name, name_token.line, name_token.column, format!("`{}` is already declared in this scope", name_token.value)).into());
	}

	context.emit_line(&format!("{} {} = {};", type_name_to_c(&declared_type), name_token.value, value.code));
	Ok(())
}

#[cfg(test)]
mod tests {
	fn compile(source: &str) -> anyhow::Result<String> {
		crate::compile(source, "test.tl")
	}

	#[test]
	fn tree_with_no_branches_is_a_parse_error() {
		assert!(compile("start { tree () }").is_err());
	}

	#[test]
	fn tree_condition_must_be_boolean() {
		assert!(compile("start { tree ( (|1| { }) ) }").is_err());
	}

	#[test]
	fn tree_falls_through_with_no_trailing_else_when_it_has_one_branch() {
		let emitted = compile(r#"start { tree ( (|true| { (display_str("a")) }) ) }"#).unwrap();
		assert!(emitted.contains("if (1) {"));
		assert!(!emitted.contains("else"));
	}

	#[test]
	fn return_outside_a_function_body_is_a_scope_error() {
		assert!(compile("start { return 1 }").is_err());
	}

	#[test]
	fn return_type_must_match_the_declared_output() {
		let source = "(fun f (void) (int) { return true }) start {}";
		assert!(compile(source).is_err());
	}

	#[test]
	fn block_scope_is_exited_on_close() {
		// `x` declared inside the `if` branch must not leak into the enclosing `start` block.
		let source = r#"start { tree ( (|true| { dec int x = 1 }) ) dec int x = 2 }"#;
		assert!(compile(source).is_ok());
	}
}
