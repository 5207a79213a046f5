//! `FunctionDefinition` = `( fun Identifier ( Variable* ) ( Type ) Block )` (§4.5). Shared between
//! top-level function declarations and UDT methods; `owner` distinguishes the two.

use crate::context::Context;
use crate::diagnostics::ErrorKind;
use crate::lexer::{Token, TokenKind};
use crate::parser::expression::type_name_to_c;
use crate::parser::statement::parse_statement;
use crate::parser::stream::TokenStream;
use crate::parser::types;
use crate::signature;

/// Parses one `FunctionDefinition`. When `owner` is `Some(udt_name)`, this is a method of that UDT:
/// its signature is registered in the UDT's method scope rather than the lexical scope stack, its
/// body sees `own` bound to a first implicit receiver parameter, and its emitted prologue takes a
/// `UdtName* _own_` first parameter (§4.5).
///
/// The function's signature is registered before its body is parsed, allowing direct recursion
/// (§4.5) - but, for a method, only *self*-recursion: sibling methods are not yet registered in the
/// method scope when an earlier method's body is parsed, so mutual recursion between methods of the
/// same UDT is not supported (see DESIGN.md).
///
/// # Errors
/// Returns a *Parse* error for a malformed definition, a *Reserved-Name* error if the function name
/// is reserved, a *Scope* error if a function is declared somewhere other than the top level, a
/// *Name* error on redeclaration, or any error propagated from parsing its body.
pub fn parse_function_definition(stream: &mut TokenStream, context: &mut Context, owner: Option<&str>) -> anyhow::Result<()> {
	stream.expect(TokenKind::LeftParenthesis, context)?;
	stream.expect(TokenKind::KeywordFun, context)?;
	let name_token = stream.expect(TokenKind::Identifier, context)?;
	if context.is_reserved_name(&name_token.value) {
		return Err(context
			.error(ErrorKind::ReservedName, name_token.line, name_token.column, format!("`{}` is a reserved name", name_token.value))
			.into());
	}
	if !context.scopes.is_global_scope() {
		return Err(context
			.error(ErrorKind::Scope, name_token.line, name_token.column, "functions may only be declared at the top level or as UDT methods")
			.into());
	}

	let inputs = parse_input_list(stream, context)?;
	let input_types: Vec<String> = inputs.iter().map(|(type_name, _)| type_name.clone()).collect();

	stream.expect(TokenKind::LeftParenthesis, context)?;
	let output_type = types::parse_type(stream, context)?;
	stream.expect(TokenKind::RightParenthesis, context)?;

	let encoded = signature::encode_function(&name_token.value, &input_types, &output_type);
	let inserted = match owner {
		Some(udt_name) => context.udts.lookup_mut(udt_name).expect("owner UDT was inserted before its methods were parsed").methods.insert(name_token.value.clone(), encoded),
		None => context.scopes.insert(name_token.value.clone(), encoded),
	};
	if !inserted {
		return Err(context.error(ErrorKind::Name, name_token.line, name_token.column, format!("`{}` is already declared", name_token.value)).into());
	}

	emit_prologue(context, &name_token.value, owner, &output_type, &inputs);

	context.scopes.enter_scope();
	context.enter_indent();
	for (type_name, name) in &inputs {
		context.scopes.insert(name.value.clone(), signature::encode_variable(type_name));
	}
	let previous_return_type = context.current_return_type.replace(output_type);
	let previous_udt = context.current_udt.clone();
	context.current_udt = owner.map(str::to_owned);

	stream.expect(TokenKind::LeftBrace, context)?;
	while !stream.next_is(TokenKind::RightBrace) {
		parse_statement(stream, context)?;
	}
	stream.expect(TokenKind::RightBrace, context)?;

	context.current_return_type = previous_return_type;
	context.current_udt = previous_udt;
	context.exit_indent();
	context.scopes.exit_scope()?;
	context.emit_line("}");

	stream.expect(TokenKind::RightParenthesis, context)?;
	Ok(())
}

/// Parses the `( Variable* )` input list, accepting either a literal `void` marker or an empty
/// parenthesis pair for a zero-arity function, normalizing both to an empty list (§9).
fn parse_input_list(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Vec<(String, Token)>> {
	stream.expect(TokenKind::LeftParenthesis, context)?;

	if stream.next_is(TokenKind::Identifier) && stream.peek().value == "void" {
		stream.pop(context)?;
		stream.expect(TokenKind::RightParenthesis, context)?;
		return Ok(Vec::new());
	}

	let mut inputs = Vec::new();
	while !stream.next_is(TokenKind::RightParenthesis) {
		inputs.push(types::parse_variable(stream, context)?);
	}
	stream.expect(TokenKind::RightParenthesis, context)?;
	Ok(inputs)
}

/// Emits the C function prologue line, e.g. `int add(int a, int b) {` or, for a method,
/// `int sum(Point* _own_) {` (§4.5).
fn emit_prologue(context: &mut Context, name: &str, owner: Option<&str>, output_type: &str, inputs: &[(String, Token)]) {
	let mut parameters = Vec::new();
	if let Some(udt_name) = owner {
		parameters.push(format!("{udt_name}* _own_"));
	}
	for (type_name, name_token) in inputs {
		parameters.push(format!("{} {}", type_name_to_c(type_name), name_token.value));
	}
	context.emit_line(&format!("{} {name}({}) {{", type_name_to_c(output_type), parameters.join(", ")));
}

#[cfg(test)]
mod tests {
	fn compile(source: &str) -> anyhow::Result<String> {
		crate::compile(source, "test.tl")
	}

	#[test]
	fn zero_arity_void_marker_and_empty_parens_both_normalize_to_no_parameters() {
		let with_void = compile("(fun f (void) (void) { }) start {}").unwrap();
		let with_empty = compile("(fun g () (void) { }) start {}").unwrap();
		assert!(with_void.contains("void f() {"));
		assert!(with_empty.contains("void g() {"));
	}

	#[test]
	fn direct_recursion_is_allowed() {
		let source = "(fun fact (int n) (int) { return n * fact(n) }) start { dec int x = fact(1) }";
		assert!(compile(source).is_ok());
	}

	#[test]
	fn duplicate_function_name_is_a_name_error() {
		let source = "(fun f (void) (void) { }) (fun f (void) (void) { }) start {}";
		assert!(compile(source).is_err());
	}

	#[test]
	fn a_function_definition_cannot_appear_inside_a_block() {
		// `fun` is only ever recognized at the top of a `FunctionDefinition`/`UDT`; inside a block
		// it falls through to the expression grammar, which doesn't recognize it either, so this is
		// still rejected even though the specific diagnostic is a *Parse*, not a *Scope*, error.
		let source = "start { (fun f (void) (void) { }) }";
		assert!(compile(source).is_err());
	}
}
