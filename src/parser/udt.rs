//! `UDT` = `Identifier uat { Variable* } ufn { FunctionDefinition* }` (§4.5).
//!
//! §4.5's grammar line for `UDT` omits the leading name token, but §3 requires every UDT to have "a
//! nominal name"; this resolves the gap by taking the `Identifier` immediately before `uat` as that
//! name (see DESIGN.md).

use crate::context::Context;
use crate::diagnostics::ErrorKind;
use crate::lexer::TokenKind;
use crate::parser::expression::type_name_to_c;
use crate::parser::function::parse_function_definition;
use crate::parser::stream::TokenStream;
use crate::parser::types;
use crate::scopes::Scope;
use crate::signature::{self, Signature};

/// Parses one UDT definition: its attribute scope (`uat { ... }`), then its method scope
/// (`ufn { ... }`), registering the UDT - attributes and all - into the UDT table and the global
/// scope before any method body is parsed, so methods may refer to the UDT by name and a method may
/// recurse into itself (§9 "Cyclic references").
///
/// # Errors
/// Returns a *Reserved-Name* error if the UDT name is reserved, a *Scope* error if declared below
/// the top level, a *Name* error on a duplicate attribute or duplicate UDT, or any error propagated
/// from parsing a method.
pub fn parse_udt(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<()> {
	let name_token = stream.expect(TokenKind::Identifier, context)?;
	if context.is_reserved_name(&name_token.value) {
		return Err(context
			.error(ErrorKind::ReservedName, name_token.line, name_token.column, format!("`{}` is a reserved name", name_token.value))
			.into());
	}
	if !context.scopes.is_global_scope() {
		return Err(context.error(ErrorKind::Scope, name_token.line, name_token.column, "UDTs may only be declared at the top level").into());
	}

	stream.expect(TokenKind::KeywordUat, context)?;
	stream.expect(TokenKind::LeftBrace, context)?;
	let mut attributes = Scope::new();
	while !stream.next_is(TokenKind::RightBrace) {
		let (attribute_type, attribute_name) = types::parse_variable(stream, context)?;
		if !attributes.insert(attribute_name.value.clone(), signature::encode_variable(&attribute_type)) {
			return Err(context
				.error(ErrorKind::Name, attribute_name.line, attribute_name.column, format!("duplicate attribute `{}`", attribute_name.value))
				.into());
		}
	}
	stream.expect(TokenKind::RightBrace, context)?;

	if !context.udts.insert(name_token.value.clone(), attributes, Scope::new()) {
		return Err(context.error(ErrorKind::Name, name_token.line, name_token.column, format!("`{}` is already declared", name_token.value)).into());
	}
	if !context.scopes.insert(name_token.value.clone(), signature::encode_udt(&name_token.value)) {
		return Err(context.error(ErrorKind::Name, name_token.line, name_token.column, format!("`{}` is already declared", name_token.value)).into());
	}

	emit_struct_and_constructor(context, &name_token.value);

	stream.expect(TokenKind::KeywordUfn, context)?;
	stream.expect(TokenKind::LeftBrace, context)?;
	while !stream.next_is(TokenKind::RightBrace) {
		parse_function_definition(stream, context, Some(&name_token.value))?;
	}
	stream.expect(TokenKind::RightBrace, context)?;

	Ok(())
}

/// Emits the UDT's `typedef struct _T_ { … } T;` and its `T* construct_T(attr1_, …) { … }`
/// constructor (§4.5). A UDT with zero attributes still emits both, with an empty parameter list.
fn emit_struct_and_constructor(context: &mut Context, udt_name: &str) {
	let attributes = context.udts.lookup(udt_name).expect("just inserted above").attributes.clone();
	let attribute_types: Vec<(String, String)> = attributes
		.names_in_order()
		.iter()
		.map(|name| {
			let type_name = match signature::decode(attributes.lookup(name).expect("name came from names_in_order")) {
				Some(Signature::Variable(type_name)) => type_name,
				_ => unreachable!("attribute scopes only ever hold Variable signatures"),
			};
			(name.clone(), type_name)
		})
		.collect();

	context.emit_line(&format!("typedef struct _{udt_name}_ {{"));
	context.enter_indent();
	for (name, type_name) in &attribute_types {
		context.emit_line(&format!("{} {name};", type_name_to_c(type_name)));
	}
	context.exit_indent();
	context.emit_line(&format!("}} {udt_name};"));

	let parameters: Vec<String> = attribute_types.iter().map(|(name, type_name)| format!("{} {name}_", type_name_to_c(type_name))).collect();
	context.emit_line(&format!("{udt_name}* construct_{udt_name}({}) {{", parameters.join(", ")));
	context.enter_indent();
	context.emit_line(&format!("{udt_name}* _own_ = malloc(sizeof({udt_name}));"));
	for (name, _) in &attribute_types {
		context.emit_line(&format!("_own_->{name} = {name}_;"));
	}
	context.emit_line("return _own_;");
	context.exit_indent();
	context.emit_line("}");
}

#[cfg(test)]
mod tests {
	fn compile(source: &str) -> anyhow::Result<String> {
		crate::compile(source, "test.tl")
	}

	#[test]
	fn zero_attribute_udt_still_emits_struct_and_constructor() {
		let emitted = compile("Empty uat {} ufn {} start {}").unwrap();
		assert!(emitted.contains("typedef struct _Empty_ {"));
		assert!(emitted.contains("Empty* construct_Empty() {"));
	}

	#[test]
	fn duplicate_udt_name_is_a_name_error() {
		let source = "Point uat { int x } ufn {} Point uat { int y } ufn {} start {}";
		assert!(compile(source).is_err());
	}

	#[test]
	fn duplicate_attribute_is_a_name_error() {
		let source = "Point uat { int x int x } ufn {} start {}";
		assert!(compile(source).is_err());
	}

	#[test]
	fn reserved_udt_name_is_rejected() {
		assert!(compile("int uat {} ufn {} start {}").is_err());
	}

	#[test]
	fn attribute_order_is_preserved_for_the_constructor_parameter_list() {
		let emitted = compile("Point uat { int x int y } ufn {} start {}").unwrap();
		assert!(emitted.contains("construct_Point(int x_, int y_)"));
	}
}
