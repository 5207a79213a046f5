//! The expression precedence ladder (§4.5): assignment, logical, equality, ordering, additive,
//! multiplicative, exponentiation, unary, compound assignment, member access, `new`, and primary -
//! each level implemented as "parse the next-higher level, then fold in this level's operators"
//! (precedence climbing), per the reference's right-recursive cascade.

use crate::context::Context;
use crate::diagnostics::ErrorKind;
use crate::lexer::TokenKind;
use crate::parser::builtins::BUILTIN_FUNCTIONS;
use crate::parser::stream::TokenStream;
use crate::parser::types::{is_numeric, to_c_primitive, type_mismatch_error};
use crate::signature::{self, Signature};

/// The result of parsing an expression: its synthesized type name (§3's type strings, compared by
/// plain string equality) and the C text it emits as. `is_lvalue` tracks whether this expression may
/// legally sit on the left of `=` or a compound-assignment operator (§4.5).
pub struct Typed {
	pub type_name: String,
	pub code: String,
	pub is_lvalue: bool,
}

impl Typed {
	fn rvalue(type_name: impl Into<String>, code: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			code: code.into(),
			is_lvalue: false,
		}
	}

	fn lvalue(type_name: impl Into<String>, code: impl Into<String>) -> Self {
		Self {
			type_name: type_name.into(),
			code: code.into(),
			is_lvalue: true,
		}
	}
}

/// Parses a full expression, starting at the lowest-precedence (assignment) level.
///
/// # Errors
/// Returns a *Parse* error for a malformed expression, or a *Type*/*Name* error for a semantic
/// violation encountered while synthesizing its type.
pub fn parse_expression(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	parse_assignment(stream, context)
}

fn parse_assignment(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let left = parse_logical(stream, context)?;
	if stream.next_is(TokenKind::Equal) {
		let token = stream.pop(context)?;
		if !left.is_lvalue {
			return Err(context.error(ErrorKind::Type, token.line, token.column, "left-hand side of `=` is not assignable").into());
		}
		let right = parse_assignment(stream, context)?;
		if left.type_name != right.type_name {
			return Err(type_mismatch_error(context, token.line, token.column, &left.type_name, &right.type_name));
		}
		return Ok(Typed::rvalue(left.type_name, format!("{} = {}", left.code, right.code)));
	}
	Ok(left)
}

fn parse_logical(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_equality(stream, context)?;
	loop {
		let operator = match stream.peek().kind {
			TokenKind::KeywordAnd => "&&",
			TokenKind::KeywordOr => "||",
			_ => break,
		};
		let token = stream.pop(context)?;
		let right = parse_equality(stream, context)?;
		require_both(context, &token, &left.type_name, &right.type_name, "bool")?;
		left = Typed::rvalue("bool", format!("({} {} {})", left.code, operator, right.code));
	}
	Ok(left)
}

fn parse_equality(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_ordering(stream, context)?;
	loop {
		let operator = match stream.peek().kind {
			TokenKind::DoubleEquals => "==",
			TokenKind::NotEquals => "!=",
			_ => break,
		};
		let token = stream.pop(context)?;
		let right = parse_ordering(stream, context)?;
		if left.type_name != right.type_name {
			return Err(type_mismatch_error(context, token.line, token.column, &left.type_name, &right.type_name));
		}
		left = Typed::rvalue("bool", format!("({} {} {})", left.code, operator, right.code));
	}
	Ok(left)
}

fn parse_ordering(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_additive(stream, context)?;
	loop {
		let operator = match stream.peek().kind {
			TokenKind::LessThan => "<",
			TokenKind::LessEquals => "<=",
			TokenKind::GreaterThan => ">",
			TokenKind::GreaterEquals => ">=",
			_ => break,
		};
		let token = stream.pop(context)?;
		let right = parse_additive(stream, context)?;
		require_same_numeric(context, &token, &left.type_name, &right.type_name)?;
		left = Typed::rvalue("bool", format!("({} {} {})", left.code, operator, right.code));
	}
	Ok(left)
}

fn parse_additive(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_multiplicative(stream, context)?;
	loop {
		let operator = match stream.peek().kind {
			TokenKind::Plus => "+",
			TokenKind::Minus => "-",
			_ => break,
		};
		let token = stream.pop(context)?;
		let right = parse_multiplicative(stream, context)?;
		let result_type = require_same_numeric(context, &token, &left.type_name, &right.type_name)?;
		left = Typed::rvalue(result_type, format!("({} {} {})", left.code, operator, right.code));
	}
	Ok(left)
}

fn parse_multiplicative(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_exponent(stream, context)?;
	loop {
		match stream.peek().kind {
			TokenKind::Asterisk | TokenKind::ForwardSlash => {
				let operator = if stream.peek().kind == TokenKind::Asterisk { "*" } else { "/" };
				let token = stream.pop(context)?;
				let right = parse_exponent(stream, context)?;
				let result_type = require_same_numeric(context, &token, &left.type_name, &right.type_name)?;
				left = Typed::rvalue(result_type, format!("({} {} {})", left.code, operator, right.code));
			}
			TokenKind::Percent => {
				let token = stream.pop(context)?;
				let right = parse_exponent(stream, context)?;
				require_both(context, &token, &left.type_name, &right.type_name, "int")?;
				left = Typed::rvalue("int", format!("({} % {})", left.code, right.code));
			}
			_ => break,
		}
	}
	Ok(left)
}

fn parse_exponent(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_unary(stream, context)?;
	while stream.next_is(TokenKind::StarStar) {
		let token = stream.pop(context)?;
		let right = parse_unary(stream, context)?;
		require_both(context, &token, &left.type_name, &right.type_name, "int")?;
		left = Typed::rvalue("int", format!("pow_int({}, {})", left.code, right.code));
	}
	Ok(left)
}

fn parse_unary(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	match stream.peek().kind {
		TokenKind::Bang => {
			let token = stream.pop(context)?;
			let operand = parse_unary(stream, context)?;
			if operand.type_name != "bool" {
				return Err(type_mismatch_error(context, token.line, token.column, "bool", &operand.type_name));
			}
			Ok(Typed::rvalue("bool", format!("!{}", operand.code)))
		}
		TokenKind::PlusPlus | TokenKind::MinusMinus => {
			let operator = if stream.peek().kind == TokenKind::PlusPlus { "++" } else { "--" };
			let token = stream.pop(context)?;
			let operand = parse_unary(stream, context)?;
			if !is_numeric(&operand.type_name) {
				return Err(type_mismatch_error(context, token.line, token.column, "int or flt", &operand.type_name));
			}
			Ok(Typed::rvalue(operand.type_name.clone(), format!("{operator}{}", operand.code)))
		}
		_ => parse_compound_assignment(stream, context),
	}
}

fn parse_compound_assignment(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_member_access(stream, context)?;
	loop {
		let operator = match stream.peek().kind {
			TokenKind::PlusEquals => "+=",
			TokenKind::MinusEquals => "-=",
			TokenKind::StarEquals => "*=",
			TokenKind::SlashEquals => "/=",
			_ => break,
		};
		let token = stream.pop(context)?;
		if !left.is_lvalue {
			return Err(context.error(ErrorKind::Type, token.line, token.column, format!("left-hand side of `{operator}` is not assignable")).into());
		}
		let right = parse_member_access(stream, context)?;
		if left.type_name != right.type_name {
			return Err(type_mismatch_error(context, token.line, token.column, &left.type_name, &right.type_name));
		}
		left = Typed::rvalue(left.type_name.clone(), format!("{} {} {}", left.code, operator, right.code));
	}
	Ok(left)
}

fn parse_member_access(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let mut left = parse_new(stream, context)?;
	loop {
		if stream.next_is(TokenKind::Dot) {
			let dot = stream.pop(context)?;
			let attribute_token = stream.expect(TokenKind::Identifier, context)?;
			let descriptor = context
				.udts
				.lookup(&left.type_name)
				.ok_or_else(|| context.error(ErrorKind::Name, dot.line, dot.column, format!("`{}` is not a UDT", left.type_name)))?;
			let encoded = descriptor
				.attributes
				.lookup(&attribute_token.value)
				.ok_or_else(|| context.error(ErrorKind::Name, attribute_token.line, attribute_token.column, format!("`{}` has no attribute `{}`", left.type_name, attribute_token.value)))?
				.to_owned();
			let attribute_type = match signature::decode(&encoded) {
				Some(Signature::Variable(type_name)) => type_name,
				_ => unreachable!("attribute scopes only ever hold Variable signatures"),
			};
			left = Typed::lvalue(attribute_type, format!("{}->{}", left.code, attribute_token.value));
		} else if stream.next_is(TokenKind::Ellipsis) {
			let ellipsis = stream.pop(context)?;
			let method_token = stream.expect(TokenKind::Identifier, context)?;
			let descriptor = context
				.udts
				.lookup(&left.type_name)
				.ok_or_else(|| context.error(ErrorKind::Name, ellipsis.line, ellipsis.column, format!("`{}` is not a UDT", left.type_name)))?;
			let encoded = descriptor
				.methods
				.lookup(&method_token.value)
				.ok_or_else(|| context.error(ErrorKind::Name, method_token.line, method_token.column, format!("`{}` has no method `{}`", left.type_name, method_token.value)))?
				.to_owned();
			let input_types = signature::parse_function_input_types(&encoded).expect("method scopes only ever hold Function signatures");
			let output_type = signature::parse_function_return_type(&encoded).expect("method scopes only ever hold Function signatures");

			stream.expect(TokenKind::LeftParenthesis, context)?;
			let mut arguments = Vec::new();
			while !stream.next_is(TokenKind::RightParenthesis) {
				arguments.push(parse_assignment(stream, context)?);
			}
			let closing = stream.expect(TokenKind::RightParenthesis, context)?;

			if arguments.len() != input_types.len() {
				return Err(context
					.error(
						ErrorKind::Type,
						closing.line,
						closing.column,
						format!("method `{}` expects {} argument(s), found {}", method_token.value, input_types.len(), arguments.len()),
					)
					.into());
			}
			for (argument, expected) in arguments.iter().zip(input_types.iter()) {
				if &argument.type_name != expected {
					return Err(type_mismatch_error(context, method_token.line, method_token.column, expected, &argument.type_name));
				}
			}

			let mut call_arguments = vec![left.code.clone()];
			call_arguments.extend(arguments.into_iter().map(|argument| argument.code));
			left = Typed::rvalue(output_type, format!("{}({})", method_token.value, call_arguments.join(", ")));
		} else {
			break;
		}
	}
	Ok(left)
}

fn parse_new(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	if !stream.next_is(TokenKind::KeywordNew) {
		return parse_primary(stream, context);
	}
	stream.pop(context)?;
	let name_token = stream.expect(TokenKind::Identifier, context)?;
	if !context.udts.has(&name_token.value) {
		return Err(context.error(ErrorKind::Name, name_token.line, name_token.column, format!("undeclared UDT `{}`", name_token.value)).into());
	}

	stream.expect(TokenKind::LeftBrace, context)?;
	let mut provided = Vec::new();
	while !stream.next_is(TokenKind::RightBrace) {
		let field_token = stream.expect(TokenKind::Identifier, context)?;
		stream.expect(TokenKind::Colon, context)?;
		let value = parse_primary(stream, context)?;
		provided.push((field_token, value));
	}
	stream.expect(TokenKind::RightBrace, context)?;

	let descriptor = context.udts.lookup(&name_token.value).expect("just checked has()");
	let attribute_names = descriptor.attributes.names_in_order();

	for (field_token, _) in &provided {
		if !descriptor.attributes.contains(&field_token.value) {
			return Err(context
				.error(ErrorKind::Name, field_token.line, field_token.column, format!("`{}` has no attribute `{}`", name_token.value, field_token.value))
				.into());
		}
	}
	if provided.len() != attribute_names.len() {
		return Err(context
			.error(
				ErrorKind::Type,
				name_token.line,
				name_token.column,
				format!("`new {}` expects {} attribute(s), found {}", name_token.value, attribute_names.len(), provided.len()),
			)
			.into());
	}

	let mut ordered_arguments = Vec::with_capacity(attribute_names.len());
	for attribute_name in attribute_names {
		let (field_token, value) = provided
			.iter()
			.find(|(field_token, _)| &field_token.value == attribute_name)
			.expect("every attribute name was checked present above");
		let encoded = descriptor.attributes.lookup(attribute_name).expect("attribute is known to exist");
		let declared_type = match signature::decode(encoded) {
			Some(Signature::Variable(type_name)) => type_name,
			_ => unreachable!("attribute scopes only ever hold Variable signatures"),
		};
		if value.type_name != declared_type {
			return Err(type_mismatch_error(context, field_token.line, field_token.column, &declared_type, &value.type_name));
		}
		ordered_arguments.push(value.code.clone());
	}

	Ok(Typed::rvalue(name_token.value.clone(), format!("construct_{}({})", name_token.value, ordered_arguments.join(", "))))
}

fn parse_primary(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let current = stream.peek().clone();
	match current.kind {
		TokenKind::KeywordTrue => {
			stream.pop(context)?;
			Ok(Typed::rvalue("bool", "1"))
		}
		TokenKind::KeywordFalse => {
			stream.pop(context)?;
			Ok(Typed::rvalue("bool", "0"))
		}
		TokenKind::IntegerLiteral => {
			stream.pop(context)?;
			Ok(Typed::rvalue("int", current.value))
		}
		TokenKind::FloatLiteral => {
			stream.pop(context)?;
			Ok(Typed::rvalue("flt", format!("{}f", current.value)))
		}
		TokenKind::StringLiteral => {
			stream.pop(context)?;
			Ok(Typed::rvalue("str", current.value))
		}
		TokenKind::KeywordOwn => {
			stream.pop(context)?;
			let udt_name = context
				.current_udt
				.clone()
				.ok_or_else(|| context.error(ErrorKind::Scope, current.line, current.column, "`own` used outside a method body"))?;
			Ok(Typed::lvalue(udt_name, "_own_"))
		}
		TokenKind::LeftBracket => {
			stream.pop(context)?;
			parse_list_literal(stream, context)
		}
		TokenKind::Identifier => {
			let token = stream.pop(context)?;
			if stream.next_is(TokenKind::LeftParenthesis) {
				parse_function_call(token.value, token.line, token.column, stream, context)
			} else {
				let encoded = context
					.scopes
					.lookup(&token.value)
					.ok_or_else(|| context.error(ErrorKind::Name, token.line, token.column, format!("undeclared identifier `{}`", token.value)))?
					.to_owned();
				match signature::decode(&encoded) {
					Some(Signature::Variable(type_name)) => Ok(Typed::lvalue(type_name, token.value)),
					_ => Err(context.error(ErrorKind::Type, token.line, token.column, format!("`{}` is not a variable", token.value)).into()),
				}
			}
		}
		_ => Err(context.error(ErrorKind::Parse, current.line, current.column, format!("unexpected token `{}`", current.value)).into()),
	}
}

fn parse_list_literal(stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	let opening = stream.peek().clone();
	if stream.next_is(TokenKind::RightBracket) {
		return Err(context
			.error(ErrorKind::Type, opening.line, opening.column, "cannot infer the element type of an empty list literal")
			.into());
	}

	let mut elements = Vec::new();
	while !stream.next_is(TokenKind::RightBracket) {
		elements.push(parse_assignment(stream, context)?);
	}
	stream.expect(TokenKind::RightBracket, context)?;

	let element_type = elements[0].type_name.clone();
	for element in &elements[1..] {
		if element.type_name != element_type {
			return Err(type_mismatch_error(context, opening.line, opening.column, &element_type, &element.type_name));
		}
	}

	let constructor = match element_type.as_str() {
		"int" => "list_new_int",
		"flt" => "list_new_flt",
		"str" => "list_new_str",
		_ => {
			return Err(context
				.error(ErrorKind::Type, opening.line, opening.column, format!("list literals only support `int`, `flt`, or `str` elements, found `{element_type}`"))
				.into())
		}
	};

	let arguments: Vec<String> = elements.into_iter().map(|element| element.code).collect();
	Ok(Typed::rvalue(format!("[{element_type}]"), format!("{constructor}({}, {})", arguments.len(), arguments.join(", "))))
}

fn parse_function_call(name: String, line: usize, column: usize, stream: &mut TokenStream, context: &mut Context) -> anyhow::Result<Typed> {
	stream.expect(TokenKind::LeftParenthesis, context)?;
	let mut arguments = Vec::new();
	while !stream.next_is(TokenKind::RightParenthesis) {
		arguments.push(parse_assignment(stream, context)?);
	}
	let closing = stream.expect(TokenKind::RightParenthesis, context)?;

	if let Some(builtin) = BUILTIN_FUNCTIONS.get(name.as_str()) {
		if arguments.len() != 1 {
			return Err(context
				.error(ErrorKind::Type, closing.line, closing.column, format!("`{name}` expects 1 argument, found {}", arguments.len()))
				.into());
		}
		let argument = &arguments[0];
		if argument.type_name != builtin.argument_type {
			return Err(type_mismatch_error(context, line, column, builtin.argument_type, &argument.type_name));
		}
		return Ok(Typed::rvalue("void", format!("{}({})", builtin.c_name, argument.code)));
	}

	let encoded = context
		.scopes
		.lookup(&name)
		.ok_or_else(|| context.error(ErrorKind::Name, line, column, format!("undeclared function `{name}`")))?
		.to_owned();
	let (input_types, output_type) = match signature::decode(&encoded) {
		Some(Signature::Function { inputs, output, .. }) => (inputs, output),
		_ => return Err(context.error(ErrorKind::Type, line, column, format!("`{name}` is not a function")).into()),
	};

	if arguments.len() != input_types.len() {
		return Err(context
			.error(ErrorKind::Type, closing.line, closing.column, format!("`{name}` expects {} argument(s), found {}", input_types.len(), arguments.len()))
			.into());
	}
	for (argument, expected) in arguments.iter().zip(input_types.iter()) {
		if &argument.type_name != expected {
			return Err(type_mismatch_error(context, line, column, expected, &argument.type_name));
		}
	}

	let call_arguments: Vec<String> = arguments.into_iter().map(|argument| argument.code).collect();
	Ok(Typed::rvalue(output_type, format!("{name}({})", call_arguments.join(", "))))
}

/// Requires both operands to have the given numeric-or-not `expected` type, raising a *Type* error
/// naming the first operand that doesn't.
fn require_both(context: &Context, token: &crate::lexer::Token, left: &str, right: &str, expected: &str) -> anyhow::Result<()> {
	if left != expected {
		return Err(type_mismatch_error(context, token.line, token.column, expected, left));
	}
	if right != expected {
		return Err(type_mismatch_error(context, token.line, token.column, expected, right));
	}
	Ok(())
}

/// Requires both operands to be the same numeric type (`int` or `flt`), returning that type.
fn require_same_numeric(context: &Context, token: &crate::lexer::Token, left: &str, right: &str) -> anyhow::Result<String> {
	if !is_numeric(left) {
		return Err(type_mismatch_error(context, token.line, token.column, "int or flt", left));
	}
	if left != right {
		return Err(type_mismatch_error(context, token.line, token.column, left, right));
	}
	Ok(left.to_owned())
}

/// Returns the C type string for a language type name: the bundled runtime's `List_<elem>*` for a
/// list type, a primitive's fixed C spelling, or the UDT pointer spelling used for struct types
/// (§4.5).
#[must_use]
pub fn type_name_to_c(type_name: &str) -> String {
	if let Some(element) = type_name.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
		return format!("List_{element}*");
	}
	if let Some(primitive) = to_c_primitive(type_name) {
		return primitive.to_owned();
	}
	format!("{type_name}*")
}

#[cfg(test)]
mod tests {
	fn compile(source: &str) -> anyhow::Result<String> {
		crate::compile(source, "test.tl")
	}

	#[test]
	fn arithmetic_emits_left_to_right_with_grouping() {
		let emitted = compile("start { dec int x = 1 + 2 * 3 }").unwrap();
		assert!(emitted.contains("(1 + (2 * 3))"));
	}

	#[test]
	fn modulo_and_exponent_require_both_operands_int() {
		assert!(compile("start { dec flt x = 1.0 % 2.0 }").is_err());
		assert!(compile("start { dec flt x = 1.0 ** 2.0 }").is_err());
	}

	#[test]
	fn assigning_to_a_non_lvalue_is_a_type_error() {
		assert!(compile("start { dec int x = 1 + 1 = 2 }").is_err());
	}

	#[test]
	fn call_arity_mismatch_is_a_type_error() {
		let source = "(fun add (int a, int b) (int) { return a + b }) start { dec int x = add(1) }";
		assert!(compile(source).is_err());
	}

	#[test]
	fn heterogeneous_list_literal_is_a_type_error() {
		assert!(compile("start { dec [int] xs = [1, 2.0] }").is_err());
	}

	#[test]
	fn dot_access_requires_a_udt_receiver() {
		assert!(compile("start { dec int x = 1 dec int y = x.field }").is_err());
	}

	#[test]
	fn own_outside_a_method_body_is_a_scope_error() {
		assert!(compile("start { dec int x = own }").is_err());
	}

	#[test]
	fn new_requires_every_attribute_and_accepts_them_out_of_declared_order() {
		let source = "Point uat { int x int y } ufn {} start { dec Point p = new Point { y: 2, x: 1 } }";
		let emitted = compile(source).unwrap();
		assert!(emitted.contains("construct_Point(1, 2)"));
	}

	#[test]
	fn new_missing_an_attribute_is_a_type_error() {
		let source = "Point uat { int x int y } ufn {} start { dec Point p = new Point { x: 1 } }";
		assert!(compile(source).is_err());
	}

	#[test]
	fn list_type_maps_to_the_runtime_list_struct_pointer() {
		assert_eq!(super::type_name_to_c("[int]"), "List_int*");
		assert_eq!(super::type_name_to_c("[flt]"), "List_flt*");
		assert_eq!(super::type_name_to_c("[str]"), "List_str*");
		assert_eq!(super::type_name_to_c("Point"), "Point*");
	}
}
