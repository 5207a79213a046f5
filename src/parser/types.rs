//! The `Type` production: a primitive name, a UDT nominal, or a list type `[ElemType]`.
//!
//! The grammar in §4.5 never spells out surface syntax for list or dictionary *types*; this
//! resolves that silence (see DESIGN.md) by reusing the existing bracket tokens for lists -
//! `[int]`, `[Point]` - and declining to give dictionaries a type-annotation surface at all, since
//! no production in §4.5 ever needs to write one down.
//!
//! Type names double as the canonical "type string" the checker compares with plain string
//! equality (§3 "Equality on types reduces to string equality"): a list type's string form is
//! `[<elem>]`, matching the bracket syntax that produced it.

use crate::context::Context;
use crate::diagnostics::ErrorKind;
use crate::lexer::TokenKind;
use crate::parser::stream::TokenStream;

/// Parses a `Type`: either `[ElemType]`, or a bare identifier naming a primitive or a UDT.
///
/// Does not check that a bare identifier actually names something declared (a UDT named in a type
/// position may be a forward reference to itself, per §9 "Cyclic references"); callers that need
/// that check perform it themselves.
///
/// # Errors
/// Returns a *Parse* error if no identifier or `[` follows.
pub fn parse_type(stream: &mut TokenStream, context: &Context) -> anyhow::Result<String> {
	if stream.next_is(TokenKind::LeftBracket) {
		stream.pop(context)?;
		let element = parse_type(stream, context)?;
		stream.expect(TokenKind::RightBracket, context)?;
		return Ok(format!("[{element}]"));
	}

	let token = stream.expect(TokenKind::Identifier, context)?;
	Ok(token.value)
}

/// Returns `true` iff `type_name` names one of the five language primitives.
#[must_use]
pub fn is_primitive(type_name: &str) -> bool {
	matches!(type_name, "int" | "flt" | "bool" | "str" | "void")
}

/// Returns `true` iff `type_name` names a numeric primitive (`int` or `flt`).
#[must_use]
pub fn is_numeric(type_name: &str) -> bool {
	matches!(type_name, "int" | "flt")
}

/// Maps a language type name to the C type it emits as (§4.5). List types and unresolved UDT
/// names are not handled here; see `crate::parser::udt` for UDT struct naming.
#[must_use]
pub fn to_c_primitive(type_name: &str) -> Option<&'static str> {
	Some(match type_name {
		"int" => "int",
		"flt" => "float",
		"str" => "char*",
		"bool" => "int",
		"void" => "void",
		_ => return None,
	})
}

/// Raises a *Type* error reporting that `expected` was required but `found` was given.
pub fn type_mismatch_error(context: &Context, line: usize, column: usize, expected: &str, found: &str) -> anyhow::Error {
	context.error(ErrorKind::Type, line, column, format!("expected type `{expected}`, found `{found}`")).into()
}

/// Parses a `Variable`: a `Type` followed by an `Identifier` naming it. Used for function input
/// parameters and UDT attributes alike (§4.5). Checked against the reserved-name set, but not yet
/// inserted into any scope - callers decide which scope or table the binding belongs in.
///
/// # Errors
/// Returns a *Parse* error for a malformed `Type`/`Identifier`, or a *Reserved-Name* error if the
/// identifier names a primitive, keyword, or existing UDT.
pub fn parse_variable(stream: &mut TokenStream, context: &Context) -> anyhow::Result<(String, crate::lexer::Token)> {
	let type_name = parse_type(stream, context)?;
	let name_token = stream.expect(TokenKind::Identifier, context)?;
	if context.is_reserved_name(&name_token.value) {
		return Err(context
			.error(ErrorKind::ReservedName, name_token.line, name_token.column, format!("`{}` is a reserved name", name_token.value))
			.into());
	}
	Ok((type_name, name_token))
}

#[cfg(test)]
mod tests {
	use super::{is_numeric, is_primitive, to_c_primitive};

	#[test]
	fn primitives_are_recognized_by_name() {
		for primitive in ["int", "flt", "bool", "str", "void"] {
			assert!(is_primitive(primitive));
		}
		assert!(!is_primitive("Point"));
	}

	#[test]
	fn only_int_and_flt_are_numeric() {
		assert!(is_numeric("int"));
		assert!(is_numeric("flt"));
		assert!(!is_numeric("bool"));
		assert!(!is_numeric("str"));
	}

	#[test]
	fn c_primitive_mapping_matches_the_emission_table() {
		assert_eq!(to_c_primitive("int"), Some("int"));
		assert_eq!(to_c_primitive("flt"), Some("float"));
		assert_eq!(to_c_primitive("str"), Some("char*"));
		assert_eq!(to_c_primitive("bool"), Some("int"));
		assert_eq!(to_c_primitive("void"), Some("void"));
		assert_eq!(to_c_primitive("Point"), None);
	}

	#[test]
	fn list_type_parses_to_bracketed_element_type_string() {
		let context = crate::context::Context::new("test.tl".to_owned());
		let tokens = crate::lexer::tokenize("[int]");
		let mut stream = crate::parser::stream::TokenStream::new(tokens, &context).unwrap();
		let parsed = super::parse_type(&mut stream, &context).unwrap();
		assert_eq!(parsed, "[int]");
	}
}
