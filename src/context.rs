//! The compilation context: the single explicit value threaded through every parser production,
//! replacing the reference implementation's driver-object globals (§9 "Global mutable state").
//! Bundles the scope stack (C2), the UDT table (C3), the emission buffer, and the file name used in
//! diagnostics.

use crate::diagnostics::{CompileError, ErrorKind};
use crate::scopes::ScopeStack;
use crate::udt_table::UdtTable;

/// The primitive type names, reserved wherever an identifier is expected (§3).
const RESERVED_PRIMITIVES: [&str; 5] = ["int", "flt", "bool", "str", "void"];

/// The grammar's keywords, reserved wherever an identifier is expected (§3).
const RESERVED_KEYWORDS: [&str; 14] = ["import", "fun", "start", "tree", "return", "dec", "new", "uat", "ufn", "own", "and", "or", "true", "false"];

/// The fixed program prologue (§4.5, §6): the three standard C headers plus the bundled runtime.
fn header() -> String {
	unindent::unindent(
		r#"
		#include <stdio.h>
		#include <stdlib.h>
		#include <string.h>
		#include "stdlib_c.h"

		"#,
	)
}

/// The single mutable compilation state threaded through every grammar production (C6). Exactly
/// one [`Context`] exists per compilation unit (§5).
pub struct Context {
	/// The display name used in diagnostics, usually the path the source was read from.
	pub file_name: String,
	/// The lexical scope stack (C2).
	pub scopes: ScopeStack,
	/// The UDT table (C3).
	pub udts: UdtTable,
	/// The name of the UDT currently being parsed, if any method body is in progress. Used to
	/// resolve the `own`-accessor and to know which UDT's method scope a `...method()` call dispatches
	/// into when the call is written from inside that UDT's own method bodies.
	pub current_udt: Option<String>,
	/// The declared output type of the function or method body currently being parsed, if any.
	/// `Return` checks its expression's type against this (§4.5).
	pub current_return_type: Option<String>,
	/// The accumulating emission buffer (everything after the fixed header).
	output: String,
	/// The current indentation depth, in multiples of 4 spaces (§4.5).
	indent: usize,
}

impl Context {
	/// Creates a fresh context for compiling a single file.
	#[must_use]
	pub fn new(file_name: String) -> Self {
		Self {
			file_name,
			scopes: ScopeStack::new(),
			udts: UdtTable::new(),
			current_udt: None,
			current_return_type: None,
			output: String::new(),
			indent: 0,
		}
	}

	/// Returns `true` iff `name` may not be used as the name of a variable, function, or UDT member
	/// (§3): a primitive, a keyword, or an already-registered UDT name.
	#[must_use]
	pub fn is_reserved_name(&self, name: &str) -> bool {
		RESERVED_PRIMITIVES.contains(&name) || RESERVED_KEYWORDS.contains(&name) || self.udts.has(name)
	}

	/// Constructs a [`CompileError`] of the given kind at the given position, tagged with this
	/// context's file name. Productions return `Err(context.error(...).into())` to invoke C4 and
	/// stop (§4.5 step 4).
	#[must_use]
	pub fn error(&self, kind: ErrorKind, line: usize, column: usize, message: impl Into<String>) -> CompileError {
		CompileError::new(kind, self.file_name.clone(), line, column, message)
	}

	/// Increases the current indentation depth by one level, entered alongside `scopes.enter_scope()`
	/// whenever a body opens a new C block.
	pub fn enter_indent(&mut self) {
		self.indent += 1;
	}

	/// Decreases the current indentation depth by one level.
	pub fn exit_indent(&mut self) {
		self.indent = self.indent.saturating_sub(1);
	}

	/// Appends `text` to the emission buffer with no indentation or trailing newline, for fragments
	/// that are assembled inline (e.g. building up a single expression's C text before it is emitted
	/// as part of a statement).
	pub fn emit(&mut self, text: &str) {
		self.output.push_str(text);
	}

	/// Appends one line of C text, indented to the current depth and terminated with a newline
	/// (§4.5 "Block statements are emitted with 4-space indentation and a trailing newline").
	pub fn emit_line(&mut self, text: &str) {
		self.output.push_str(&"    ".repeat(self.indent));
		self.output.push_str(text);
		self.output.push('\n');
	}

	/// Consumes the context and returns the complete emitted C translation unit: the fixed header
	/// followed by everything appended to the buffer during parsing.
	#[must_use]
	pub fn finish_output(self) -> String {
		format!("{}{}", header(), self.output)
	}
}

#[cfg(test)]
mod tests {
	use super::Context;
	use crate::diagnostics::ErrorKind;

	#[test]
	fn reserved_names_cover_primitives_keywords_and_udts() {
		let mut context = Context::new("test.tl".to_owned());
		assert!(context.is_reserved_name("int"));
		assert!(context.is_reserved_name("tree"));
		assert!(!context.is_reserved_name("Point"));
		context.udts.insert("Point", crate::scopes::Scope::new(), crate::scopes::Scope::new());
		assert!(context.is_reserved_name("Point"));
	}

	#[test]
	fn empty_source_emits_only_the_header() {
		let context = Context::new("test.tl".to_owned());
		let output = context.finish_output();
		assert!(output.contains("#include <stdio.h>"));
		assert!(output.contains("#include \"stdlib_c.h\""));
	}

	#[test]
	fn emit_line_respects_indentation_depth() {
		let mut context = Context::new("test.tl".to_owned());
		context.enter_indent();
		context.emit_line("int x = 1;");
		let output = context.finish_output();
		assert!(output.contains("    int x = 1;\n"));
	}

	#[test]
	fn error_carries_the_file_name() {
		let context = Context::new("test.tl".to_owned());
		let error = context.error(ErrorKind::Type, 3, 5, "mismatch");
		assert_eq!(error.file, "test.tl");
		assert_eq!(error.line, 3);
	}
}
