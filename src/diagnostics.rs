use colored::Colorize as _;

/// The taxonomy of compile errors (§7). Every diagnostic the core can raise falls into exactly one
/// of these kinds; the formatter renders the kind alongside its payload rather than relying on
/// string-typed categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// An invalid token surfaced while advancing the token stream.
	Lex,
	/// An unexpected token kind at a production boundary.
	Parse,
	/// Use of an undeclared identifier, type, or UDT; or redeclaration in the same scope.
	Name,
	/// An operator/operand mismatch, call arity or argument type mismatch, return-expression vs.
	/// declared output mismatch, or attribute type vs. provided value mismatch.
	Type,
	/// A declaration in a scope where it is forbidden, e.g. a nested function or UDT.
	Scope,
	/// An attempt to use a primitive, keyword, or existing UDT name as an identifier.
	ReservedName,
}

impl std::fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Lex => "Lex",
			Self::Parse => "Parse",
			Self::Name => "Name",
			Self::Type => "Type",
			Self::Scope => "Scope",
			Self::ReservedName => "Reserved-Name",
		};
		write!(f, "{name}")
	}
}

/// A single diagnostic raised by the core. Carries the file, line, and column of the offending
/// token or construct, along with a human-readable message.
///
/// This is the only error type the core's parser productions return; the CLI layer wraps it in
/// `anyhow::Error` (via the blanket `From<E: std::error::Error>` impl) to thread it through `?`
/// alongside I/O and native-compiler errors.
#[derive(Debug, Clone)]
pub struct CompileError {
	/// The kind of diagnostic this is (§7).
	pub kind: ErrorKind,
	/// The name of the file the error occurred in.
	pub file: String,
	/// The line the error occurred on.
	pub line: usize,
	/// The column the error occurred on.
	pub column: usize,
	/// A human-readable description of the error.
	pub message: String,
}

impl CompileError {
	/// Constructs a new diagnostic of the given kind at the given position.
	#[must_use]
	pub fn new(kind: ErrorKind, file: impl Into<String>, line: usize, column: usize, message: impl Into<String>) -> Self {
		Self {
			kind,
			file: file.into(),
			line,
			column,
			message: message.into(),
		}
	}
}

impl std::fmt::Display for CompileError {
	/// Renders the diagnostic in the user-visible `FILE:LINE:COL: KIND message` form required by §7.
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}:{}:{}: {} {}",
			self.file,
			self.line,
			self.column,
			format!("{}", self.kind).bold().red(),
			self.message
		)
	}
}

impl std::error::Error for CompileError {}
