// Bring the `Casing` trait into scope, which allows us to use `.to_case()` on strings. This is
// used to convert `TokenKind` enum variant names into Title Case for human-readable diagnostics.
// Assigned to `as _` to indicate the trait itself is never referenced, only its methods.
use convert_case::Casing as _;
// Bring the `IntoEnumIterator` trait into scope, which lets us `::iter()` over `TokenKind` to find
// which variant matches the start of the remaining source text.
use strum::IntoEnumIterator as _;

/// A kind of token in treelang source code. Tokenization is the first step of compilation: it
/// splits the raw source string into a flat sequence of tokens, each tagged with a `TokenKind` and
/// carrying the exact source text ("lexeme") it matched.
///
/// # Conventions
///
/// Token kinds are named after what the token *looks like*, not how it's used in the grammar -
/// `Dot` is `Dot`, not `MemberAccess`. This keeps the lexer parser-agnostic: the same token kind can
/// be reused by different productions without renaming it.
///
/// Variants are matched in declaration order (see `find_match`), so ordering is load-bearing in a
/// few places; those are called out below.
#[derive(strum_macros::EnumIter, PartialEq, Eq, Debug, Clone, Copy)]
pub enum TokenKind {
	/// A line comment, running from `//` to the end of the line. Must be checked before
	/// `ForwardSlash`, or comments would be split into two division tokens.
	Comment,

	// Keywords - these must all be checked before `Identifier`, or they'd be lexed as identifiers.
	/// `import`
	KeywordImport,
	/// `fun`
	KeywordFun,
	/// `start`
	KeywordStart,
	/// `tree`
	KeywordTree,
	/// `return`
	KeywordReturn,
	/// `dec`
	KeywordDec,
	/// `new`
	KeywordNew,
	/// `uat`
	KeywordUat,
	/// `ufn`
	KeywordUfn,
	/// `own`
	KeywordOwn,
	/// `and`
	KeywordAnd,
	/// `or`
	KeywordOr,
	/// `true`
	KeywordTrue,
	/// `false`
	KeywordFalse,

	/// An identifier: a name of a variable, function, type, or UDT. Must be checked after every
	/// keyword, since the identifier pattern does not special-case keyword spellings.
	Identifier,

	/// A floating-point literal, e.g. `3.14`. Must be checked before `IntegerLiteral`, since an
	/// integer pattern would otherwise match just the part before the dot.
	FloatLiteral,
	/// An integer literal, e.g. `42`.
	IntegerLiteral,
	/// A double-quoted string literal, including both quotes.
	StringLiteral,

	// Multi-character operators - each must be checked before the single-character operator it's a
	// prefix of (e.g. `DoubleEquals` before `Equal`), or the shorter token would win.
	/// `...`
	Ellipsis,
	/// `**`
	StarStar,
	/// `++`
	PlusPlus,
	/// `--`
	MinusMinus,
	/// `+=`
	PlusEquals,
	/// `-=`
	MinusEquals,
	/// `*=`
	StarEquals,
	/// `/=`
	SlashEquals,
	/// `==`
	DoubleEquals,
	/// `!=`
	NotEquals,
	/// `<=`
	LessEquals,
	/// `>=`
	GreaterEquals,

	// Single-character operators and delimiters.
	/// `.`
	Dot,
	/// `+`
	Plus,
	/// `-`
	Minus,
	/// `*`
	Asterisk,
	/// `/`
	ForwardSlash,
	/// `%`
	Percent,
	/// `!`
	Bang,
	/// `=`
	Equal,
	/// `<`
	LessThan,
	/// `>`
	GreaterThan,
	/// `:`
	Colon,
	/// `,`
	Comma,
	/// `|`
	Pipe,
	/// `(`
	LeftParenthesis,
	/// `)`
	RightParenthesis,
	/// `{`
	LeftBrace,
	/// `}`
	RightBrace,
	/// `[`
	LeftBracket,
	/// `]`
	RightBracket,

	/// Whitespace: spaces, tabs, and newlines. Never produced as a token; consumed silently while
	/// tokenizing, but still needs a pattern to recognize and skip.
	Whitespace,

	/// The end-of-file sentinel. Exactly one is appended to the end of every token stream.
	Eof,

	/// A span of source text that matched no other token kind. Never produced by `find_match`
	/// directly; only constructed by `tokenize` itself when no pattern matches.
	Error,
}

impl TokenKind {
	/// Returns a regular expression pattern that matches this token kind at the very start of a
	/// string. The returned value is a lazily-evaluated static, so there's no cost to calling this
	/// repeatedly.
	fn pattern(self) -> Option<&'static regex_macro::Regex> {
		Some(match self {
			// Keywords
			Self::KeywordImport => regex_macro::regex!(r"^import\b"),
			Self::KeywordFun => regex_macro::regex!(r"^fun\b"),
			Self::KeywordStart => regex_macro::regex!(r"^start\b"),
			Self::KeywordTree => regex_macro::regex!(r"^tree\b"),
			Self::KeywordReturn => regex_macro::regex!(r"^return\b"),
			Self::KeywordDec => regex_macro::regex!(r"^dec\b"),
			Self::KeywordNew => regex_macro::regex!(r"^new\b"),
			Self::KeywordUat => regex_macro::regex!(r"^uat\b"),
			Self::KeywordUfn => regex_macro::regex!(r"^ufn\b"),
			Self::KeywordOwn => regex_macro::regex!(r"^own\b"),
			Self::KeywordAnd => regex_macro::regex!(r"^and\b"),
			Self::KeywordOr => regex_macro::regex!(r"^or\b"),
			Self::KeywordTrue => regex_macro::regex!(r"^true\b"),
			Self::KeywordFalse => regex_macro::regex!(r"^false\b"),

			Self::Identifier => regex_macro::regex!(r"^[A-Za-z_]\w*"),
			Self::FloatLiteral => regex_macro::regex!(r"^\d+\.\d+"),
			Self::IntegerLiteral => regex_macro::regex!(r"^\d+"),
			Self::StringLiteral => regex_macro::regex!(r#"(?s)^"[^"]*""#),

			Self::Comment => regex_macro::regex!(r"^//[^\n\r]*"),

			Self::Ellipsis => regex_macro::regex!(r"^\.\.\."),
			Self::StarStar => regex_macro::regex!(r"^\*\*"),
			Self::PlusPlus => regex_macro::regex!(r"^\+\+"),
			Self::MinusMinus => regex_macro::regex!("^--"),
			Self::PlusEquals => regex_macro::regex!(r"^\+="),
			Self::MinusEquals => regex_macro::regex!("^-="),
			Self::StarEquals => regex_macro::regex!(r"^\*="),
			Self::SlashEquals => regex_macro::regex!("^/="),
			Self::DoubleEquals => regex_macro::regex!("^=="),
			Self::NotEquals => regex_macro::regex!("^!="),
			Self::LessEquals => regex_macro::regex!(r"^<="),
			Self::GreaterEquals => regex_macro::regex!(r"^>="),

			Self::Dot => regex_macro::regex!(r"^\."),
			Self::Plus => regex_macro::regex!(r"^\+"),
			Self::Minus => regex_macro::regex!("^-"),
			Self::Asterisk => regex_macro::regex!(r"^\*"),
			Self::ForwardSlash => regex_macro::regex!("^/"),
			Self::Percent => regex_macro::regex!("^%"),
			Self::Bang => regex_macro::regex!("^!"),
			Self::Equal => regex_macro::regex!("^="),
			Self::LessThan => regex_macro::regex!("^<"),
			Self::GreaterThan => regex_macro::regex!("^>"),
			Self::Colon => regex_macro::regex!("^:"),
			Self::Comma => regex_macro::regex!("^,"),
			Self::Pipe => regex_macro::regex!(r"^\|"),
			Self::LeftParenthesis => regex_macro::regex!(r"^\("),
			Self::RightParenthesis => regex_macro::regex!(r"^\)"),
			Self::LeftBrace => regex_macro::regex!(r"^\{"),
			Self::RightBrace => regex_macro::regex!(r"^\}"),
			Self::LeftBracket => regex_macro::regex!(r"^\["),
			Self::RightBracket => regex_macro::regex!(r"^\]"),

			Self::Whitespace => regex_macro::regex!(r"^\s+"),

			// `Eof` and `Error` are never matched against source text; `Eof` is appended
			// synthetically, `Error` is produced when no other pattern matches.
			Self::Eof | Self::Error => return None,
		})
	}

	/// Returns the matched text of this token kind at the start of `code`, if any.
	fn get_match(self, code: &str) -> Option<String> {
		self.pattern()?.find(code).map(|found| found.as_str().to_owned())
	}

	/// Finds the first token kind (in declaration order) that matches the start of `code`.
	fn find_match(code: &str) -> Option<(Self, String)> {
		for kind in Self::iter() {
			if let Some(matched) = kind.get_match(code) {
				return Some((kind, matched));
			}
		}
		None
	}
}

impl std::fmt::Display for TokenKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", format!("{self:?}").to_case(convert_case::Case::Title))
	}
}

/// A token in source code: a kind, the exact text it matched, and the line/column it started on.
/// Immutable after production; once consumed by a parser production it is not retained.
#[derive(Debug, Clone)]
pub struct Token {
	/// The kind of token this is.
	pub kind: TokenKind,
	/// The exact source text this token matched.
	pub value: String,
	/// The 1-based line number this token started on.
	pub line: usize,
	/// The 1-based column number this token started on.
	pub column: usize,
}

/// Tokenizes a string of treelang source code into a flat vector of tokens, terminated by exactly
/// one `Eof` token. Whitespace is discarded; comments are kept as `Comment` tokens (it is the token
/// stream adapter's job, not the lexer's, to skip them - see `parser::TokenStream`).
///
/// Unrecognized text never aborts tokenization: a single unrecognized character becomes an `Error`
/// token, and the lexer continues from the next character. This mirrors the data model in §3,
/// where `ERROR` is a token kind surfaced to the consumer rather than a hard failure raised here.
#[must_use]
pub fn tokenize(code: &str) -> std::collections::VecDeque<Token> {
	let mut remaining = code.replace('\t', "    ");
	let mut tokens = std::collections::VecDeque::new();
	let mut line = 1;
	let mut column = 1;

	while !remaining.is_empty() {
		if let Some((kind, value)) = TokenKind::find_match(&remaining) {
			let length = value.len();
			let newline_count = value.chars().filter(|character| *character == '\n').count();

			if kind != TokenKind::Whitespace {
				tokens.push_back(Token { kind, value, line, column });
			}

			column = if newline_count > 0 { 1 } else { column + length };
			line += newline_count;
			remaining = remaining.get(length..).unwrap_or_default().to_owned();
		} else {
			// Nothing matched: consume one character (which may be multiple bytes) as an `Error`
			// token and keep going, so the adapter can report a precise position.
			let character = remaining.chars().next().unwrap();
			let value = character.to_string();
			tokens.push_back(Token {
				kind: TokenKind::Error,
				value,
				line,
				column,
			});
			column += 1;
			remaining = remaining.get(character.len_utf8()..).unwrap_or_default().to_owned();
		}
	}

	tokens.push_back(Token {
		kind: TokenKind::Eof,
		value: String::new(),
		line,
		column,
	});

	tokens
}

#[cfg(test)]
mod tests {
	use super::{tokenize, TokenKind};

	fn kinds(code: &str) -> Vec<TokenKind> {
		tokenize(code).into_iter().map(|token| token.kind).collect()
	}

	#[test]
	fn empty_source_is_just_eof() {
		assert_eq!(kinds(""), vec![TokenKind::Eof]);
	}

	#[test]
	fn keywords_are_not_identifiers() {
		assert_eq!(kinds("dec"), vec![TokenKind::KeywordDec, TokenKind::Eof]);
		assert_eq!(kinds("declaration"), vec![TokenKind::Identifier, TokenKind::Eof]);
	}

	#[test]
	fn float_before_integer() {
		assert_eq!(kinds("3.14"), vec![TokenKind::FloatLiteral, TokenKind::Eof]);
		assert_eq!(kinds("42"), vec![TokenKind::IntegerLiteral, TokenKind::Eof]);
	}

	#[test]
	fn comment_before_forward_slash() {
		assert_eq!(kinds("// hi\n/"), vec![TokenKind::Comment, TokenKind::ForwardSlash, TokenKind::Eof]);
	}

	#[test]
	fn ellipsis_before_dot() {
		assert_eq!(kinds("...a.b"), vec![TokenKind::Ellipsis, TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier, TokenKind::Eof]);
	}

	#[test]
	fn compound_assignment_before_plain_operator() {
		assert_eq!(kinds("+="), vec![TokenKind::PlusEquals, TokenKind::Eof]);
		assert_eq!(kinds("+"), vec![TokenKind::Plus, TokenKind::Eof]);
		assert_eq!(kinds("++"), vec![TokenKind::PlusPlus, TokenKind::Eof]);
	}

	#[test]
	fn unrecognized_character_becomes_error_token_and_lexing_continues() {
		assert_eq!(kinds("a @ b"), vec![TokenKind::Identifier, TokenKind::Error, TokenKind::Identifier, TokenKind::Eof]);
	}

	#[test]
	fn string_literal_keeps_its_quotes() {
		let tokens = tokenize(r#""hello""#);
		assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
		assert_eq!(tokens[0].value, r#""hello""#);
	}

	#[test]
	fn tracks_line_and_column_across_newlines() {
		let tokens = tokenize("a\nb");
		assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
		assert_eq!((tokens[1].line, tokens[1].column), (2, 1));
	}
}
