//! The Token Stream Adapter (C1): a buffered one-token-lookahead view over the raw lexer output
//! (§4.1). Transparently skips `COMMENT` and `COMMA` tokens on every advance and raises a *Lex*
//! diagnostic the moment a lexer-produced `ERROR` token would become current.

use crate::context::Context;
use crate::diagnostics::ErrorKind;
use crate::lexer::{Token, TokenKind};

/// A buffered view over a token vector, exposing only `peek()` and `expect(kind)` to the grammar
/// productions in [`crate::parser`], plus the handful of lookahead helpers they need to decide which
/// production to recurse into.
pub struct TokenStream {
	tokens: std::collections::VecDeque<Token>,
}

impl TokenStream {
	/// Wraps a raw token vector, skipping any leading noise so that `peek()` is valid immediately.
	///
	/// # Errors
	/// Returns an error if an `ERROR` token would be the very first significant token.
	pub fn new(tokens: std::collections::VecDeque<Token>, context: &Context) -> anyhow::Result<Self> {
		let mut stream = Self { tokens };
		stream.skip_noise(context)?;
		Ok(stream)
	}

	/// Returns the current token without consuming it.
	#[must_use]
	pub fn peek(&self) -> &Token {
		self.tokens.front().expect("a token stream always ends in an Eof token")
	}

	/// Returns `true` iff the current token's kind equals `kind`.
	#[must_use]
	pub fn next_is(&self, kind: TokenKind) -> bool {
		self.peek().kind == kind
	}

	/// Returns `true` iff the current token's kind equals any of `kinds`.
	#[must_use]
	pub fn next_is_one_of(&self, kinds: &[TokenKind]) -> bool {
		kinds.contains(&self.peek().kind)
	}

	/// Requires the current token's kind to equal `kind`; otherwise raises a *Parse* diagnostic.
	/// On success, consumes and returns the token, advancing past any trailing `COMMENT`/`COMMA`
	/// noise.
	///
	/// # Errors
	/// Returns a *Parse* error if the current token's kind does not equal `kind`, or a *Lex* error
	/// if an `ERROR` token is uncovered while advancing.
	pub fn expect(&mut self, kind: TokenKind, context: &Context) -> anyhow::Result<Token> {
		let current = self.peek().clone();
		if current.kind != kind {
			return Err(context
				.error(
					ErrorKind::Parse,
					current.line,
					current.column,
					format!("expected {kind}, found {} `{}`", current.kind, current.value),
				)
				.into());
		}
		self.pop(context)
	}

	/// Unconditionally consumes the current token and returns it, advancing past any trailing
	/// `COMMENT`/`COMMA` noise. Used where the current token's kind has already been checked via
	/// `peek()`/`next_is()`.
	///
	/// # Errors
	/// Returns a *Lex* error if an `ERROR` token is uncovered while advancing.
	pub fn pop(&mut self, context: &Context) -> anyhow::Result<Token> {
		let token = self.tokens.pop_front().expect("a token stream always ends in an Eof token");
		self.skip_noise(context)?;
		Ok(token)
	}

	/// Advances past every leading `COMMENT`/`COMMA` token, raising on an `ERROR` token.
	fn skip_noise(&mut self, context: &Context) -> anyhow::Result<()> {
		loop {
			match self.tokens.front() {
				Some(token) if token.kind == TokenKind::Comment || token.kind == TokenKind::Comma => {
					self.tokens.pop_front();
				}
				Some(token) if token.kind == TokenKind::Error => {
					return Err(context.error(ErrorKind::Lex, token.line, token.column, format!("invalid token `{}`", token.value)).into());
				}
				_ => return Ok(()),
			}
		}
	}
}
