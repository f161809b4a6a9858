//! Tokenizer and grammar for human-written event and function signatures.
//!
//! Accepted shape:
//!
//! ```text
//! signature := [keyword] ident "(" [param ("," param)*] ")"
//! keyword   := "event" | "function"
//! param     := type ident*
//! type      := (ident | ["tuple"] "(" param ("," param)* ")") ("[" [digits] "]")*
//! ```
//!
//! Words following a parameter type (its name, `indexed`, a data location) are
//! dropped from the canonical form.

use super::error::{SignatureError, SignatureErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
	Word,
	LParen,
	RParen,
	LBracket,
	RBracket,
	Comma,
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
	kind: TokenKind,
	text: &'a str,
	offset: usize,
}

fn is_word_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn tokenize(input: &str) -> Result<Vec<Token<'_>>, SignatureError> {
	let mut tokens = Vec::new();
	let mut chars = input.char_indices().peekable();

	while let Some((offset, c)) = chars.next() {
		let kind = match c {
			c if c.is_whitespace() => continue,
			'(' => TokenKind::LParen,
			')' => TokenKind::RParen,
			'[' => TokenKind::LBracket,
			']' => TokenKind::RBracket,
			',' => TokenKind::Comma,
			c if is_word_char(c) => {
				let mut end = offset + c.len_utf8();
				while let Some(&(next_offset, next)) = chars.peek() {
					if !is_word_char(next) {
						break;
					}
					end = next_offset + next.len_utf8();
					chars.next();
				}
				tokens.push(Token {
					kind: TokenKind::Word,
					text: &input[offset..end],
					offset,
				});
				continue;
			}
			_ => {
				return Err(SignatureError::new(
					input,
					offset,
					SignatureErrorKind::UnexpectedCharacter,
				))
			}
		};
		tokens.push(Token {
			kind,
			text: &input[offset..offset + c.len_utf8()],
			offset,
		});
	}

	Ok(tokens)
}

struct Parser<'a> {
	input: &'a str,
	tokens: Vec<Token<'a>>,
	pos: usize,
}

impl<'a> Parser<'a> {
	fn peek(&self) -> Option<Token<'a>> {
		self.tokens.get(self.pos).copied()
	}

	fn peek_kind_at(&self, lookahead: usize) -> Option<TokenKind> {
		self.tokens.get(self.pos + lookahead).map(|t| t.kind)
	}

	fn offset(&self) -> usize {
		self.peek().map(|t| t.offset).unwrap_or(self.input.len())
	}

	fn error(&self, kind: SignatureErrorKind) -> SignatureError {
		SignatureError::new(self.input, self.offset(), kind)
	}

	fn eat(&mut self, kind: TokenKind) -> bool {
		if self.peek_kind_at(0) == Some(kind) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Result<(), SignatureError> {
		if self.eat(kind) {
			Ok(())
		} else {
			Err(self.error(SignatureErrorKind::Expected(expected)))
		}
	}

	fn identifier(&mut self, expected: &'static str) -> Result<&'a str, SignatureError> {
		match self.peek() {
			Some(token)
				if token.kind == TokenKind::Word
					&& !token.text.starts_with(|c: char| c.is_ascii_digit()) =>
			{
				self.pos += 1;
				Ok(token.text)
			}
			_ => Err(self.error(SignatureErrorKind::Expected(expected))),
		}
	}

	fn signature(&mut self) -> Result<String, SignatureError> {
		let mut name = self.identifier("a name")?;
		if matches!(name, "event" | "function") && self.peek_kind_at(0) == Some(TokenKind::Word) {
			name = self.identifier("a name")?;
		}
		self.expect(TokenKind::LParen, "'('")?;
		let params = self.parameter_list()?;
		if self.peek().is_some() {
			return Err(self.error(SignatureErrorKind::TrailingInput));
		}
		Ok(format!("{}({})", name, params.join(",")))
	}

	/// Parses parameters up to and including the closing parenthesis.
	fn parameter_list(&mut self) -> Result<Vec<String>, SignatureError> {
		if self.eat(TokenKind::RParen) {
			return Ok(Vec::new());
		}

		let mut params = Vec::new();
		loop {
			params.push(self.parameter()?);
			if self.eat(TokenKind::Comma) {
				continue;
			}
			self.expect(TokenKind::RParen, "',' or ')'")?;
			return Ok(params);
		}
	}

	fn parameter(&mut self) -> Result<String, SignatureError> {
		let ty = self.type_name()?;
		while self.peek_kind_at(0) == Some(TokenKind::Word) {
			self.identifier("a parameter name")?;
		}
		Ok(ty)
	}

	fn type_name(&mut self) -> Result<String, SignatureError> {
		let token = self
			.peek()
			.ok_or_else(|| self.error(SignatureErrorKind::Expected("a parameter type")))?;

		let mut ty = match token.kind {
			TokenKind::Comma | TokenKind::RParen => {
				return Err(self.error(SignatureErrorKind::EmptyParameter));
			}
			TokenKind::LParen => {
				self.pos += 1;
				self.tuple(token.offset)?
			}
			TokenKind::Word
				if token.text == "tuple" && self.peek_kind_at(1) == Some(TokenKind::LParen) =>
			{
				self.pos += 2;
				self.tuple(token.offset)?
			}
			TokenKind::Word => self.identifier("a parameter type")?.to_string(),
			TokenKind::LBracket | TokenKind::RBracket => {
				return Err(self.error(SignatureErrorKind::Expected("a parameter type")));
			}
		};

		while self.eat(TokenKind::LBracket) {
			ty.push('[');
			if let Some(token) = self.peek().filter(|t| t.kind == TokenKind::Word) {
				if !token.text.chars().all(|c| c.is_ascii_digit()) {
					return Err(self.error(SignatureErrorKind::Expected("an array length")));
				}
				ty.push_str(token.text);
				self.pos += 1;
			}
			self.expect(TokenKind::RBracket, "']'")?;
			ty.push(']');
		}

		Ok(ty)
	}

	fn tuple(&mut self, offset: usize) -> Result<String, SignatureError> {
		let components = self.parameter_list()?;
		if components.is_empty() {
			return Err(SignatureError::new(
				self.input,
				offset,
				SignatureErrorKind::EmptyParameter,
			));
		}
		Ok(format!("({})", components.join(",")))
	}
}

/// Parses `signature` and renders its type-only form.
pub(super) fn parse(signature: &str) -> Result<String, SignatureError> {
	if signature.trim().is_empty() {
		return Err(SignatureError::new(signature, 0, SignatureErrorKind::Empty));
	}

	let mut parser = Parser {
		input: signature,
		tokens: tokenize(signature)?,
		pos: 0,
	};
	parser.signature()
}
