//! Signature parsing errors.

use thiserror::Error;

/// What went wrong while parsing a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureErrorKind {
	#[error("signature is empty")]
	Empty,

	#[error("unexpected character")]
	UnexpectedCharacter,

	#[error("expected {0}")]
	Expected(&'static str),

	#[error("empty parameter")]
	EmptyParameter,

	#[error("unexpected input after closing parenthesis")]
	TrailingInput,
}

/// A signature that cannot be turned into its canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid signature '{signature}': {kind} at position {position}")]
pub struct SignatureError {
	/// The signature as written in the configuration
	pub signature: String,
	/// Byte offset of the offending token
	pub position: usize,
	pub kind: SignatureErrorKind,
}

impl SignatureError {
	pub fn new(signature: impl Into<String>, position: usize, kind: SignatureErrorKind) -> Self {
		Self {
			signature: signature.into(),
			position,
			kind,
		}
	}
}
