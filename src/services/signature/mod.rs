//! Event and function signature handling.
//!
//! Turns operator-written signatures such as
//! `"Transfer(address indexed from, address indexed to, uint256 value)"` into
//! their canonical type-only form and hashes that form into the identifier a
//! log carries as its first topic.

mod error;
mod parser;

use std::fmt;

use alloy::primitives::{keccak256, B256};

pub use error::{SignatureError, SignatureErrorKind};

/// Identifier of an event signature, as found in `topics[0]` of a log.
pub type TopicId = B256;

/// Type-only rendering of a signature, e.g. `transfer(address,uint256)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalSignature(String);

impl CanonicalSignature {
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Keccak-256 of the canonical string.
	pub fn topic(&self) -> TopicId {
		keccak256(self.0.as_bytes())
	}
}

impl fmt::Display for CanonicalSignature {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for CanonicalSignature {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Canonicalizes a human-written signature.
///
/// Parameter names, `indexed` markers, data locations and whitespace are
/// dropped while parameter order and nesting are preserved.
///
/// # Errors
/// Returns [`SignatureError`] when the input does not have the
/// `name(type [name], ...)` shape, including empty parameter slots such as
/// `f(uint256,)`.
pub fn canonicalize(signature: &str) -> Result<CanonicalSignature, SignatureError> {
	parser::parse(signature).map(CanonicalSignature)
}

/// Canonicalizes and hashes a signature in one step.
pub fn hash_signature(signature: &str) -> Result<TopicId, SignatureError> {
	canonicalize(signature).map(|canonical| canonical.topic())
}
