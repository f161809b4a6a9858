//! Match results produced by the event matcher.

use alloy::primitives::{Address, B256};

use crate::{
	models::{EVMLog, EventEntry, Rule},
	services::signature::CanonicalSignature,
};

/// A log that fired a rule.
///
/// Borrows from the rule index and from the logs of the current tick, so it
/// never outlives a tick.
#[derive(Debug, Clone, Copy)]
pub struct MatchResult<'a> {
	pub rule: &'a Rule,
	/// The rule's event whose topic equals the log's first topic
	pub event: &'a EventEntry,
	pub canonical: &'a CanonicalSignature,
	pub log: &'a EVMLog,
}

impl MatchResult<'_> {
	pub fn rule_name(&self) -> &str {
		&self.rule.name
	}

	pub fn priority(&self) -> &str {
		&self.rule.priority
	}

	/// Signature as written in the rule configuration.
	pub fn signature(&self) -> &str {
		&self.event.signature
	}

	pub fn address(&self) -> Address {
		self.log.address
	}

	pub fn transaction_hash(&self) -> Option<B256> {
		self.log.transaction_hash
	}
}
