use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// An event signature a rule listens for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventEntry {
	/// Signature as written by the operator, e.g.
	/// `"Transfer(address indexed from, address indexed to, uint256 value)"`
	pub signature: String,
}

/// A named pairing of event signatures with an optional address scope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rule {
	pub name: String,
	pub priority: String,
	/// Contracts the rule is restricted to. Empty means every address.
	#[serde(default)]
	pub addresses: Vec<Address>,
	pub events: Vec<EventEntry>,
}

impl Rule {
	/// Whether a log emitted by `address` is in scope for this rule.
	pub fn is_address_in_scope(&self, address: &Address) -> bool {
		self.addresses.is_empty() || self.addresses.contains(address)
	}
}

/// Ordered collection of rules loaded from the rule configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleSet {
	pub configuration: Vec<Rule>,
}

impl RuleSet {
	pub fn new(configuration: Vec<Rule>) -> Self {
		Self { configuration }
	}

	pub fn rules(&self) -> &[Rule] {
		&self.configuration
	}

	pub fn len(&self) -> usize {
		self.configuration.len()
	}

	pub fn is_empty(&self) -> bool {
		self.configuration.is_empty()
	}

	/// Appends the rules of `other`, keeping their order.
	pub fn extend(&mut self, other: RuleSet) {
		self.configuration.extend(other.configuration);
	}

	/// Every address referenced by at least one rule, in first-seen order.
	pub fn monitored_addresses(&self) -> Vec<Address> {
		let mut addresses: Vec<Address> = Vec::new();
		for address in self.configuration.iter().flat_map(|rule| &rule.addresses) {
			if !addresses.contains(address) {
				addresses.push(*address);
			}
		}
		addresses
	}

	/// Address filter usable for the log query.
	///
	/// `None` when at least one rule listens to every address, since the
	/// query then has to return all logs of the block.
	pub fn address_filter(&self) -> Option<Vec<Address>> {
		if self.configuration.is_empty()
			|| self.configuration.iter().any(|rule| rule.addresses.is_empty())
		{
			return None;
		}
		Some(self.monitored_addresses())
	}
}
