//! Log classification against the rule index.

use tracing::debug;

use crate::{
	models::{EVMLog, RuleSet},
	services::filter::{FilterError, MatchResult, RuleIndex},
};

/// Decides which rules an observed log fires.
#[derive(Debug, Clone, Default)]
pub struct EventMatcher {
	index: RuleIndex,
}

impl EventMatcher {
	pub fn new(index: RuleIndex) -> Self {
		Self { index }
	}

	/// Builds the index for `rule_set` and wraps it.
	pub fn from_rules(rule_set: &RuleSet) -> Result<Self, FilterError> {
		RuleIndex::build(rule_set).map(Self::new)
	}

	pub fn index(&self) -> &RuleIndex {
		&self.index
	}

	/// Rules fired by a single log.
	///
	/// Anonymous logs (no topics) never match. A candidate rule only fires
	/// when its address list is empty or contains the log's address.
	pub fn match_log<'a>(&'a self, log: &'a EVMLog) -> Vec<MatchResult<'a>> {
		let Some(topic) = log.signature_topic() else {
			return Vec::new();
		};

		self.index
			.candidates(topic)
			.filter(|candidate| {
				let in_scope = candidate.rule.is_address_in_scope(&log.address);
				if !in_scope {
					debug!(
						rule = %candidate.rule.name,
						address = %log.address,
						"log address outside rule scope"
					);
				}
				in_scope
			})
			.map(|candidate| MatchResult {
				rule: candidate.rule,
				event: candidate.event,
				canonical: candidate.canonical,
				log,
			})
			.collect()
	}

	/// Rules fired by a batch of logs, in log order then rule order.
	pub fn match_logs<'a>(&'a self, logs: &'a [EVMLog]) -> Vec<MatchResult<'a>> {
		logs.iter().flat_map(|log| self.match_log(log)).collect()
	}
}
