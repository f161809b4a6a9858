//! Topic to rule lookup table.

use std::collections::HashMap;

use crate::{
	models::{EventEntry, Rule, RuleSet},
	services::{
		filter::FilterError,
		signature::{canonicalize, CanonicalSignature, TopicId},
	},
};

#[derive(Debug, Clone)]
struct IndexEntry {
	rule: usize,
	event: usize,
	canonical: CanonicalSignature,
}

/// A rule listening for a topic, together with the event entry that produced
/// the topic.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
	pub rule: &'a Rule,
	pub event: &'a EventEntry,
	pub canonical: &'a CanonicalSignature,
}

/// Maps every event topic referenced by a [`RuleSet`] to the rules listening
/// for it.
///
/// Built once at startup and read-only afterwards. Buckets keep the order of
/// the rule set and hold each rule at most once, even when a rule spells the
/// same signature twice.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
	rules: Vec<Rule>,
	buckets: HashMap<TopicId, Vec<IndexEntry>>,
}

impl RuleIndex {
	/// Builds the index, canonicalizing and hashing every event of every rule.
	///
	/// # Errors
	/// Fails on the first signature that cannot be canonicalized.
	pub fn build(rule_set: &RuleSet) -> Result<Self, FilterError> {
		let rules = rule_set.rules().to_vec();
		let mut buckets: HashMap<TopicId, Vec<IndexEntry>> = HashMap::new();

		for (rule_idx, rule) in rules.iter().enumerate() {
			for (event_idx, event) in rule.events.iter().enumerate() {
				let canonical = canonicalize(&event.signature)
					.map_err(|e| FilterError::invalid_signature(&rule.name, e))?;

				let bucket = buckets.entry(canonical.topic()).or_default();
				if bucket.iter().any(|entry| entry.rule == rule_idx) {
					continue;
				}
				bucket.push(IndexEntry {
					rule: rule_idx,
					event: event_idx,
					canonical,
				});
			}
		}

		Ok(Self { rules, buckets })
	}

	/// Rules listening for `topic`, in rule set order. Empty when none.
	pub fn rules_for_topic(&self, topic: &TopicId) -> Vec<&Rule> {
		self.candidates(topic).map(|candidate| candidate.rule).collect()
	}

	/// Same as [`RuleIndex::rules_for_topic`] but also yields the matching event.
	pub fn candidates<'a>(&'a self, topic: &TopicId) -> impl Iterator<Item = Candidate<'a>> + 'a {
		self.buckets
			.get(topic)
			.map(|bucket| bucket.as_slice())
			.unwrap_or_default()
			.iter()
			.map(move |entry| {
				let rule = &self.rules[entry.rule];
				Candidate {
					rule,
					event: &rule.events[entry.event],
					canonical: &entry.canonical,
				}
			})
	}

	/// Indexed rules, in rule set order.
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Number of distinct topics.
	pub fn topic_count(&self) -> usize {
		self.buckets.len()
	}
}
