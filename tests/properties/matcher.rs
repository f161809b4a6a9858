//! Property-based tests for rule matching.

use alloy::primitives::{Address, Bytes, B256};
use chain_liveness_monitor::{
	models::{EVMLog, EventEntry, Rule, RuleSet},
	services::{filter::EventMatcher, signature::hash_signature},
};
use proptest::{prelude::*, test_runner::Config};

use crate::properties::strategies::signature_pair;

fn address_strategy() -> impl Strategy<Value = Address> {
	any::<[u8; 20]>().prop_map(Address::from)
}

fn log_for(address: Address, signature: &str) -> EVMLog {
	EVMLog {
		address,
		topics: vec![hash_signature(signature).unwrap()],
		data: Bytes::new(),
		transaction_hash: Some(B256::ZERO),
		block_number: Some(1),
		log_index: Some(0),
	}
}

fn rule(name: &str, addresses: Vec<Address>, signatures: Vec<String>) -> Rule {
	Rule {
		name: name.to_string(),
		priority: "P1".to_string(),
		addresses,
		events: signatures
			.into_iter()
			.map(|signature| EventEntry { signature })
			.collect(),
	}
}

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn prop_open_rule_matches_every_emitter(
		(decorated, bare) in signature_pair(),
		emitter in address_strategy(),
	) {
		let rules = RuleSet::new(vec![rule("open", vec![], vec![decorated.clone()])]);
		let matcher = EventMatcher::from_rules(&rules).unwrap();

		let log = log_for(emitter, &bare);
		let matches = matcher.match_log(&log);
		prop_assert_eq!(matches.len(), 1);
		prop_assert_eq!(matches[0].rule_name(), "open");
		prop_assert_eq!(matches[0].signature(), decorated.as_str());
	}

	#[test]
	fn prop_scoped_rule_matches_only_listed_emitters(
		(decorated, bare) in signature_pair(),
		listed in address_strategy(),
		emitter in address_strategy(),
	) {
		let rules = RuleSet::new(vec![rule("scoped", vec![listed], vec![decorated])]);
		let matcher = EventMatcher::from_rules(&rules).unwrap();

		let emitted = log_for(emitter, &bare);
		let matches = matcher.match_log(&emitted);
		prop_assert_eq!(matches.len(), usize::from(emitter == listed));
		let listed_log = log_for(listed, &bare);
		prop_assert_eq!(matcher.match_log(&listed_log).len(), 1);
	}

	#[test]
	fn prop_each_rule_matches_at_most_once(
		(decorated, bare) in signature_pair(),
		emitter in address_strategy(),
		copies in 1usize..4,
	) {
		// The same event listed several times, under several spellings.
		let signatures = vec![decorated.clone(); copies]
			.into_iter()
			.chain(std::iter::once(bare.clone()))
			.collect();
		let rules = RuleSet::new(vec![
			rule("first", vec![], signatures),
			rule("second", vec![emitter], vec![bare.clone()]),
		]);
		let matcher = EventMatcher::from_rules(&rules).unwrap();

		let log = log_for(emitter, &bare);
		let matches = matcher.match_log(&log);
		let names: Vec<&str> = matches.iter().map(|m| m.rule_name()).collect();
		prop_assert_eq!(names, vec!["first", "second"]);
	}
}
