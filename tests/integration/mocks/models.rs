//! Fixtures for rules, chain data and exported metrics.

use alloy::primitives::{Address, Bytes, B256};
use chain_liveness_monitor::{
	models::{EVMBlockHeader, EVMLog, EventEntry, Rule, RuleSet},
	services::signature::hash_signature,
	utils::metrics::gather_metrics,
};
use prometheus::Registry;

pub fn create_test_header(number: u64, timestamp: u64) -> EVMBlockHeader {
	EVMBlockHeader {
		number,
		timestamp,
		hash: None,
	}
}

pub fn create_test_rule(
	name: &str,
	priority: &str,
	addresses: Vec<Address>,
	signatures: &[&str],
) -> Rule {
	Rule {
		name: name.to_string(),
		priority: priority.to_string(),
		addresses,
		events: signatures
			.iter()
			.map(|signature| EventEntry {
				signature: signature.to_string(),
			})
			.collect(),
	}
}

pub fn create_test_rule_set(rules: Vec<Rule>) -> RuleSet {
	RuleSet::new(rules)
}

/// A log whose first topic is the hash of `signature`.
pub fn create_test_log(address: Address, signature: &str, block_number: u64) -> EVMLog {
	EVMLog {
		address,
		topics: vec![hash_signature(signature).unwrap()],
		data: Bytes::new(),
		transaction_hash: Some(B256::with_last_byte(0x01)),
		block_number: Some(block_number),
		log_index: Some(0),
	}
}

/// Exposition lines of `metric` whose labels include every `labels` pair.
pub fn metric_samples(registry: &Registry, metric: &str, labels: &[(&str, &str)]) -> Vec<String> {
	let text = String::from_utf8(gather_metrics(registry).unwrap()).unwrap();
	let prefix = format!("{}{{", metric);
	text.lines()
		.filter(|line| line.starts_with(&prefix))
		.filter(|line| {
			labels
				.iter()
				.all(|(key, value)| line.contains(&format!("{}=\"{}\"", key, value)))
		})
		.map(str::to_string)
		.collect()
}

/// Value of the single sample of `metric` carrying `labels`.
pub fn metric_value(registry: &Registry, metric: &str, labels: &[(&str, &str)]) -> Option<f64> {
	let samples = metric_samples(registry, metric, labels);
	match samples.as_slice() {
		[line] => line.rsplit(' ').next().and_then(|v| v.parse().ok()),
		_ => None,
	}
}
