//! Property-based tests for signature canonicalization and hashing.

use alloy::primitives::keccak256;
use chain_liveness_monitor::services::signature::{canonicalize, hash_signature};
use proptest::{prelude::*, test_runner::Config};

use crate::properties::strategies::signature_pair;

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	#[test]
	fn prop_decorations_are_stripped((decorated, bare) in signature_pair()) {
		let canonical = canonicalize(&decorated).unwrap();
		prop_assert_eq!(canonical.as_str(), bare.as_str());
	}

	#[test]
	fn prop_canonicalize_is_idempotent((decorated, _bare) in signature_pair()) {
		let once = canonicalize(&decorated).unwrap();
		let twice = canonicalize(once.as_str()).unwrap();
		prop_assert_eq!(once, twice);
	}

	#[test]
	fn prop_hash_matches_keccak_of_bare_form((decorated, bare) in signature_pair()) {
		let topic = hash_signature(&decorated).unwrap();
		prop_assert_eq!(topic, keccak256(bare.as_bytes()));
		prop_assert_eq!(topic, hash_signature(&bare).unwrap());
	}

	#[test]
	fn prop_arbitrary_input_never_panics(input in "\\PC{0,64}") {
		let _ = canonicalize(&input);
	}

	#[test]
	fn prop_missing_parenthesis_is_rejected(name in "[A-Za-z][a-zA-Z0-9_]{0,15}") {
		prop_assert!(canonicalize(&name).is_err());
		let unclosed = format!("{}(address", name);
		prop_assert!(canonicalize(&unclosed).is_err());
	}
}
