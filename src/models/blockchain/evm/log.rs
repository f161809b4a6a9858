//! EVM log data structures.

use alloy::primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

/// A log entry as returned by `eth_getLogs`.
///
/// Only lives for the duration of a single tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedLog {
	pub address: Address,
	pub topics: Vec<B256>,
	#[serde(default)]
	pub data: Bytes,
	#[serde(default)]
	pub transaction_hash: Option<B256>,
	#[serde(default, with = "crate::utils::parsing::quantity_opt")]
	pub block_number: Option<u64>,
	#[serde(default, with = "crate::utils::parsing::quantity_opt")]
	pub log_index: Option<u64>,
}

impl ObservedLog {
	/// The signature topic, absent for anonymous events.
	pub fn signature_topic(&self) -> Option<&B256> {
		self.topics.first()
	}
}
