//! EVM block header data structures.

use alloy::primitives::B256;
use serde::{Deserialize, Serialize};

/// The subset of a block header the monitors read.
///
/// Deserializes from the object returned by
/// `eth_getBlockByNumber(<tag>, false)`; every other header field is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
	#[serde(with = "crate::utils::parsing::quantity")]
	pub number: u64,
	#[serde(with = "crate::utils::parsing::quantity")]
	pub timestamp: u64,
	#[serde(default)]
	pub hash: Option<B256>,
}

impl BlockHeader {
	/// Seconds between the header timestamp and `now` (unix seconds).
	///
	/// Negative when the node reports a block from the future. Saturates at
	/// the `i64` bounds.
	pub fn lag_seconds(&self, now: u64) -> i64 {
		let lag = i128::from(now) - i128::from(self.timestamp);
		lag.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
	}
}
