//! Parsing utilities
//!
//! Helpers for the hex quantities used throughout the JSON-RPC API and for
//! address arguments supplied on the command line.

use alloy::primitives::Address;
use serde::{Deserialize, Deserializer, Serializer};
use std::str::FromStr;

/// Parses a JSON-RPC quantity such as `"0x1b4"` into a `u64`.
///
/// Decimal strings are accepted as well since some nodes return them for
/// fields like timestamps.
pub fn parse_quantity(s: &str) -> Result<u64, String> {
	let trimmed = s.trim();
	if let Some(hex) = trimmed
		.strip_prefix("0x")
		.or_else(|| trimmed.strip_prefix("0X"))
	{
		if hex.is_empty() {
			return Err("Hex string '0x' is missing value digits".to_string());
		}
		u64::from_str_radix(hex, 16).map_err(|e| format!("Failed to parse hex '{}': {}", s, e))
	} else {
		trimmed
			.parse::<u64>()
			.map_err(|e| format!("Failed to parse quantity '{}': {}", s, e))
	}
}

/// Parses a hex address, rejecting the zero address.
pub fn parse_non_zero_address(s: &str) -> Result<Address, String> {
	let address =
		Address::from_str(s.trim()).map_err(|e| format!("Invalid address '{}': {}", s, e))?;
	if address.is_zero() {
		return Err(format!("Address '{}' is the zero address", s));
	}
	Ok(address)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuantity {
	Str(String),
	Num(u64),
}

impl RawQuantity {
	fn into_u64<E: serde::de::Error>(self) -> Result<u64, E> {
		match self {
			Self::Str(s) => parse_quantity(&s).map_err(E::custom),
			Self::Num(n) => Ok(n),
		}
	}
}

/// Serde adapter for `u64` fields encoded as JSON-RPC quantities.
pub mod quantity {
	use super::*;

	pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&format!("0x{:x}", value))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
		RawQuantity::deserialize(deserializer)?.into_u64()
	}
}

/// Serde adapter for `Option<u64>` fields encoded as JSON-RPC quantities.
pub mod quantity_opt {
	use super::*;

	pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
		match value {
			Some(value) => super::quantity::serialize(value, serializer),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(
		deserializer: D,
	) -> Result<Option<u64>, D::Error> {
		Option::<RawQuantity>::deserialize(deserializer)?
			.map(RawQuantity::into_u64)
			.transpose()
	}
}
