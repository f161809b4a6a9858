//! Typed monitor settings.
//!
//! Every monitor is configured from command line flags (with environment
//! fallbacks). The values are gathered into the structs below and validated
//! before the monitor is built, so a bad flag fails fast with a
//! [`ConfigError::ValidationError`].

use std::{path::PathBuf, time::Duration};

use alloy::primitives::Address;
use url::Url;

use crate::models::config::error::ConfigError;

/// Settings shared by every monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
	/// Delay between two ticks
	pub loop_interval: Duration,
	/// Upper bound of a single RPC request
	pub rpc_timeout: Duration,
}

impl Default for MonitorSettings {
	fn default() -> Self {
		Self {
			loop_interval: Duration::from_millis(60_000),
			rpc_timeout: Duration::from_millis(10_000),
		}
	}
}

impl MonitorSettings {
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.loop_interval.is_zero() {
			return Err(ConfigError::validation_error(
				"Loop interval must be greater than zero",
			));
		}
		if self.rpc_timeout.is_zero() {
			return Err(ConfigError::validation_error(
				"RPC timeout must be greater than zero",
			));
		}
		Ok(())
	}
}

/// Configuration of the global events monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalEventsConfig {
	pub l1_node_url: String,
	/// Label attached to every emitted event sample
	pub nickname: String,
	/// Rule file, or directory of rule files
	pub rules_path: PathBuf,
	pub settings: MonitorSettings,
}

impl GlobalEventsConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_node_url("l1.node.url", &self.l1_node_url)?;
		if self.nickname.trim().is_empty() {
			return Err(ConfigError::validation_error("Nickname is required"));
		}
		if self.rules_path.as_os_str().is_empty() {
			return Err(ConfigError::validation_error("Rules path is required"));
		}
		self.settings.validate()
	}
}

/// Configuration of the tip lag monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipConfig {
	pub node_url: String,
	pub settings: MonitorSettings,
}

impl TipConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_node_url("node.url", &self.node_url)?;
		self.settings.validate()
	}
}

/// Configuration of the liveness expiration monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessExpirationConfig {
	pub l1_node_url: String,
	pub safe_address: Address,
	pub liveness_guard_address: Address,
	pub liveness_module_address: Address,
	pub settings: MonitorSettings,
}

impl LivenessExpirationConfig {
	pub fn validate(&self) -> Result<(), ConfigError> {
		validate_node_url("l1.node.url", &self.l1_node_url)?;
		for (flag, address) in [
			("safe.address", &self.safe_address),
			("liveness.guard.address", &self.liveness_guard_address),
			("liveness.module.address", &self.liveness_module_address),
		] {
			if address.is_zero() {
				return Err(ConfigError::validation_error(format!(
					"{} must not be the zero address",
					flag
				)));
			}
		}
		self.settings.validate()
	}
}

fn validate_node_url(flag: &str, url: &str) -> Result<(), ConfigError> {
	let parsed = Url::parse(url).map_err(|e| {
		ConfigError::validation_error(format!("Invalid {} '{}': {}", flag, url, e))
	})?;
	match parsed.scheme() {
		"http" | "https" => Ok(()),
		scheme => Err(ConfigError::validation_error(format!(
			"Unsupported {} scheme '{}', expected http or https",
			flag, scheme
		))),
	}
}
