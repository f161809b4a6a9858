//! Domain models and data structures for the monitors.
//!
//! This module contains the core data structures used throughout the application:
//!
//! - `blockchain`: Chain data decoded from RPC responses (headers, logs)
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (rules and rule sets)

mod blockchain;
mod config;
mod core;

// Re-export blockchain types
pub use blockchain::evm::{EVMBlockHeader, EVMLog};

// Re-export core types
pub use core::{EventEntry, Rule, RuleSet};

// Re-export config types
pub use config::{
	ConfigError, ConfigLoader, GlobalEventsConfig, LivenessExpirationConfig, MonitorSettings,
	TipConfig,
};
