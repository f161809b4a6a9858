use thiserror::Error;

use crate::{
	models::ConfigError,
	services::{blockchain::BlockChainError, filter::FilterError},
};

/// Failures while building a monitor.
///
/// Tick failures never surface as this type; they are counted and logged by the
/// monitor itself.
#[derive(Debug, Error)]
pub enum MonitorError {
	#[error("Invalid configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("Invalid rule set: {0}")]
	Filter(#[from] FilterError),

	#[error("Node unavailable: {0}")]
	BlockChain(#[from] BlockChainError),

	#[error("Failed to register metrics: {0}")]
	Metrics(#[from] prometheus::Error),
}
