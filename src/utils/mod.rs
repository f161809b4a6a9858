//! Utility modules for common functionality.
//!
//! - constants: Defaults shared by the CLI and the monitors
//! - logging: Logging utilities
//! - metrics: Metric families and the metrics server
//! - parsing: JSON-RPC quantity and address parsing

pub mod constants;
pub mod logging;
pub mod metrics;
pub mod parsing;

pub use constants::*;
