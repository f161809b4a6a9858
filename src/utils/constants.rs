//! Constants used across the application.

/// Default address of the metrics server
pub const DEFAULT_METRICS_ADDRESS: &str = "127.0.0.1:7300";

/// Default delay between two monitor ticks
pub const DEFAULT_LOOP_INTERVAL_MSEC: u64 = 60_000;

/// Default upper bound of a single RPC request
pub const DEFAULT_RPC_TIMEOUT_MSEC: u64 = 10_000;

/// Default node of the tip monitor
pub const DEFAULT_TIP_NODE_URL: &str = "http://127.0.0.1:8545";

/// Default location of the global events rules
pub const DEFAULT_RULES_PATH: &str = "config/rules";
