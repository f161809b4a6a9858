//! Configuration loading and validation.
//!
//! - `rule_config`: YAML rule files for the global events monitor
//! - `monitor_config`: typed settings of each monitor, filled from CLI flags
//!   and environment variables

use std::path::Path;

mod error;
mod monitor_config;
mod rule_config;

pub use error::ConfigError;
pub use monitor_config::{GlobalEventsConfig, LivenessExpirationConfig, MonitorSettings, TipConfig};

/// Common interface for loading configuration files
pub trait ConfigLoader: Sized {
	/// Load every configuration file found under `path`, keyed by file stem.
	///
	/// `path` may point at a single file or at a directory.
	fn load_all<T>(path: Option<&Path>) -> Result<T, ConfigError>
	where
		T: FromIterator<(String, Self)>;

	/// Load a single configuration file.
	fn load_from_path(path: &Path) -> Result<Self, ConfigError>;

	/// Validate the loaded configuration.
	fn validate(&self) -> Result<(), ConfigError>;

	fn is_yaml_file(path: &Path) -> bool {
		path.extension()
			.map(|ext| {
				let ext = ext.to_string_lossy().to_lowercase();
				ext == "yaml" || ext == "yml"
			})
			.unwrap_or(false)
	}
}
