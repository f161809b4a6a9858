//! Bootstrap module for building monitors and driving their ticks.
//!
//! - `initialize_monitor`: turns a validated configuration into a boxed [`Monitor`]
//! - `run_monitor`: ticks a monitor on a fixed interval until shutdown, then closes it

use std::time::Duration;

use prometheus::Registry;
use tokio::{
	sync::watch,
	time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
	models::{
		ConfigError, GlobalEventsConfig, LivenessExpirationConfig, MonitorSettings, TipConfig,
	},
	services::monitors::{
		GlobalEventsMonitor, LivenessExpirationMonitor, Monitor, MonitorError, TickOutcome,
		TipMonitor,
	},
};

/// Configuration of the monitor selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorConfig {
	GlobalEvents(GlobalEventsConfig),
	Tip(TipConfig),
	LivenessExpiration(LivenessExpirationConfig),
}

impl MonitorConfig {
	pub fn settings(&self) -> &MonitorSettings {
		match self {
			Self::GlobalEvents(config) => &config.settings,
			Self::Tip(config) => &config.settings,
			Self::LivenessExpiration(config) => &config.settings,
		}
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		match self {
			Self::GlobalEvents(config) => config.validate(),
			Self::Tip(config) => config.validate(),
			Self::LivenessExpiration(config) => config.validate(),
		}
	}
}

/// Builds the monitor described by `config`, registering its metrics into `registry`.
///
/// # Errors
/// Configuration, rule and connectivity failures; all of them are fatal.
pub async fn initialize_monitor(
	config: &MonitorConfig,
	registry: &Registry,
) -> Result<Box<dyn Monitor>, MonitorError> {
	let monitor: Box<dyn Monitor> = match config {
		MonitorConfig::GlobalEvents(config) => {
			Box::new(GlobalEventsMonitor::new(config, registry).await?)
		}
		MonitorConfig::Tip(config) => Box::new(TipMonitor::new(config, registry).await?),
		MonitorConfig::LivenessExpiration(config) => {
			Box::new(LivenessExpirationMonitor::new(config, registry).await?)
		}
	};
	Ok(monitor)
}

/// Tick counters of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
	pub completed: u64,
	pub failed: u64,
}

/// Drives `monitor` every `period` until `shutdown` flips to `true`.
///
/// The first tick fires immediately. Ticks never overlap; a tick that outlasts
/// the period makes the runner skip the missed ticks instead of bursting. The
/// monitor is closed before returning.
pub async fn run_monitor(
	mut monitor: Box<dyn Monitor>,
	period: Duration,
	mut shutdown: watch::Receiver<bool>,
) -> RunSummary {
	let mut summary = RunSummary::default();
	let mut ticker = interval(period);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

	info!(monitor = monitor.name(), period = ?period, "monitor loop started");

	while !*shutdown.borrow_and_update() {
		tokio::select! {
			biased;
			changed = shutdown.changed() => {
				if changed.is_err() {
					break;
				}
			}
			_ = ticker.tick() => {
				match monitor.run(&shutdown).await {
					TickOutcome::Completed => summary.completed += 1,
					TickOutcome::Failed => summary.failed += 1,
					TickOutcome::Cancelled | TickOutcome::Closed => break,
				}
				debug!(monitor = monitor.name(), ?summary, "tick finished");
			}
		}
	}

	monitor.close().await;

	info!(
		monitor = monitor.name(),
		completed = summary.completed,
		failed = summary.failed,
		"monitor loop stopped"
	);
	summary
}
