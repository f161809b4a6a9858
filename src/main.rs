//! Blockchain liveness monitoring service entry point.
//!
//! Runs one monitor, selected by subcommand, until interrupted:
//!
//! - `global-events`: matches the logs of every new block against YAML rules
//! - `tip`: reports how far the latest block lags behind wall clock time
//! - `liveness-expiration`: reports Safe owner liveness data
//!
//! # Flow
//! 1. Loads `.env`, parses flags (each flag has an environment fallback)
//! 2. Validates the monitor configuration and builds the monitor
//! 3. Optionally starts the metrics server
//! 4. Ticks the monitor on the loop interval
//! 5. Stops on Ctrl+C (or when the metrics server exits) and closes the monitor

use std::{path::PathBuf, time::Duration};

use alloy::primitives::Address;
use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use dotenvy::dotenv;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::{error, info};

use chain_liveness_monitor::{
	bootstrap::{initialize_monitor, run_monitor, MonitorConfig},
	models::{GlobalEventsConfig, LivenessExpirationConfig, MonitorSettings, TipConfig},
	utils::{
		constants::{
			DEFAULT_LOOP_INTERVAL_MSEC, DEFAULT_METRICS_ADDRESS, DEFAULT_RPC_TIMEOUT_MSEC,
			DEFAULT_RULES_PATH, DEFAULT_TIP_NODE_URL,
		},
		logging::setup_logging,
		metrics::server::create_metrics_server,
		parsing::parse_non_zero_address,
	},
};

fn l1_node_url_arg(env: &'static str) -> Arg {
	Arg::new("l1.node.url")
		.long("l1.node.url")
		.env(env)
		.help("Node URL of L1 peer")
		.value_name("URL")
		.required(true)
}

fn address_arg(name: &'static str, env: &'static str, help: &'static str) -> Arg {
	Arg::new(name)
		.long(name)
		.env(env)
		.help(help)
		.value_name("ADDRESS")
		.value_parser(parse_non_zero_address)
		.required(true)
}

/// Command line definition.
fn build_cli() -> Command {
	Command::new("chain-liveness-monitor")
		.version(env!("CARGO_PKG_VERSION"))
		.about(
			"Blockchain liveness monitors that poll a node on an interval and expose what they \
			 observe as Prometheus metrics.",
		)
		.subcommand_required(true)
		.arg_required_else_help(true)
		.arg(
			Arg::new("log-level")
				.long("log-level")
				.env("LOG_LEVEL")
				.global(true)
				.help("Set log level (trace, debug, info, warn, error)")
				.value_name("LEVEL"),
		)
		.arg(
			Arg::new("metrics")
				.long("metrics")
				.env("METRICS_ENABLED")
				.global(true)
				.help("Enable metrics server")
				.value_parser(clap::builder::BoolishValueParser::new())
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("metrics-address")
				.long("metrics-address")
				.env("METRICS_ADDRESS")
				.global(true)
				.help("Address to start the metrics server on")
				.value_name("HOST:PORT")
				.default_value(DEFAULT_METRICS_ADDRESS),
		)
		.arg(
			Arg::new("loop-interval-msec")
				.long("loop-interval-msec")
				.env("LOOP_INTERVAL_MSEC")
				.global(true)
				.help("Loop interval of the monitor in milliseconds (default: 60000)")
				.value_name("MSEC")
				.value_parser(clap::value_parser!(u64).range(1..)),
		)
		.arg(
			Arg::new("rpc-timeout-msec")
				.long("rpc-timeout-msec")
				.env("RPC_TIMEOUT_MSEC")
				.global(true)
				.help("Timeout of a single RPC request in milliseconds (default: 10000)")
				.value_name("MSEC")
				.value_parser(clap::value_parser!(u64).range(1..)),
		)
		.subcommand(
			Command::new("global-events")
				.about("Monitors events emitted by contracts against a set of YAML rules")
				.arg(l1_node_url_arg("GLOBAL_EVENTS_MON_L1_NODE_URL"))
				.arg(
					Arg::new("nickname")
						.long("nickname")
						.env("GLOBAL_EVENTS_MON_NICKNAME")
						.help("Nickname of the chain being monitored")
						.value_name("NAME")
						.required(true),
				)
				.arg(
					Arg::new("path.yaml")
						.long("path.yaml")
						.env("GLOBAL_EVENTS_MON_PATH_YAML")
						.help("Rule file, or directory of rule files")
						.value_name("PATH")
						.value_parser(clap::value_parser!(PathBuf))
						.default_value(DEFAULT_RULES_PATH),
				),
		)
		.subcommand(
			Command::new("tip")
				.about("Reports the lag between wall clock time and the latest block")
				.arg(
					Arg::new("node.url")
						.long("node.url")
						.env("TIP_MON_NODE_URL")
						.help("Node URL of the peer")
						.value_name("URL")
						.default_value(DEFAULT_TIP_NODE_URL),
				),
		)
		.subcommand(
			Command::new("liveness-expiration")
				.about("Reports Safe owner liveness data")
				.arg(l1_node_url_arg("LIVENESS_EXPIRATION_MON_L1_NODE_URL"))
				.arg(address_arg(
					"safe.address",
					"LIVENESS_EXPIRATION_MON_SAFE_ADDRESS",
					"Address of the Safe contract",
				))
				.arg(address_arg(
					"liveness.guard.address",
					"LIVENESS_EXPIRATION_MON_LIVENESS_GUARD_ADDRESS",
					"Address of the LivenessGuard contract",
				))
				.arg(address_arg(
					"liveness.module.address",
					"LIVENESS_EXPIRATION_MON_LIVENESS_MODULE_ADDRESS",
					"Address of the LivenessModule contract",
				)),
		)
}

fn required<'a, T: Clone + Send + Sync + 'static>(
	matches: &'a ArgMatches,
	name: &str,
) -> anyhow::Result<&'a T> {
	matches
		.get_one::<T>(name)
		.ok_or_else(|| anyhow!("missing required argument --{}", name))
}

fn settings_from_matches(matches: &ArgMatches) -> MonitorSettings {
	let msec = |name: &str, default: u64| {
		Duration::from_millis(matches.get_one::<u64>(name).copied().unwrap_or(default))
	};
	MonitorSettings {
		loop_interval: msec("loop-interval-msec", DEFAULT_LOOP_INTERVAL_MSEC),
		rpc_timeout: msec("rpc-timeout-msec", DEFAULT_RPC_TIMEOUT_MSEC),
	}
}

/// Maps the selected subcommand onto its typed, validated configuration.
fn monitor_config_from_matches(matches: &ArgMatches) -> anyhow::Result<MonitorConfig> {
	let config = match matches.subcommand() {
		Some(("global-events", sub)) => MonitorConfig::GlobalEvents(GlobalEventsConfig {
			l1_node_url: required::<String>(sub, "l1.node.url")?.clone(),
			nickname: required::<String>(sub, "nickname")?.clone(),
			rules_path: required::<PathBuf>(sub, "path.yaml")?.clone(),
			settings: settings_from_matches(sub),
		}),
		Some(("tip", sub)) => MonitorConfig::Tip(TipConfig {
			node_url: required::<String>(sub, "node.url")?.clone(),
			settings: settings_from_matches(sub),
		}),
		Some(("liveness-expiration", sub)) => {
			MonitorConfig::LivenessExpiration(LivenessExpirationConfig {
				l1_node_url: required::<String>(sub, "l1.node.url")?.clone(),
				safe_address: *required::<Address>(sub, "safe.address")?,
				liveness_guard_address: *required::<Address>(sub, "liveness.guard.address")?,
				liveness_module_address: *required::<Address>(sub, "liveness.module.address")?,
				settings: settings_from_matches(sub),
			})
		}
		Some((other, _)) => return Err(anyhow!("unknown monitor '{}'", other)),
		None => return Err(anyhow!("no monitor selected")),
	};

	config
		.validate()
		.context("invalid monitor configuration")?;

	Ok(config)
}

/// Main entry point for the monitoring service.
///
/// # Errors
/// Returns an error if the configuration is invalid or the monitor cannot be built.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Load environment variables from .env file before flags read their fallbacks
	dotenv().ok();

	let matches = build_cli().get_matches();

	setup_logging(matches.get_one::<String>("log-level").map(String::as_str)).unwrap_or_else(|e| {
		error!("Failed to setup logging: {}", e);
	});

	let config = monitor_config_from_matches(&matches)?;
	let registry = Registry::new();
	let monitor = initialize_monitor(&config, &registry)
		.await
		.context("failed to start monitor")?;

	let metrics_server = if matches.get_flag("metrics") {
		let metrics_address = required::<String>(&matches, "metrics-address")?.clone();
		info!("Metrics server enabled, starting on {}", metrics_address);
		match create_metrics_server(metrics_address, registry.clone()) {
			Ok(server) => Some(server),
			Err(e) => {
				error!("Failed to create metrics server: {}", e);
				None
			}
		}
	} else {
		info!("Metrics server disabled. Use --metrics flag or METRICS_ENABLED=true to enable");
		None
	};

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	let runner = tokio::spawn(run_monitor(
		monitor,
		config.settings().loop_interval,
		shutdown_rx,
	));

	info!("Service started. Press Ctrl+C to shutdown");

	let ctrl_c = tokio::signal::ctrl_c();

	if let Some(metrics_future) = metrics_server {
		tokio::select! {
			result = ctrl_c => {
				if let Err(e) = result {
					error!("Error waiting for Ctrl+C: {}", e);
				}
				info!("Shutdown signal received, stopping monitor...");
			}
			result = metrics_future => {
				if let Err(e) = result {
					error!("Metrics server error: {}", e);
				}
				info!("Metrics server stopped, stopping monitor...");
			}
		}
	} else {
		let _ = ctrl_c.await;
		info!("Shutdown signal received, stopping monitor...");
	}

	let _ = shutdown_tx.send(true);
	match runner.await {
		Ok(summary) => info!(
			completed = summary.completed,
			failed = summary.failed,
			"Shutdown complete"
		),
		Err(e) => error!("Monitor task failed: {}", e),
	}

	Ok(())
}
