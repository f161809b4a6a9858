//! Tip lag monitor.
//!
//! Reports `tip_mon_lagging{type="latest"}`, the number of seconds between
//! wall clock time and the timestamp of the latest block.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
	models::TipConfig,
	services::{
		blockchain::{AlloyTransportClient, BlockChainClient, EvmClient},
		monitors::{with_shutdown, Monitor, MonitorError, TickOutcome},
	},
	utils::metrics::TipMetrics,
};

const STAGE: &str = "laggingDistance";
const OPERATION: &str = "eth_getBlockByNumber";

fn unix_now() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|d| d.as_secs())
		.unwrap_or_default()
}

pub struct TipMonitor<C: BlockChainClient> {
	client: Option<C>,
	metrics: TipMetrics,
	clock: fn() -> u64,
}

impl TipMonitor<EvmClient<AlloyTransportClient>> {
	pub async fn new(config: &TipConfig, registry: &Registry) -> Result<Self, MonitorError> {
		config.validate()?;
		let client = EvmClient::new(&config.node_url, config.settings.rpc_timeout).await?;
		info!(node = %config.node_url, "tip monitor started");
		Self::with_client(client, registry)
	}
}

impl<C: BlockChainClient> TipMonitor<C> {
	pub fn with_client(client: C, registry: &Registry) -> Result<Self, MonitorError> {
		Ok(Self {
			client: Some(client),
			metrics: TipMetrics::register(registry)?,
			clock: unix_now,
		})
	}

	/// Replaces the wall clock, in unix seconds.
	pub fn with_clock(mut self, clock: fn() -> u64) -> Self {
		self.clock = clock;
		self
	}

	pub fn metrics(&self) -> &TipMetrics {
		&self.metrics
	}
}

#[async_trait]
impl<C: BlockChainClient + 'static> Monitor for TipMonitor<C> {
	fn name(&self) -> &'static str {
		"tip"
	}

	async fn run(&mut self, shutdown: &watch::Receiver<bool>) -> TickOutcome {
		let Some(client) = self.client.as_ref() else {
			warn!(monitor = self.name(), "tick skipped, monitor is closed");
			return TickOutcome::Closed;
		};

		let header = match with_shutdown(shutdown, OPERATION, client.get_latest_header()).await {
			Ok(header) => header,
			Err(e) => {
				self.metrics
					.unexpected_rpc_errors
					.with_label_values(&[STAGE, OPERATION])
					.inc();
				error!(stage = STAGE, operation = OPERATION, error = %e, "failed to fetch latest block");
				return TickOutcome::from_error(&e);
			}
		};

		let lag = header.lag_seconds((self.clock)());
		self.metrics
			.lagging
			.with_label_values(&["latest"])
			.set(lag as f64);
		info!(block = header.number, lag_seconds = lag, "latest block lag");

		TickOutcome::Completed
	}

	async fn close(&mut self) {
		if self.client.take().is_some() {
			info!(monitor = self.name(), "monitor closed");
		}
	}
}
