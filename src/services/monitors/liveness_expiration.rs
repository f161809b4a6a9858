//! Liveness expiration monitor.
//!
//! Reads the owners of a Safe, the last time each owner proved liveness to the
//! LivenessGuard and the interval enforced by the LivenessModule. Metrics are
//! only written once every read of the tick succeeded.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy::{
	primitives::{Address, Bytes, U256},
	sol,
	sol_types::SolCall,
};
use async_trait::async_trait;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
	models::{EVMBlockHeader, LivenessExpirationConfig},
	services::{
		blockchain::{AlloyTransportClient, BlockChainError, EvmClient, EvmClientTrait},
		monitors::{with_shutdown, Monitor, MonitorError, TickOutcome},
	},
	utils::metrics::LivenessExpirationMetrics,
};

sol! {
	interface ISafe {
		function getOwners() external view returns (address[] memory);
	}

	interface ILivenessGuard {
		function lastLive(address owner) external view returns (uint256);
	}

	interface ILivenessModule {
		function livenessInterval() external view returns (uint256);
	}
}

const STAGE: &str = "l1";
const OP_HEADER_BY_NUMBER: &str = "HeaderByNumber";
const OP_GET_OWNERS: &str = "GetOwners";
const OP_LAST_LIVE: &str = "LastLive";
const OP_LIVENESS_INTERVAL: &str = "LivenessInterval";

struct Snapshot {
	header: EVMBlockHeader,
	last_live: Vec<(Address, U256)>,
	interval: U256,
}

/// Failed step of a tick.
struct StepError {
	operation: &'static str,
	error: BlockChainError,
}

impl StepError {
	fn at(operation: &'static str) -> impl FnOnce(BlockChainError) -> Self {
		move |error| Self { operation, error }
	}
}

pub struct LivenessExpirationMonitor<C: EvmClientTrait> {
	client: Option<C>,
	safe_address: Address,
	liveness_guard_address: Address,
	liveness_module_address: Address,
	metrics: LivenessExpirationMetrics,
}

impl LivenessExpirationMonitor<EvmClient<AlloyTransportClient>> {
	pub async fn new(
		config: &LivenessExpirationConfig,
		registry: &Registry,
	) -> Result<Self, MonitorError> {
		config.validate()?;
		let client = EvmClient::new(&config.l1_node_url, config.settings.rpc_timeout).await?;

		info!(
			safe = %config.safe_address,
			liveness_guard = %config.liveness_guard_address,
			liveness_module = %config.liveness_module_address,
			"liveness expiration monitor started"
		);

		Self::with_client(
			client,
			config.safe_address,
			config.liveness_guard_address,
			config.liveness_module_address,
			registry,
		)
	}
}

impl<C: EvmClientTrait> LivenessExpirationMonitor<C> {
	pub fn with_client(
		client: C,
		safe_address: Address,
		liveness_guard_address: Address,
		liveness_module_address: Address,
		registry: &Registry,
	) -> Result<Self, MonitorError> {
		Ok(Self {
			client: Some(client),
			safe_address,
			liveness_guard_address,
			liveness_module_address,
			metrics: LivenessExpirationMetrics::register(registry)?,
		})
	}

	pub fn metrics(&self) -> &LivenessExpirationMetrics {
		&self.metrics
	}

	async fn call<T: SolCall>(
		client: &C,
		shutdown: &watch::Receiver<bool>,
		to: Address,
		call: T,
	) -> Result<T::Return, BlockChainError> {
		let data = Bytes::from(call.abi_encode());
		let output = with_shutdown(shutdown, T::SIGNATURE, client.call(to, data)).await?;
		T::abi_decode_returns(&output).map_err(|e| {
			BlockChainError::request_error(format!("Failed to decode {}: {}", T::SIGNATURE, e))
		})
	}

	async fn snapshot(
		&self,
		client: &C,
		shutdown: &watch::Receiver<bool>,
	) -> Result<Snapshot, StepError> {
		let header = with_shutdown(shutdown, OP_HEADER_BY_NUMBER, client.get_latest_header())
			.await
			.map_err(StepError::at(OP_HEADER_BY_NUMBER))?;

		let owners = Self::call(client, shutdown, self.safe_address, ISafe::getOwnersCall {})
			.await
			.map_err(StepError::at(OP_GET_OWNERS))?;

		let mut last_live = Vec::with_capacity(owners.len());
		for owner in owners {
			let timestamp = Self::call(
				client,
				shutdown,
				self.liveness_guard_address,
				ILivenessGuard::lastLiveCall { owner },
			)
			.await
			.map_err(StepError::at(OP_LAST_LIVE))?;
			last_live.push((owner, timestamp));
		}

		let interval = Self::call(
			client,
			shutdown,
			self.liveness_module_address,
			ILivenessModule::livenessIntervalCall {},
		)
		.await
		.map_err(StepError::at(OP_LIVENESS_INTERVAL))?;

		Ok(Snapshot {
			header,
			last_live,
			interval,
		})
	}

	fn emit(&self, snapshot: &Snapshot) {
		let now = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_secs())
			.unwrap_or_default();

		self.metrics
			.highest_block_number
			.with_label_values(&["blockNumber"])
			.set(snapshot.header.number as f64);
		self.metrics
			.block_timestamp
			.with_label_values(&["blocktimestamp"])
			.set(snapshot.header.timestamp as f64);
		self.metrics
			.interval_liveness
			.with_label_values(&["interval"])
			.set(as_gauge(snapshot.interval));

		for (owner, last_live) in &snapshot.last_live {
			self.metrics
				.last_live_of_owner
				.with_label_values(&[owner.to_string().as_str()])
				.set(as_gauge(*last_live));

			let expires_at = last_live.saturating_add(snapshot.interval);
			if expires_at < U256::from(now) {
				warn!(owner = %owner, last_live = %last_live, expires_at = %expires_at, "owner liveness expired");
			}
		}

		info!(
			block = snapshot.header.number,
			owners = snapshot.last_live.len(),
			interval = %snapshot.interval,
			"liveness checked"
		);
	}
}

fn as_gauge(value: U256) -> f64 {
	value.saturating_to::<u64>() as f64
}

#[async_trait]
impl<C: EvmClientTrait + 'static> Monitor for LivenessExpirationMonitor<C> {
	fn name(&self) -> &'static str {
		"liveness_expiration"
	}

	async fn run(&mut self, shutdown: &watch::Receiver<bool>) -> TickOutcome {
		let Some(client) = self.client.as_ref() else {
			warn!(monitor = self.name(), "tick skipped, monitor is closed");
			return TickOutcome::Closed;
		};

		match self.snapshot(client, shutdown).await {
			Ok(snapshot) => {
				self.emit(&snapshot);
				TickOutcome::Completed
			}
			Err(StepError { operation, error }) => {
				self.metrics
					.unexpected_rpc_errors
					.with_label_values(&[STAGE, operation])
					.inc();
				if !error.is_cancelled() {
					error!(stage = STAGE, operation, error = %error, "liveness check failed");
				}
				TickOutcome::from_error(&error)
			}
		}
	}

	async fn close(&mut self) {
		if self.client.take().is_some() {
			info!(monitor = self.name(), "monitor closed");
		}
	}
}
