//! Global events monitor.
//!
//! Each tick fetches the latest header, then the logs of exactly that block,
//! and classifies every log against the rule index. A matched rule sets
//! `global_events_mon_eventEmitted{nickname, rulename, priority, functionName,
//! address}` to 1. A failed step increments
//! `global_events_mon_unexpectedRpcErrors{stage, operation}` and the tick
//! emits nothing else.

use std::path::Path;

use alloy::primitives::Address;
use async_trait::async_trait;
use prometheus::Registry;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::{
	models::{GlobalEventsConfig, RuleSet},
	services::{
		blockchain::{AlloyTransportClient, BlockChainError, EvmClient, EvmClientTrait},
		filter::{EventMatcher, MatchResult},
		monitors::{with_shutdown, Monitor, MonitorError, TickOutcome},
	},
	utils::metrics::GlobalEventsMetrics,
};

const STAGE_L1: &str = "L1";
const OP_HEADER_BY_NUMBER: &str = "HeaderByNumber";
const OP_FILTER_LOGS: &str = "FilterLogs";

/// Human readable name of well known chains.
pub fn chain_id_to_name(chain_id: u64) -> &'static str {
	match chain_id {
		1 => "Ethereum [Mainnet]",
		11155111 => "Sepolia [Testnet]",
		_ => "Unknown chain",
	}
}

/// Rule-driven log monitor for a single chain.
pub struct GlobalEventsMonitor<C: EvmClientTrait> {
	client: Option<C>,
	nickname: String,
	matcher: EventMatcher,
	/// Addresses passed to `eth_getLogs`, empty when some rule listens to every address
	address_filter: Vec<Address>,
	monitored_addresses: Vec<Address>,
	metrics: GlobalEventsMetrics,
}

impl GlobalEventsMonitor<EvmClient<AlloyTransportClient>> {
	/// Loads the rules, connects to the node and registers the metrics.
	///
	/// # Errors
	/// Any configuration or connectivity problem is returned; the process is
	/// expected to exit.
	pub async fn new(config: &GlobalEventsConfig, registry: &Registry) -> Result<Self, MonitorError> {
		config.validate()?;
		let rules = RuleSet::load(&config.rules_path)?;
		let client = EvmClient::new(&config.l1_node_url, config.settings.rpc_timeout).await?;

		let monitor = Self::with_client(client, config.nickname.clone(), &rules, registry)?;
		monitor.log_startup_info(&config.rules_path).await;
		Ok(monitor)
	}
}

impl<C: EvmClientTrait> GlobalEventsMonitor<C> {
	/// Builds a monitor around an existing client.
	pub fn with_client(
		client: C,
		nickname: impl Into<String>,
		rules: &RuleSet,
		registry: &Registry,
	) -> Result<Self, MonitorError> {
		let matcher = EventMatcher::from_rules(rules)?;
		let metrics = GlobalEventsMetrics::register(registry)?;

		Ok(Self {
			client: Some(client),
			nickname: nickname.into(),
			matcher,
			address_filter: rules.address_filter().unwrap_or_default(),
			monitored_addresses: rules.monitored_addresses(),
			metrics,
		})
	}

	pub fn metrics(&self) -> &GlobalEventsMetrics {
		&self.metrics
	}

	/// Logs chain, tip and rule summary. Failures here are not fatal.
	pub async fn log_startup_info(&self, rules_path: &Path) {
		let Some(client) = self.client.as_ref() else {
			return;
		};

		let chain = match client.get_chain_id().await {
			Ok(chain_id) => format!("{} ({})", chain_id_to_name(chain_id), chain_id),
			Err(e) => {
				warn!(error = %e, "failed to fetch chain id");
				"unknown".to_string()
			}
		};
		let latest_block = client.get_latest_block_number().await.ok();

		info!(
			chain = %chain,
			latest_block = ?latest_block,
			nickname = %self.nickname,
			rules_path = %rules_path.display(),
			rules = self.matcher.index().rules().len(),
			topics = self.matcher.index().topic_count(),
			"global events monitor started"
		);
		for address in &self.monitored_addresses {
			info!(address = %address, "monitoring address");
		}
		if self.address_filter.is_empty() {
			info!("at least one rule listens to every address, log queries are unfiltered");
		}
	}

	fn record_error(&self, operation: &str, error: &BlockChainError, block: Option<u64>) {
		self.metrics
			.unexpected_rpc_errors
			.with_label_values(&[STAGE_L1, operation])
			.inc();

		if error.is_cancelled() {
			warn!(stage = STAGE_L1, operation, block = ?block, "request cancelled by shutdown");
		} else {
			error!(stage = STAGE_L1, operation, block = ?block, error = %error, "rpc request failed");
		}
	}

	fn emit(&self, result: &MatchResult<'_>) {
		let address = result.address().to_string();

		info!(
			tx_hash = ?result.transaction_hash(),
			address = %address,
			topics = ?result.log.topics,
			rule = %result.rule_name(),
			priority = %result.priority(),
			signature = %result.canonical,
			"event matched"
		);

		self.metrics
			.event_emitted
			.with_label_values(&[
				self.nickname.as_str(),
				result.rule_name(),
				result.priority(),
				result.signature(),
				address.as_str(),
			])
			.set(1.0);
	}
}

#[async_trait]
impl<C: EvmClientTrait + 'static> Monitor for GlobalEventsMonitor<C> {
	fn name(&self) -> &'static str {
		"global_events"
	}

	async fn run(&mut self, shutdown: &watch::Receiver<bool>) -> TickOutcome {
		let Some(client) = self.client.as_ref() else {
			warn!(monitor = self.name(), "tick skipped, monitor is closed");
			return TickOutcome::Closed;
		};

		let header = match with_shutdown(shutdown, OP_HEADER_BY_NUMBER, client.get_latest_header()).await {
			Ok(header) => header,
			Err(e) => {
				self.record_error(OP_HEADER_BY_NUMBER, &e, None);
				return TickOutcome::from_error(&e);
			}
		};
		info!(block = header.number, "checking block");

		let logs = match with_shutdown(
			shutdown,
			OP_FILTER_LOGS,
			client.get_logs_for_blocks(header.number, header.number, self.address_filter.clone()),
		)
		.await
		{
			Ok(logs) => logs,
			Err(e) => {
				self.record_error(OP_FILTER_LOGS, &e, Some(header.number));
				return TickOutcome::from_error(&e);
			}
		};

		let matches = self.matcher.match_logs(&logs);
		for result in &matches {
			self.emit(result);
		}

		info!(
			block = header.number,
			logs = logs.len(),
			matches = matches.len(),
			"block checked"
		);
		TickOutcome::Completed
	}

	async fn close(&mut self) {
		if self.client.take().is_some() {
			info!(monitor = self.name(), "monitor closed");
		}
	}
}
