//! Metrics module for the application.
//!
//! - Defines the metric families of every monitor.
//! - Each family set is registered into a `Registry` handed in by the caller, so two monitor
//!   instances never share metric state unless they share a registry.
//! - Process gauges (CPU, memory, disk) are refreshed on every scrape.

pub mod server;

use prometheus::{CounterVec, Encoder, Gauge, GaugeVec, Opts, Registry, TextEncoder};
use sysinfo::{Disks, System};

/// Label names of every `unexpectedRpcErrors` counter.
pub const RPC_ERROR_LABELS: [&str; 2] = ["stage", "operation"];

fn gauge_vec(
	registry: &Registry,
	namespace: &str,
	name: &str,
	help: &str,
	labels: &[&str],
) -> Result<GaugeVec, prometheus::Error> {
	let gauge = GaugeVec::new(Opts::new(name, help).namespace(namespace), labels)?;
	registry.register(Box::new(gauge.clone()))?;
	Ok(gauge)
}

fn rpc_error_counter(registry: &Registry, namespace: &str) -> Result<CounterVec, prometheus::Error> {
	let counter = CounterVec::new(
		Opts::new("unexpectedRpcErrors", "number of unexpected rpc errors").namespace(namespace),
		&RPC_ERROR_LABELS,
	)?;
	registry.register(Box::new(counter.clone()))?;
	Ok(counter)
}

/// Metrics of the global events monitor.
#[derive(Clone, Debug)]
pub struct GlobalEventsMetrics {
	/// `{nickname, rulename, priority, functionName, address}`, set to 1 on match
	pub event_emitted: GaugeVec,
	pub unexpected_rpc_errors: CounterVec,
}

impl GlobalEventsMetrics {
	pub const NAMESPACE: &'static str = "global_events_mon";

	pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
		Ok(Self {
			event_emitted: gauge_vec(
				registry,
				Self::NAMESPACE,
				"eventEmitted",
				"Event monitored emitted",
				&["nickname", "rulename", "priority", "functionName", "address"],
			)?,
			unexpected_rpc_errors: rpc_error_counter(registry, Self::NAMESPACE)?,
		})
	}
}

/// Metrics of the tip lag monitor.
#[derive(Clone, Debug)]
pub struct TipMetrics {
	/// Seconds between now and the timestamp of the latest block
	pub lagging: GaugeVec,
	pub unexpected_rpc_errors: CounterVec,
}

impl TipMetrics {
	pub const NAMESPACE: &'static str = "tip_mon";

	pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
		Ok(Self {
			lagging: gauge_vec(
				registry,
				Self::NAMESPACE,
				"lagging",
				"seconds between now and the latest block timestamp",
				&["type"],
			)?,
			unexpected_rpc_errors: rpc_error_counter(registry, Self::NAMESPACE)?,
		})
	}
}

/// Metrics of the liveness expiration monitor.
#[derive(Clone, Debug)]
pub struct LivenessExpirationMetrics {
	pub highest_block_number: GaugeVec,
	pub block_timestamp: GaugeVec,
	pub last_live_of_owner: GaugeVec,
	pub interval_liveness: GaugeVec,
	pub unexpected_rpc_errors: CounterVec,
}

impl LivenessExpirationMetrics {
	pub const NAMESPACE: &'static str = "liveness_expiration_mon";

	pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
		Ok(Self {
			highest_block_number: gauge_vec(
				registry,
				Self::NAMESPACE,
				"highestBlockNumber",
				"Highest block number observed",
				&["blockNumber"],
			)?,
			block_timestamp: gauge_vec(
				registry,
				Self::NAMESPACE,
				"BlockTimestamp",
				"Timestamp of the highest block observed",
				&["blocktimestamp"],
			)?,
			last_live_of_owner: gauge_vec(
				registry,
				Self::NAMESPACE,
				"lastLiveOfAOwner",
				"Last liveness timestamp of a safe owner",
				&["address"],
			)?,
			interval_liveness: gauge_vec(
				registry,
				Self::NAMESPACE,
				"intervalLiveness",
				"Liveness interval of the liveness module",
				&["interval"],
			)?,
			unexpected_rpc_errors: rpc_error_counter(registry, Self::NAMESPACE)?,
		})
	}
}

/// Host resource gauges.
#[derive(Clone, Debug)]
pub struct SystemMetrics {
	pub cpu_usage: Gauge,
	pub memory_usage_percent: Gauge,
	pub memory_usage: Gauge,
	pub total_memory: Gauge,
	pub available_memory: Gauge,
	pub disk_usage: Gauge,
	pub disk_usage_percent: Gauge,
}

impl SystemMetrics {
	pub fn register(registry: &Registry) -> Result<Self, prometheus::Error> {
		let gauge = |name: &str, help: &str| -> Result<Gauge, prometheus::Error> {
			let gauge = Gauge::new(name, help)?;
			registry.register(Box::new(gauge.clone()))?;
			Ok(gauge)
		};

		Ok(Self {
			cpu_usage: gauge("cpu_usage_percentage", "Current CPU usage percentage")?,
			memory_usage_percent: gauge("memory_usage_percentage", "Memory usage percentage")?,
			memory_usage: gauge("memory_usage_bytes", "Memory usage in bytes")?,
			total_memory: gauge("total_memory_bytes", "Total memory in bytes")?,
			available_memory: gauge("available_memory_bytes", "Available memory in bytes")?,
			disk_usage: gauge("disk_usage_bytes", "Used disk space in bytes")?,
			disk_usage_percent: gauge("disk_usage_percentage", "Disk usage percentage")?,
		})
	}

	/// Refreshes the gauges for CPU, memory and disk usage.
	pub fn update(&self) {
		let mut sys = System::new_all();
		sys.refresh_all();

		self.cpu_usage.set(sys.global_cpu_usage() as f64);

		let total_memory = sys.total_memory();
		let memory_usage = sys.used_memory();
		self.total_memory.set(total_memory as f64);
		self.available_memory.set(sys.available_memory() as f64);
		self.memory_usage.set(memory_usage as f64);
		self.memory_usage_percent
			.set(percentage(memory_usage, total_memory));

		// Sum total space and available space across all disks.
		let disks = Disks::new_with_refreshed_list();
		let mut total_disk_space: u64 = 0;
		let mut total_disk_available: u64 = 0;
		for disk in disks.list() {
			total_disk_space += disk.total_space();
			total_disk_available += disk.available_space();
		}
		let used_disk_space = total_disk_space.saturating_sub(total_disk_available);
		self.disk_usage.set(used_disk_space as f64);
		self.disk_usage_percent
			.set(percentage(used_disk_space, total_disk_space));
	}
}

fn percentage(part: u64, total: u64) -> f64 {
	if total > 0 {
		(part as f64 / total as f64) * 100.0
	} else {
		0.0
	}
}

/// Gather all metrics of `registry` in the Prometheus text format.
pub fn gather_metrics(registry: &Registry) -> Result<Vec<u8>, prometheus::Error> {
	let encoder = TextEncoder::new();
	let metric_families = registry.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}
