//! Polling monitors.
//!
//! Every monitor owns its RPC client, its metric handles and whatever static
//! state it derives from configuration. A tick is one call to
//! [`Monitor::run`]; ticks of one instance never overlap since `run` takes
//! `&mut self`.
//!
//! - `global_events`: matches the logs of the latest block against rules
//! - `tip`: reports how far the latest block lags behind wall clock time
//! - `liveness_expiration`: reports Safe owner liveness data

mod error;
mod global_events;
mod liveness_expiration;
mod tip;

use std::future::Future;

use async_trait::async_trait;
use tokio::sync::watch;

pub use error::MonitorError;
pub use global_events::{chain_id_to_name, GlobalEventsMonitor};
pub use liveness_expiration::LivenessExpirationMonitor;
pub use tip::TipMonitor;

use crate::services::blockchain::BlockChainError;

/// How a tick ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
	/// Every step succeeded and metrics were emitted
	Completed,
	/// An RPC step failed, the error counter was incremented
	Failed,
	/// Shutdown interrupted an in-flight request
	Cancelled,
	/// The monitor was closed before the tick
	Closed,
}

impl TickOutcome {
	pub(crate) fn from_error(error: &BlockChainError) -> Self {
		if error.is_cancelled() {
			Self::Cancelled
		} else {
			Self::Failed
		}
	}
}

/// A periodically driven monitor.
#[async_trait]
pub trait Monitor: Send {
	/// Short identifier used in logs
	fn name(&self) -> &'static str;

	/// Executes one tick.
	///
	/// Transient failures are handled inside the tick; the returned outcome is
	/// informational.
	async fn run(&mut self, shutdown: &watch::Receiver<bool>) -> TickOutcome;

	/// Releases the RPC client. Calling it more than once is a no-op.
	async fn close(&mut self);
}

/// Races `request` against the shutdown signal.
///
/// A request started after shutdown was signalled is not polled at all.
pub(crate) async fn with_shutdown<T, F>(
	shutdown: &watch::Receiver<bool>,
	operation: &str,
	request: F,
) -> Result<T, BlockChainError>
where
	F: Future<Output = Result<T, BlockChainError>>,
{
	let mut shutdown = shutdown.clone();
	if *shutdown.borrow_and_update() {
		return Err(BlockChainError::cancelled(operation));
	}

	let stopped = async move {
		// A dropped sender can no longer signal shutdown
		let sender_dropped = shutdown.wait_for(|stop| *stop).await.is_err();
		if sender_dropped {
			std::future::pending::<()>().await;
		}
	};

	tokio::select! {
		biased;
		_ = stopped => Err(BlockChainError::cancelled(operation)),
		result = request => result,
	}
}
