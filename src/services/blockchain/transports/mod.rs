//! Network transport implementations for blockchain clients.
//!
//! - Alloy HTTP transport for EVM chains

mod evm {
	pub mod alloy;
}

use serde_json::Value;

use crate::services::blockchain::BlockChainError;
pub use evm::alloy::AlloyTransportClient;

/// Base trait for all blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the current URL being used by the transport
	async fn get_current_url(&self) -> String;

	/// Send a raw JSON-RPC request and return the `result` payload
	///
	/// `None` params are sent as an empty positional list.
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone;
}
