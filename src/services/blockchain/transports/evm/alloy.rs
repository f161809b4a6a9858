//! Alloy transport implementation for EVM blockchain interactions.
//!
//! This module provides a client implementation for interacting with EVM-compatible nodes
//! via alloy, supporting a connectivity check and raw JSON-RPC requests bounded by a
//! per-request timeout.

use std::time::Duration;

use alloy::rpc::client::{ClientBuilder, RpcClient};
use serde_json::Value;
use url::Url;

use crate::services::blockchain::{transports::BlockchainTransport, BlockChainError};

/// A client for interacting with EVM-compatible blockchain nodes via alloy
#[derive(Clone, Debug)]
pub struct AlloyTransportClient {
	/// The underlying alloy client for RPC requests
	client: RpcClient,
	/// Node URL the client was built for
	url: String,
	/// Upper bound of every request
	timeout: Duration,
}

impl AlloyTransportClient {
	/// Creates a new alloy transport client and checks the node with `net_version`
	///
	/// # Arguments
	/// * `url` - HTTP(S) URL of the node
	/// * `timeout` - Upper bound applied to every request, the connectivity check included
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - A new client instance or connection error
	pub async fn new(url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let parsed = Url::parse(url).map_err(|e| {
			BlockChainError::connection_error(format!("Invalid RPC URL '{}': {}", url, e))
		})?;

		let transport = Self {
			client: ClientBuilder::default().http(parsed),
			url: url.to_string(),
			timeout,
		};

		transport
			.send_raw_request::<Value>("net_version", None)
			.await
			.map_err(|e| {
				BlockChainError::connection_error(format!("Failed to connect to {}: {}", url, e))
			})?;

		Ok(transport)
	}
}

#[async_trait::async_trait]
impl BlockchainTransport for AlloyTransportClient {
	async fn get_current_url(&self) -> String {
		self.url.clone()
	}

	/// Sends a raw JSON-RPC request to the EVM node
	///
	/// # Errors
	/// * `TimeoutError` if the node does not answer within the configured timeout
	/// * `RequestError` for transport failures and JSON-RPC error responses
	async fn send_raw_request<P>(
		&self,
		method: &str,
		params: Option<P>,
	) -> Result<Value, BlockChainError>
	where
		P: Into<Value> + Send + Clone,
	{
		let params = params
			.map(Into::into)
			.unwrap_or_else(|| Value::Array(Vec::new()));

		let request = self.client.request::<_, Value>(method.to_string(), params);

		match tokio::time::timeout(self.timeout, request).await {
			Ok(Ok(result)) => Ok(result),
			Ok(Err(e)) => Err(BlockChainError::request_error(format!(
				"{} failed: {}",
				method, e
			))),
			Err(_) => Err(BlockChainError::timeout_error(method, self.timeout)),
		}
	}
}
