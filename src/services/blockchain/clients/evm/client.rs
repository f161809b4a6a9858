//! EVM-compatible blockchain client implementation.
//!
//! This module provides functionality to interact with Ethereum and other EVM-compatible
//! blockchains: tip header lookup, single-block log filtering and read-only contract calls.

use std::time::Duration;

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
	models::{EVMBlockHeader, EVMLog},
	services::blockchain::{
		client::BlockChainClient,
		transports::{AlloyTransportClient, BlockchainTransport},
		BlockChainError,
	},
	utils::parsing::parse_quantity,
};

/// Client implementation for Ethereum Virtual Machine (EVM) compatible blockchains
///
/// Provides typed access to the handful of JSON-RPC methods the monitors use.
#[derive(Clone)]
pub struct EvmClient<T: Send + Sync + Clone> {
	/// The underlying transport client for RPC communication
	transport: T,
}

impl<T: Send + Sync + Clone> EvmClient<T> {
	/// Creates a new EVM client instance with a specific transport client
	pub fn new_with_transport(transport: T) -> Self {
		Self { transport }
	}
}

impl EvmClient<AlloyTransportClient> {
	/// Creates a new EVM client instance
	///
	/// # Arguments
	/// * `url` - Node URL
	/// * `timeout` - Per-request timeout
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or connection error
	pub async fn new(url: &str, timeout: Duration) -> Result<Self, BlockChainError> {
		let transport = AlloyTransportClient::new(url, timeout).await?;
		Ok(Self::new_with_transport(transport))
	}
}

impl<T: Send + Sync + Clone + BlockchainTransport> EvmClient<T> {
	async fn request<R: DeserializeOwned>(
		&self,
		method: &str,
		params: Value,
	) -> Result<R, BlockChainError> {
		let result = self.transport.send_raw_request(method, Some(params)).await?;

		if result.is_null() {
			return Err(BlockChainError::request_error(format!(
				"{} returned null",
				method
			)));
		}

		serde_json::from_value(result).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse {} response: {}", method, e))
		})
	}

	async fn request_quantity(&self, method: &str) -> Result<u64, BlockChainError> {
		let value: String = self.request(method, json!([])).await?;
		parse_quantity(&value).map_err(|e| {
			BlockChainError::request_error(format!("Failed to parse {} response: {}", method, e))
		})
	}
}

/// Extended functionality specific to EVM-compatible blockchains
#[async_trait]
pub trait EvmClientTrait: BlockChainClient {
	/// Retrieves the chain identifier of the node
	async fn get_chain_id(&self) -> Result<u64, BlockChainError>;

	/// Retrieves logs for a range of blocks
	///
	/// # Arguments
	/// * `from_block` - Starting block number
	/// * `to_block` - Ending block number
	/// * `addresses` - Emitting contracts to restrict the query to, empty for all
	///
	/// # Returns
	/// * `Result<Vec<EVMLog>, BlockChainError>` - Collection of matching logs or error
	async fn get_logs_for_blocks(
		&self,
		from_block: u64,
		to_block: u64,
		addresses: Vec<Address>,
	) -> Result<Vec<EVMLog>, BlockChainError>;

	/// Executes a read-only call against the latest block
	///
	/// # Arguments
	/// * `to` - Contract address
	/// * `data` - ABI encoded calldata
	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockChainError>;
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> EvmClientTrait for EvmClient<T> {
	async fn get_chain_id(&self) -> Result<u64, BlockChainError> {
		self.request_quantity("eth_chainId").await
	}

	/// Retrieves logs within the specified block range
	///
	/// An empty `addresses` list omits the address filter entirely.
	async fn get_logs_for_blocks(
		&self,
		from_block: u64,
		to_block: u64,
		addresses: Vec<Address>,
	) -> Result<Vec<EVMLog>, BlockChainError> {
		let mut filter = json!({
			"fromBlock": format!("0x{:x}", from_block),
			"toBlock": format!("0x{:x}", to_block)
		});
		if !addresses.is_empty() {
			filter["address"] = json!(addresses);
		}

		self.request("eth_getLogs", json!([filter])).await
	}

	async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockChainError> {
		self.request(
			"eth_call",
			json!([{ "to": to, "data": data }, "latest"]),
		)
		.await
	}
}

#[async_trait]
impl<T: Send + Sync + Clone + BlockchainTransport> BlockChainClient for EvmClient<T> {
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError> {
		self.request_quantity("eth_blockNumber").await
	}

	/// Fetches `eth_getBlockByNumber("latest", false)`
	async fn get_latest_header(&self) -> Result<EVMBlockHeader, BlockChainError> {
		self.request("eth_getBlockByNumber", json!(["latest", false]))
			.await
	}
}
