//! Mock implementations of blockchain clients.
//!
//! - [`MockEvmClientTrait`] - Mock implementation of the EVM blockchain client
//!
//! Lets the monitors be driven tick by tick without a node.

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use chain_liveness_monitor::{
	models::{EVMBlockHeader, EVMLog},
	services::blockchain::{BlockChainClient, BlockChainError, EvmClientTrait},
};
use mockall::mock;

mock! {
	/// Mock implementation of the EVM client trait.
	///
	/// This mock allows testing monitor behaviour by simulating node responses
	/// without actual network calls.
	pub EvmClientTrait {}

	#[async_trait]
	impl BlockChainClient for EvmClientTrait {
		async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;
		async fn get_latest_header(&self) -> Result<EVMBlockHeader, BlockChainError>;
	}

	#[async_trait]
	impl EvmClientTrait for EvmClientTrait {
		async fn get_chain_id(&self) -> Result<u64, BlockChainError>;

		async fn get_logs_for_blocks(
			&self,
			from_block: u64,
			to_block: u64,
			addresses: Vec<Address>,
		) -> Result<Vec<EVMLog>, BlockChainError>;

		async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, BlockChainError>;
	}

	impl Clone for EvmClientTrait {
		fn clone(&self) -> Self;
	}
}
