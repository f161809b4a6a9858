//! Core blockchain client interface.
//!
//! This module defines the chain-agnostic reads every monitor relies on.

use async_trait::async_trait;

use crate::{models::EVMBlockHeader, services::blockchain::BlockChainError};

/// Defines the core interface for blockchain clients
#[async_trait]
pub trait BlockChainClient: Send + Sync + Clone {
	/// Retrieves the latest block number from the blockchain
	///
	/// # Returns
	/// * `Result<u64, BlockChainError>` - The latest block number or an error
	async fn get_latest_block_number(&self) -> Result<u64, BlockChainError>;

	/// Retrieves the header of the most recent block
	///
	/// # Returns
	/// * `Result<EVMBlockHeader, BlockChainError>` - Number and timestamp of the tip
	async fn get_latest_header(&self) -> Result<EVMBlockHeader, BlockChainError>;
}
