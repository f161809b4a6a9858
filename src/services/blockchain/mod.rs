//! Blockchain client interfaces and implementations.
//!
//! Provides abstractions and concrete implementations for interacting with
//! chain nodes. Includes:
//!
//! - Generic blockchain client trait
//! - EVM client
//! - Alloy HTTP transport
//! - Error handling for blockchain operations

mod client;
mod clients;
mod error;
mod transports;

pub use client::BlockChainClient;
pub use clients::{EvmClient, EvmClientTrait};
pub use error::BlockChainError;
pub use transports::{AlloyTransportClient, BlockchainTransport};
