//! Ethereum Virtual Machine (EVM) blockchain specific implementations.
//!
//! This module contains the data structures the monitors decode from EVM
//! JSON-RPC responses: block headers and logs.

mod block;
mod log;

pub use block::BlockHeader as EVMBlockHeader;
pub use log::ObservedLog as EVMLog;
