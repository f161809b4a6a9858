//! Blockchain-specific model implementations.
//!
//! Only EVM chains are supported; each submodule holds the platform-specific
//! shapes of the data returned by the node.

pub mod evm;
