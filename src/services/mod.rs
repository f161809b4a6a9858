//! Core services of the monitors.
//!
//! - `blockchain`: JSON-RPC clients
//! - `filter`: rule index and log matching
//! - `monitors`: the polling monitors
//! - `signature`: signature canonicalization and topic hashing

pub mod blockchain;
pub mod filter;
pub mod monitors;
pub mod signature;
