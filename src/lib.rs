//! Blockchain liveness monitors.
//!
//! A family of monitors that poll a chain node on an interval, compare what they
//! observe against configured expectations and expose the result as Prometheus
//! metrics:
//!
//! - global events: classifies the logs of the latest block against event rules
//! - tip: lag between wall clock time and the latest block
//! - liveness expiration: Safe owner liveness data
//!
//! # Modules
//! - `bootstrap`: monitor construction and the tick loop
//! - `models`: rules, chain data and configuration
//! - `services`: RPC clients, matching and the monitors
//! - `utils`: logging, metrics and parsing helpers

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
