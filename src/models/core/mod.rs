//! Core domain models for the monitors.
//!
//! - Rules: operator-defined pairings of event signatures with an address scope

mod rule;

pub use rule::{EventEntry, Rule, RuleSet};
