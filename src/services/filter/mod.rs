//! Rule-driven log filtering.
//!
//! - `index`: topic to rule lookup built once from the rule set
//! - `matcher`: classifies observed logs against the index with address scoping
//! - `filter_match`: the match records handed to the monitors

mod error;
mod filter_match;
mod index;
mod matcher;

pub use error::FilterError;
pub use filter_match::MatchResult;
pub use index::{Candidate, RuleIndex};
pub use matcher::EventMatcher;
