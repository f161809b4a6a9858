//! Mocks and fixtures shared by the integration tests.

mod clients;
mod models;

pub use clients::*;
pub use models::*;
pub use transports::*;
