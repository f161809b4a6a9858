//! Blockchain error types and handling.
//!
//! Covers node connectivity, request processing and the two ways a single
//! request can be cut short (timeout and shutdown).

use std::time::Duration;

use log::error;

/// Represents possible errors that can occur during blockchain operations
#[derive(Debug)]
pub enum BlockChainError {
	/// Errors related to network connectivity issues
	ConnectionError(String),

	/// Errors related to malformed requests or invalid responses
	RequestError(String),

	/// The node did not answer within the configured request timeout
	TimeoutError { method: String, timeout: Duration },

	/// The request was abandoned because the process is shutting down
	Cancelled(String),
}

impl BlockChainError {
	/// Formats the error message based on the error type
	fn format_message(&self) -> String {
		match self {
			Self::ConnectionError(msg) => format!("Connection error: {}", msg),
			Self::RequestError(msg) => format!("Request error: {}", msg),
			Self::TimeoutError { method, timeout } => {
				format!("Timeout error: {} did not complete within {:?}", method, timeout)
			}
			Self::Cancelled(method) => format!("Cancelled: {} aborted by shutdown", method),
		}
	}

	/// Creates a new connection error with logging
	pub fn connection_error(msg: impl Into<String>) -> Self {
		let error = Self::ConnectionError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new request error with logging
	pub fn request_error(msg: impl Into<String>) -> Self {
		let error = Self::RequestError(msg.into());
		error!("{}", error.format_message());
		error
	}

	/// Creates a new timeout error with logging
	pub fn timeout_error(method: impl Into<String>, timeout: Duration) -> Self {
		let error = Self::TimeoutError {
			method: method.into(),
			timeout,
		};
		error!("{}", error.format_message());
		error
	}

	/// Creates a new cancellation error.
	///
	/// Not logged at error level, shutdown is expected.
	pub fn cancelled(method: impl Into<String>) -> Self {
		let error = Self::Cancelled(method.into());
		log::info!("{}", error.format_message());
		error
	}

	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled(_))
	}
}

// Standard error trait implementations
impl std::fmt::Display for BlockChainError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl std::error::Error for BlockChainError {}

impl From<serde_json::Error> for BlockChainError {
	fn from(err: serde_json::Error) -> Self {
		Self::request_error(format!("Failed to parse response: {}", err))
	}
}
