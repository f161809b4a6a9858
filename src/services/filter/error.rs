use std::error::Error;
use std::fmt;

use log::error;

use crate::services::signature::SignatureError;

#[derive(Debug)]
pub enum FilterError {
	InvalidSignature { rule: String, source: SignatureError },
}

impl FilterError {
	fn format_message(&self) -> String {
		match self {
			FilterError::InvalidSignature { rule, source } => {
				format!("Rule '{}' has an invalid event signature: {}", rule, source)
			}
		}
	}

	pub fn invalid_signature(rule: impl Into<String>, source: SignatureError) -> Self {
		let error = FilterError::InvalidSignature {
			rule: rule.into(),
			source,
		};
		error!("{}", error.format_message());
		error
	}
}

impl fmt::Display for FilterError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.format_message())
	}
}

impl Error for FilterError {
	fn source(&self) -> Option<&(dyn Error + 'static)> {
		match self {
			FilterError::InvalidSignature { source, .. } => Some(source),
		}
	}
}
