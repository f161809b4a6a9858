//! Logging utilities for the application
//!
//! Logs go through `tracing_subscriber` with a compact formatter. The filter comes from
//! `RUST_LOG` when set, otherwise from the level given on the command line.
//! Records emitted through the `log` facade (error constructors) are picked up by the
//! subscriber as well.

use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Level used when neither `RUST_LOG` nor `--log-level` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Builds the filter: `RUST_LOG` first, then `default_level`, then `info`.
pub fn env_filter(default_level: Option<&str>) -> EnvFilter {
	EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(default_level.unwrap_or(DEFAULT_LOG_LEVEL)))
		.unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Setup logging to stdout
pub fn setup_logging(
	default_level: Option<&str>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(default_level, std::io::stdout)
}

/// Setup logging with a custom writer
pub fn setup_logging_with_writer<W>(
	default_level: Option<&str>,
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(env_filter(default_level))
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(true)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
