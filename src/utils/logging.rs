//! Logging setup for the resolver.
//!
//! Library code logs through `tracing` (and the error constructors through `log`, which
//! `tracing-subscriber` bridges). The binary installs a compact formatter filtered by
//! `RUST_LOG`, falling back to `LOG_LEVEL` and finally to `info`.
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Environment variable consulted when `RUST_LOG` is not set
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const DEFAULT_LEVEL: &str = "info";

/// Builds the filter used by the subscriber
///
/// `RUST_LOG` wins when present and valid. Otherwise `LOG_LEVEL` is used as a plain
/// level for every target, and `info` when neither is usable.
pub fn default_filter() -> EnvFilter {
	filter_from(
		std::env::var(EnvFilter::DEFAULT_ENV).ok(),
		std::env::var(LOG_LEVEL_ENV).ok(),
	)
}

fn filter_from(directives: Option<String>, level: Option<String>) -> EnvFilter {
	directives
		.and_then(|directives| EnvFilter::try_new(directives).ok())
		.or_else(|| level.and_then(|level| EnvFilter::try_new(level.trim()).ok()))
		.unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global subscriber writing to stderr, keeping stdout for records
pub fn setup_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
	setup_logging_with_writer(std::io::stderr)
}

/// Installs the global subscriber writing to `writer`
pub fn setup_logging_with_writer<W>(
	writer: W,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(default_filter())
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(false)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
