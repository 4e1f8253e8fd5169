//! Tracing setup
//!
//! Logs go to stderr; stdout carries the protocol.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{Error, Result};

/// Map common level spellings onto tracing's names.
///
/// Case-insensitive; `warning` becomes `warn`, `critical` and `fatal`
/// become `error`. Anything else is passed through lowercased so that
/// full filter directives keep working.
pub fn normalize_level(level: &str) -> String {
    let level = level.trim().to_ascii_lowercase();
    match level.as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        _ => level,
    }
}

/// Build the filter: an explicit level wins, then `RUST_LOG`, then `info`.
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level.map(normalize_level).filter(|level| !level.is_empty()) {
        Some(level) => EnvFilter::try_new(&level).map_err(|e| Error::Logging(e.to_string())),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .map_err(|e| Error::Logging(e.to_string())),
    }
}

/// Install the process-wide subscriber. Fails if one is already set.
pub fn init(level: Option<&str>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(level)?)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
