//! # Logging
//!
//! Tracing subscriber setup shared by both binaries.
//!
//! Logs go to stderr so that tables printed on stdout stay clean.
//! `RUST_LOG` takes precedence over `LOG_LEVEL`.

use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "unsupported log format '{other}' (expected 'text' or 'json')"
            )),
        }
    }
}

/// Build the default filter directive for a binary target
#[must_use]
pub fn default_directive(binary_target: &str, level: &str) -> String {
    let level = level.to_lowercase();
    format!("minio_reconciler={level},{binary_target}={level}")
}

/// Install the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(binary_target: &str, level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(binary_target, level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing subscriber already initialized: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("yaml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_default_directive_lowercases_level() {
        assert_eq!(
            default_directive("bucket_manager", "DEBUG"),
            "minio_reconciler=debug,bucket_manager=debug"
        );
    }
}
