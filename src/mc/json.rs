//! # JSON Output Parsing
//!
//! `mc --json` prints one JSON object per line.

use crate::error::AdminError;
use crate::mc::McCommand;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Parse every line that deserializes into `T`, skipping blank and malformed lines
pub fn parse_lines<T: DeserializeOwned>(stdout: &str) -> Vec<T> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<T>(line) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping unparseable mc output line ({}): {}", e, line);
                None
            }
        })
        .collect()
}

/// Parse the whole (trimmed) output as a single JSON document
pub fn parse_document<T: DeserializeOwned>(
    command: &McCommand,
    stdout: &str,
) -> Result<T, AdminError> {
    serde_json::from_str(stdout.trim()).map_err(|source| AdminError::ResponseParse {
        command: command.to_string(),
        source,
    })
}
