//! # Errors
//!
//! Error taxonomy shared by every stage of a run.
//!
//! Initialization-phase errors (configuration, connectivity, alias, validation)
//! are fatal. Tool and parse errors are reported per operation and never abort
//! a batch.

use crate::validation::BucketNameError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    /// Required settings are missing or empty
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The object-storage endpoint could not be reached with the root credentials
    #[error("cannot connect to MinIO at {endpoint}")]
    Connectivity { endpoint: String },

    /// `mc alias set` exited non-zero
    #[error("failed to register mc alias '{alias}': {stderr}")]
    AliasSetup { alias: String, stderr: String },

    /// A declared bucket name breaks the naming rules
    #[error(transparent)]
    Validation(#[from] BucketNameError),

    /// The administrative tool exited non-zero
    #[error("`{command}` failed (exit code {}): {stderr}", exit_code_label(.code.as_ref()))]
    ExternalTool {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The administrative tool printed something other than the expected JSON
    #[error("failed to parse response of `{command}`: {source}")]
    ResponseParse {
        command: String,
        #[source]
        source: serde_json::Error,
    },

    /// The administrative tool could not be located or started
    #[error("failed to run {program}: {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

fn exit_code_label(code: Option<&i32>) -> String {
    code.map_or_else(|| "none".to_string(), ToString::to_string)
}

impl AdminError {
    /// Whether this error stops the whole invocation
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AdminError::Configuration(_)
                | AdminError::Connectivity { .. }
                | AdminError::AliasSetup { .. }
                | AdminError::Validation(_)
        )
    }

    /// Standard error captured from the administrative tool, if any
    #[must_use]
    pub fn tool_stderr(&self) -> Option<&str> {
        match self {
            AdminError::ExternalTool { stderr, .. } | AdminError::AliasSetup { stderr, .. } => {
                Some(stderr.as_str())
            }
            _ => None,
        }
    }
}
