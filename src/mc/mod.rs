//! # mc Runner
//!
//! Executes the MinIO client (`mc`), the only path through which the
//! reconciler mutates the cluster.
//!
//! Calls are strictly sequential and block until the child exits; no timeout
//! is applied.

use crate::config::Settings;
use crate::error::AdminError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tracing::debug;

pub mod commands;
pub mod json;

pub use commands::{McCommand, RemovalCommand, ServiceAccountAdd};

/// Captured result of one `mc` invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Convert a non-zero exit into [`AdminError::ExternalTool`]
    pub fn into_result(self, command: &McCommand) -> Result<CommandOutput, AdminError> {
        if self.success {
            Ok(self)
        } else {
            Err(AdminError::ExternalTool {
                command: command.to_string(),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Trait for executing `mc` (allows mocking in tests)
///
/// A non-zero exit is not an error at this level; only failing to start the
/// process is.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &McCommand) -> Result<CommandOutput, AdminError>;
}

#[async_trait]
impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    async fn run(&self, command: &McCommand) -> Result<CommandOutput, AdminError> {
        (**self).run(command).await
    }
}

/// Runner that spawns the real `mc` binary
#[derive(Debug, Clone)]
pub struct McRunner {
    program: PathBuf,
}

impl McRunner {
    /// Resolve `binary` (a name on `PATH` or a path) to an executable
    pub fn new(binary: &str) -> Result<Self, AdminError> {
        let program = which::which(binary).map_err(|e| AdminError::ToolSpawn {
            program: binary.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
        })?;
        debug!("Resolved mc binary: {}", program.display());
        Ok(Self { program })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AdminError> {
        Self::new(&settings.mc_binary)
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl CommandRunner for McRunner {
    async fn run(&self, command: &McCommand) -> Result<CommandOutput, AdminError> {
        debug!(command = %command, "Executing mc");

        let output = tokio::process::Command::new(&self.program)
            .args(command.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| AdminError::ToolSpawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let output = CommandOutput::from(output);
        debug!(
            command = %command,
            exit_code = ?output.code,
            "mc finished"
        );
        Ok(output)
    }
}
