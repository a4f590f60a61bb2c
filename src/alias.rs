//! # Alias Registration
//!
//! Binds the configured alias to the endpoint and root credentials with
//! `mc alias set`. Every later `mc` call addresses the cluster through it.

use crate::config::Settings;
use crate::error::AdminError;
use crate::mc::{CommandRunner, McCommand};
use tracing::{error, info};

/// Register `settings.alias` with `mc`
///
/// On a non-zero exit the tool's stderr is returned verbatim in
/// [`AdminError::AliasSetup`]. Failing to start `mc` is reported the same way.
pub async fn register_alias<R: CommandRunner>(
    runner: &R,
    settings: &Settings,
) -> Result<(), AdminError> {
    let command = McCommand::alias_set(
        &settings.alias,
        &settings.endpoint,
        &settings.root_user,
        &settings.root_password,
    );

    let output = match runner.run(&command).await {
        Ok(output) => output,
        Err(e) => {
            error!("❌ mc alias setup failed: {}", e);
            return Err(AdminError::AliasSetup {
                alias: settings.alias.clone(),
                stderr: e.to_string(),
            });
        }
    };
    if output.success {
        info!("✅ mc alias '{}' registered", settings.alias);
        return Ok(());
    }

    error!("❌ mc alias setup failed");
    error!("   Command: {}", command);
    error!("   Error: {}", output.stderr);
    Err(AdminError::AliasSetup {
        alias: settings.alias.clone(),
        stderr: output.stderr,
    })
}
