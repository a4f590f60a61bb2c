//! # Initialization
//!
//! Startup sequence shared by both managers: connectivity probe, alias
//! registration, then (bucket manager only) validation of every declared
//! bucket name. Any failure here is fatal and no reconciler operation runs.

use crate::alias::register_alias;
use crate::config::Settings;
use crate::error::AdminError;
use crate::mc::CommandRunner;
use crate::probe::ConnectivityProbe;
use crate::validation::validate_bucket_name;
use tracing::{error, info};

/// Run the startup sequence
///
/// `declared_buckets` is empty for the access-key manager.
pub async fn initialize<P, R>(
    settings: &Settings,
    probe: &P,
    runner: &R,
    declared_buckets: &[String],
) -> Result<(), AdminError>
where
    P: ConnectivityProbe + ?Sized,
    R: CommandRunner + ?Sized,
{
    info!("🚀 Initializing (endpoint: {}, alias: {})", settings.endpoint, settings.alias);

    if !probe.check(settings).await {
        return Err(AdminError::Connectivity {
            endpoint: settings.endpoint.clone(),
        });
    }

    register_alias(&runner, settings).await?;

    for name in declared_buckets {
        if let Err(e) = validate_bucket_name(name) {
            error!("❌ {}", e);
            return Err(e.into());
        }
    }

    info!("✅ Initialization complete");
    Ok(())
}
