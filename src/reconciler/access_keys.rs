//! # Access Key Reconciler
//!
//! Manages service access keys owned by the root user.
//!
//! Listing is two-phase: `svcacct list` yields identifiers only, so each key is
//! enriched with its own `svcacct info` call. A failed detail call leaves that
//! key's detail empty instead of failing the listing. Existence checks re-run
//! the full listing every time.

use crate::error::AdminError;
use crate::mc::{json, CommandRunner, McCommand, RemovalCommand, ServiceAccountAdd};
use crate::reconciler::types::{
    AccessKey, AccessKeyDetail, AccessKeyListEntry, CreatedAccessKey, DeleteOutcome, NewAccessKey,
};
use tracing::{debug, error, info, warn};

/// Reconciler for service access keys under one alias and root user
#[derive(Debug)]
pub struct AccessKeyReconciler<R: CommandRunner> {
    runner: R,
    alias: String,
    root_user: String,
    fallback_name: String,
}

impl<R: CommandRunner> AccessKeyReconciler<R> {
    pub fn new(
        runner: R,
        alias: impl Into<String>,
        root_user: impl Into<String>,
        fallback_name: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            alias: alias.into(),
            root_user: root_user.into(),
            fallback_name: fallback_name.into(),
        }
    }

    /// List service accounts and enrich each with its detail record
    ///
    /// Returns an empty list (and logs the error) when the bulk listing fails.
    /// Records without an `accessKey` are skipped with a warning.
    pub async fn list(&self) -> Vec<AccessKey> {
        let command = McCommand::service_account_list(&self.alias, &self.root_user);
        let output = match self.runner.run(&command).await.and_then(|o| o.into_result(&command)) {
            Ok(output) => output,
            Err(e) => {
                error!("❌ Failed to list access keys: {}", e);
                return Vec::new();
            }
        };

        let entries = json::parse_lines::<AccessKeyListEntry>(&output.stdout);
        let mut keys = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(access_key) = entry.access_key.filter(|k| !k.is_empty()) else {
                warn!("Skipping service account record without an accessKey");
                continue;
            };
            let detail = self.fetch_detail(&access_key).await;
            keys.push(AccessKey { access_key, detail });
        }
        keys
    }

    async fn fetch_detail(&self, access_key: &str) -> Option<AccessKeyDetail> {
        let command = McCommand::service_account_info(&self.alias, access_key);
        let output = match self.runner.run(&command).await.and_then(|o| o.into_result(&command)) {
            Ok(output) => output,
            Err(e) => {
                warn!("Could not fetch detail for access key '{}': {}", access_key, e);
                return None;
            }
        };

        if output.stdout.trim().is_empty() {
            debug!("Empty detail response for access key '{}'", access_key);
            return None;
        }

        match json::parse_document::<AccessKeyDetail>(&command, &output.stdout) {
            Ok(detail) => Some(detail),
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    /// Whether `access_key` appears in a fresh listing
    pub async fn exists(&self, access_key: &str) -> bool {
        self.list()
            .await
            .iter()
            .any(|key| key.access_key == access_key)
    }

    /// Create a service access key
    ///
    /// Empty fields count as not supplied. Returns `Ok(None)` without calling
    /// `svcacct add` when a caller-supplied access key already exists. Without
    /// a name, the configured fallback name is used so the key is never left
    /// unnamed.
    pub async fn create(
        &self,
        request: &NewAccessKey,
    ) -> Result<Option<CreatedAccessKey>, AdminError> {
        let access_key = supplied(request.access_key.as_deref());

        if let Some(access_key) = access_key {
            if self.exists(access_key).await {
                info!("ℹ️  Access key '{}' already exists", access_key);
                return Ok(None);
            }
        }

        let add = ServiceAccountAdd {
            access_key,
            secret_key: supplied(request.secret_key.as_ref().map(|s| s.as_str())),
            name: supplied(request.name.as_deref()).unwrap_or(self.fallback_name.as_str()),
            description: supplied(request.description.as_deref()),
        };
        let command = McCommand::service_account_add(&self.alias, &self.root_user, &add);

        let output = self
            .runner
            .run(&command)
            .await
            .and_then(|o| o.into_result(&command))
            .inspect_err(|e| error!("❌ Failed to create access key: {}", e))?;

        let created = json::parse_document::<CreatedAccessKey>(&command, &output.stdout)
            .inspect_err(|e| error!("❌ Failed to parse access key creation response: {}", e))?;

        info!("✅ Access key '{}' created", created.access_key);
        Ok(Some(created))
    }

    /// Delete `access_key` if it exists
    ///
    /// Tries the current `svcacct remove` first and the legacy
    /// `accesskey remove` second; the legacy failure is reported if both fail.
    pub async fn delete(&self, access_key: &str) -> Result<DeleteOutcome, AdminError> {
        if !self.exists(access_key).await {
            warn!("⚠️  Access key '{}' does not exist", access_key);
            return Ok(DeleteOutcome::AlreadyAbsent);
        }

        let [primary, legacy] = RemovalCommand::ORDER;
        let result = match self.remove(primary, access_key).await {
            Ok(()) => Ok(primary),
            Err(e) => {
                warn!(
                    "Access key removal via '{}' failed, retrying with '{}': {}",
                    primary.as_str(),
                    legacy.as_str(),
                    e
                );
                self.remove(legacy, access_key).await.map(|()| legacy)
            }
        };

        match result {
            Ok(variant) => {
                info!("✅ Access key '{}' deleted ({})", access_key, variant.as_str());
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                error!("❌ Failed to delete access key '{}': {}", access_key, e);
                Err(e)
            }
        }
    }

    async fn remove(&self, variant: RemovalCommand, access_key: &str) -> Result<(), AdminError> {
        let command = variant.command(&self.alias, access_key);
        self.runner
            .run(&command)
            .await
            .and_then(|o| o.into_result(&command))
            .map(|_| ())
    }

    /// The listed record for `access_key`, if present
    pub async fn detail(&self, access_key: &str) -> Option<AccessKey> {
        self.list()
            .await
            .into_iter()
            .find(|key| key.access_key == access_key)
    }
}

fn supplied(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
