//! # Bucket Reconciler
//!
//! Brings the cluster's buckets in line with the declared list.
//!
//! Existence is re-checked against the cluster before every mutation; nothing
//! is cached between calls. A bucket created or removed by someone else between
//! the check and the mutation surfaces as a tool error.

use crate::error::AdminError;
use crate::mc::commands::{alias_root, bucket_root};
use crate::mc::{json, CommandRunner, McCommand};
use crate::reconciler::types::{
    BatchReport, Bucket, BucketStatus, CreateOutcome, DeleteOutcome, ListEntry,
};
use tracing::{error, info, warn};

/// Reconciler for buckets under one alias
#[derive(Debug)]
pub struct BucketReconciler<R: CommandRunner> {
    runner: R,
    alias: String,
    declared: Vec<String>,
}

impl<R: CommandRunner> BucketReconciler<R> {
    pub fn new(runner: R, alias: impl Into<String>, declared: Vec<String>) -> Self {
        Self {
            runner,
            alias: alias.into(),
            declared,
        }
    }

    /// Declared bucket names, in declared order
    #[must_use]
    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    /// List buckets at the alias root
    ///
    /// Returns an empty list (and logs the error) when `mc` fails.
    pub async fn list(&self) -> Vec<Bucket> {
        let command = McCommand::list_json(&alias_root(&self.alias));
        let output = match self.runner.run(&command).await.and_then(|o| o.into_result(&command)) {
            Ok(output) => output,
            Err(e) => {
                error!("❌ Failed to list buckets: {}", e);
                return Vec::new();
            }
        };

        json::parse_lines::<ListEntry>(&output.stdout)
            .into_iter()
            .filter_map(ListEntry::into_bucket)
            .collect()
    }

    /// Whether `name` exists, judged solely by the exit status of `mc ls <alias>/<name>/`
    pub async fn exists(&self, name: &str) -> bool {
        let command = McCommand::list_json(&bucket_root(&self.alias, name));
        match self.runner.run(&command).await {
            Ok(output) => output.success,
            Err(e) => {
                warn!("Could not check bucket '{}': {}", name, e);
                false
            }
        }
    }

    /// Create `name` unless it already exists
    pub async fn create(&self, name: &str) -> Result<CreateOutcome, AdminError> {
        if self.exists(name).await {
            info!("ℹ️  Bucket '{}' already exists", name);
            return Ok(CreateOutcome::AlreadyPresent);
        }

        let command = McCommand::make_bucket(&self.alias, name);
        match self.runner.run(&command).await.and_then(|o| o.into_result(&command)) {
            Ok(_) => {
                info!("✅ Bucket '{}' created", name);
                Ok(CreateOutcome::Created)
            }
            Err(e) => {
                error!("❌ Failed to create bucket '{}': {}", name, e);
                Err(e)
            }
        }
    }

    /// Create every declared bucket in order
    ///
    /// Each bucket is attempted independently; failures do not stop the batch
    /// and buckets already created are left in place.
    pub async fn create_declared(&self) -> BatchReport {
        info!(
            "🪣 Creating declared buckets ({} total)",
            self.declared.len()
        );

        let mut results = Vec::with_capacity(self.declared.len());
        for name in &self.declared {
            info!("📦 Creating bucket '{}'", name);
            let result = self.create(name).await;
            results.push((name.clone(), result));
        }

        let report = BatchReport { results };
        info!(
            "📊 Bucket creation: {}/{} succeeded",
            report.succeeded(),
            report.total()
        );
        report
    }

    /// Delete `name` if it exists; `force` removes a non-empty bucket
    pub async fn delete(&self, name: &str, force: bool) -> Result<DeleteOutcome, AdminError> {
        if !self.exists(name).await {
            warn!("⚠️  Bucket '{}' does not exist", name);
            return Ok(DeleteOutcome::AlreadyAbsent);
        }

        let command = McCommand::remove_bucket(&self.alias, name, force);
        match self.runner.run(&command).await.and_then(|o| o.into_result(&command)) {
            Ok(_) => {
                info!("✅ Bucket '{}' deleted", name);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                error!("❌ Failed to delete bucket '{}': {}", name, e);
                Err(e)
            }
        }
    }

    /// Existence of each declared bucket; read-only
    pub async fn status_report(&self) -> Vec<BucketStatus> {
        let mut statuses = Vec::with_capacity(self.declared.len());
        for name in &self.declared {
            statuses.push(BucketStatus {
                name: name.clone(),
                exists: self.exists(name).await,
            });
        }
        statuses
    }
}
