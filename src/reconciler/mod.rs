//! # Reconciler
//!
//! Desired-state reconciliation for buckets and service access keys.
//!
//! Both reconcilers share one shape: list, check existence, create, delete.
//! All state is re-read from the cluster through `mc`; nothing is persisted
//! locally.

mod access_keys;
mod buckets;
mod types;

pub use access_keys::AccessKeyReconciler;
pub use buckets::BucketReconciler;
pub use types::{
    AccessKey, AccessKeyDetail, BatchReport, Bucket, BucketStatus, CreateOutcome,
    CreatedAccessKey, DeleteOutcome, NewAccessKey,
};
