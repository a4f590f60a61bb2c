//! # MinIO Reconciler
//!
//! Reconciles a declared set of buckets and service access keys against a
//! live MinIO cluster. All mutations go through the MinIO client (`mc`);
//! state is always re-read from the cluster, never cached locally.
//!
//! Flow for every invocation:
//!
//! 1. [`config`] loads settings from the environment
//! 2. [`probe`] checks the cluster answers with the root credentials
//! 3. [`alias`] registers the `mc` alias every later call uses
//! 4. [`validation`] checks declared bucket names (bucket manager only)
//! 5. A [`reconciler`] performs the requested operation
//!
//! [`display`] renders results for the two binaries.

pub mod alias;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod initialization;
pub mod logging;
pub mod mc;
pub mod probe;
pub mod reconciler;
pub mod validation;

pub use error::AdminError;

/// Build metadata stamped by `build.rs`
pub const BUILD_GIT_HASH: &str = env!("BUILD_GIT_HASH");
pub const BUILD_DATETIME: &str = env!("BUILD_DATETIME");
