//! # Constants
//!
//! Shared constants used throughout the reconciler.
//!
//! These values represent reasonable defaults and can be overridden via
//! environment variables where applicable.

/// Default mc alias bound to the cluster endpoint
pub const DEFAULT_ALIAS: &str = "myminio";

/// Label given to service access keys created without an explicit name
pub const DEFAULT_ACCESS_KEY_NAME: &str = "no-name";

/// Default administrative tool binary, resolved through `PATH`
pub const DEFAULT_MC_BINARY: &str = "mc";

/// Default log level when neither `RUST_LOG` nor `LOG_LEVEL` is set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Minimum bucket name length (characters)
pub const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length (characters)
pub const MAX_BUCKET_NAME_LEN: usize = 63;

/// Region passed to the S3 client for the connectivity probe.
/// MinIO accepts any region unless one is configured server-side.
pub const PROBE_REGION: &str = "us-east-1";

/// `type` value mc emits for top-level buckets when listing an alias root
pub const FOLDER_ENTRY_TYPE: &str = "folder";

/// `status` envelope value mc attaches to every successful `--json` record
pub const MC_STATUS_SUCCESS: &str = "success";

pub const ENV_ENDPOINT: &str = "MINIO_ENDPOINT";
pub const ENV_ROOT_USER: &str = "MINIO_ROOT_USER";
pub const ENV_ROOT_PASSWORD: &str = "MINIO_ROOT_PASSWORD";
pub const ENV_ALIAS: &str = "MINIO_ALIAS";
pub const ENV_BUCKETS: &str = "MINIO_BUCKETS";
pub const ENV_ACCESS_KEY_NAME: &str = "MINIO_ACCESS_KEY_NAME";
pub const ENV_MC_PATH: &str = "MINIO_MC_PATH";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
