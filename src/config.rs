//! # Configuration
//!
//! Settings loaded from environment variables (and an optional `.env` file).
//!
//! Required: `MINIO_ENDPOINT`, `MINIO_ROOT_USER`, `MINIO_ROOT_PASSWORD`.
//! The bucket manager additionally requires `MINIO_BUCKETS`.
//! Everything else has a default.

use crate::constants::{
    DEFAULT_ACCESS_KEY_NAME, DEFAULT_ALIAS, DEFAULT_LOG_LEVEL, DEFAULT_MC_BINARY,
    ENV_ACCESS_KEY_NAME, ENV_ALIAS, ENV_BUCKETS, ENV_ENDPOINT, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
    ENV_MC_PATH, ENV_ROOT_PASSWORD, ENV_ROOT_USER,
};
use crate::error::AdminError;
use crate::logging::LogFormat;
use tracing::debug;
use zeroize::Zeroizing;

/// Connection and tooling settings shared by both managers
///
/// Read-only after construction.
#[derive(Clone)]
pub struct Settings {
    /// Cluster endpoint as configured, scheme included when given
    pub endpoint: String,
    pub root_user: String,
    pub root_password: Zeroizing<String>,
    /// mc alias bound to the endpoint
    pub alias: String,
    /// Name given to access keys created without one
    pub access_key_fallback_name: String,
    /// mc binary name or path
    pub mc_binary: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("endpoint", &self.endpoint)
            .field("root_user", &self.root_user)
            .field("root_password", &"***")
            .field("alias", &self.alias)
            .field("access_key_fallback_name", &self.access_key_fallback_name)
            .field("mc_binary", &self.mc_binary)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Settings {
    /// Load settings from `.env` and the process environment
    pub fn from_env() -> Result<Self, AdminError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable lookup
    ///
    /// Values are trimmed and empty values count as unset. All missing
    /// required variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = non_empty(&lookup, ENV_ENDPOINT);
        let root_user = non_empty(&lookup, ENV_ROOT_USER);
        let root_password = non_empty(&lookup, ENV_ROOT_PASSWORD);

        let (Some(endpoint), Some(root_user), Some(root_password)) =
            (endpoint.clone(), root_user.clone(), root_password.clone())
        else {
            let missing: Vec<&str> = [
                (ENV_ENDPOINT, endpoint.is_none()),
                (ENV_ROOT_USER, root_user.is_none()),
                (ENV_ROOT_PASSWORD, root_password.is_none()),
            ]
            .into_iter()
            .filter_map(|(key, is_missing)| is_missing.then_some(key))
            .collect();
            return Err(AdminError::Configuration(format!(
                "required environment variables are not set: {}",
                missing.join(", ")
            )));
        };

        let log_format = match non_empty(&lookup, ENV_LOG_FORMAT) {
            Some(raw) => raw.parse::<LogFormat>().map_err(AdminError::Configuration)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            endpoint,
            root_user,
            root_password: Zeroizing::new(root_password),
            alias: non_empty(&lookup, ENV_ALIAS).unwrap_or_else(|| DEFAULT_ALIAS.to_string()),
            access_key_fallback_name: non_empty(&lookup, ENV_ACCESS_KEY_NAME)
                .unwrap_or_else(|| DEFAULT_ACCESS_KEY_NAME.to_string()),
            mc_binary: non_empty(&lookup, ENV_MC_PATH)
                .unwrap_or_else(|| DEFAULT_MC_BINARY.to_string()),
            log_level: non_empty(&lookup, ENV_LOG_LEVEL)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_format,
        })
    }
}

/// Settings for the bucket manager: connection settings plus the declared bucket list
#[derive(Debug, Clone)]
pub struct BucketSettings {
    pub settings: Settings,
    /// Desired buckets, in declared order
    pub buckets: Vec<String>,
}

impl BucketSettings {
    /// Load settings from `.env` and the process environment
    pub fn from_env() -> Result<Self, AdminError> {
        load_dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build bucket settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = Settings::from_lookup(&lookup)?;
        let buckets = parse_bucket_list(&lookup(ENV_BUCKETS).unwrap_or_default());
        if buckets.is_empty() {
            return Err(AdminError::Configuration(format!(
                "{ENV_BUCKETS} is not set or contains no bucket names"
            )));
        }
        Ok(Self { settings, buckets })
    }
}

/// Split a comma-separated bucket list, trimming entries and dropping empty ones
#[must_use]
pub fn parse_bucket_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn load_dotenv() {
    if let Err(e) = dotenv::dotenv() {
        debug!("No .env file loaded: {}", e);
    }
}

/// Read a variable, trimmed, treating empty as unset
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
