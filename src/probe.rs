//! # Connectivity Probe
//!
//! Verifies the cluster is reachable and the root credentials are accepted
//! by issuing a single S3 `ListBuckets` call.
//!
//! The probe never fails with an error: every problem (bad endpoint,
//! network, authentication) is logged and reported as `false`. Exactly one
//! request is sent; the SDK's retry policy is disabled.

use crate::config::Settings;
use crate::constants::PROBE_REGION;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use tracing::{debug, error, info};

/// Endpoint split into host:port and transport security
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// `host[:port]` with any scheme removed
    pub host_port: String,
    /// `true` only when the configured endpoint used `https://`
    pub secure: bool,
}

impl Endpoint {
    /// Parse an endpoint such as `http://localhost:9000`, `https://s3.example.com`
    /// or `minio:9000`. Returns `None` when no host remains.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (rest, secure) = if let Some(rest) = raw.strip_prefix("https://") {
            (rest, true)
        } else if let Some(rest) = raw.strip_prefix("http://") {
            (rest, false)
        } else {
            (raw, false)
        };

        let host_port = rest.trim_end_matches('/');
        if host_port.is_empty() || host_port.contains('/') {
            return None;
        }

        Some(Self {
            host_port: host_port.to_string(),
            secure,
        })
    }

    /// URL handed to the S3 client
    #[must_use]
    pub fn url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.host_port)
    }
}

/// Trait for cluster health checks (allows stubbing in tests)
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn check(&self, settings: &Settings) -> bool;
}

/// Probe backed by the AWS S3 SDK
#[derive(Debug, Clone, Copy, Default)]
pub struct S3Probe;

#[async_trait]
impl ConnectivityProbe for S3Probe {
    async fn check(&self, settings: &Settings) -> bool {
        let Some(endpoint) = Endpoint::parse(&settings.endpoint) else {
            error!("❌ MinIO connectivity check failed - malformed endpoint '{}'", settings.endpoint);
            return false;
        };

        debug!(
            "Probing {} (secure: {}) with ListBuckets",
            endpoint.host_port, endpoint.secure
        );

        let client = s3_client(&endpoint, settings).await;
        match client.list_buckets().send().await {
            Ok(output) => {
                info!(
                    "✅ MinIO connectivity check passed ({} buckets visible)",
                    output.buckets().len()
                );
                true
            }
            Err(e) => {
                error!(
                    "❌ MinIO connectivity check failed: {}",
                    aws_sdk_s3::error::DisplayErrorContext(&e)
                );
                false
            }
        }
    }
}

/// Build an S3 client for the endpoint using the root credentials
async fn s3_client(endpoint: &Endpoint, settings: &Settings) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        settings.root_user.clone(),
        settings.root_password.as_str(),
        None,
        None,
        "minio-root",
    );

    let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(PROBE_REGION))
        .endpoint_url(endpoint.url())
        .credentials_provider(credentials)
        .retry_config(aws_config::retry::RetryConfig::disabled())
        .load()
        .await;

    // MinIO serves buckets path-style
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(s3_config)
}
