//! # Types
//!
//! Records parsed from `mc` output and the outcomes of reconciler operations.

use crate::constants::{FOLDER_ENTRY_TYPE, MC_STATUS_SUCCESS};
use crate::error::AdminError;
use serde::Deserialize;
use zeroize::Zeroizing;

/// A bucket as reported by `mc ls <alias>/ --json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
    /// Opaque timestamp string from the listing
    pub last_modified: Option<String>,
    pub size_bytes: u64,
}

/// Raw `mc ls --json` record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListEntry {
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

impl ListEntry {
    /// Buckets appear as folder entries at the alias root
    pub(crate) fn into_bucket(self) -> Option<Bucket> {
        if self.entry_type.as_deref() != Some(FOLDER_ENTRY_TYPE) {
            return None;
        }
        Some(Bucket {
            name: self.key.trim_end_matches('/').to_string(),
            last_modified: self.last_modified,
            size_bytes: self.size.unwrap_or(0),
        })
    }
}

/// Result of a single create call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// Already existed; no mutating call was made
    AlreadyPresent,
}

/// Result of a single delete call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Did not exist; no mutating call was made
    AlreadyAbsent,
}

/// Per-bucket results of creating the declared set
#[derive(Debug)]
pub struct BatchReport {
    /// One entry per declared bucket, in declared order
    pub results: Vec<(String, Result<CreateOutcome, AdminError>)>,
}

impl BatchReport {
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_ok()).count()
    }

    /// Whether every declared bucket now exists
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.succeeded() == self.total()
    }

    /// Buckets whose creation failed, with the error
    pub fn failures(&self) -> impl Iterator<Item = (&str, &AdminError)> {
        self.results
            .iter()
            .filter_map(|(name, r)| r.as_ref().err().map(|e| (name.as_str(), e)))
    }
}

/// Existence of one declared bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketStatus {
    pub name: String,
    pub exists: bool,
}

/// Raw `mc admin user svcacct list --json` record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AccessKeyListEntry {
    #[serde(default)]
    pub access_key: Option<String>,
}

/// A service access key: the listed identifier plus the detail fetched for it
#[derive(Debug, Clone, PartialEq)]
pub struct AccessKey {
    pub access_key: String,
    /// `None` when the per-key `svcacct info` call failed
    pub detail: Option<AccessKeyDetail>,
}

impl AccessKey {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.detail.as_ref().and_then(|d| d.name.as_deref())
    }

    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.detail.as_ref().and_then(AccessKeyDetail::status)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.detail.as_ref().and_then(|d| d.description.as_deref())
    }
}

/// `mc admin user svcacct info --json` output
///
/// Field values are owned by the cluster and are not validated.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyDetail {
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub parent_user: Option<String>,
    #[serde(default, alias = "Name")]
    pub name: Option<String>,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(default)]
    pub account_status: Option<String>,
    /// Envelope status of the `--json` record (usually `success`)
    #[serde(default, rename = "status")]
    pub record_status: Option<String>,
    #[serde(default)]
    pub policy: Option<serde_json::Value>,
    #[serde(default)]
    pub expiration: Option<String>,
}

impl AccessKeyDetail {
    /// Account status, falling back to the record status when it carries
    /// something other than the `success` envelope marker
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.account_status.as_deref().or_else(|| {
            self.record_status
                .as_deref()
                .filter(|s| *s != MC_STATUS_SUCCESS)
        })
    }
}

/// Request to create a service access key
#[derive(Debug, Clone, Default)]
pub struct NewAccessKey {
    pub access_key: Option<String>,
    pub secret_key: Option<Zeroizing<String>>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Credentials returned by `svcacct add`
///
/// The secret key is only ever available here.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccessKey {
    pub access_key: String,
    pub secret_key: Zeroizing<String>,
    #[serde(default)]
    pub expiration: Option<String>,
}

impl std::fmt::Debug for CreatedAccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedAccessKey")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_entry_folder_becomes_bucket() {
        let entry: ListEntry = serde_json::from_str(
            r#"{"status":"success","type":"folder","lastModified":"2024-05-01T10:00:00Z","size":0,"key":"logs/","etag":"","url":"http://localhost:9000/","versionOrdinal":1}"#,
        )
        .unwrap();
        assert_eq!(
            entry.into_bucket(),
            Some(Bucket {
                name: "logs".to_string(),
                last_modified: Some("2024-05-01T10:00:00Z".to_string()),
                size_bytes: 0,
            })
        );
    }

    #[test]
    fn test_list_entry_file_is_ignored() {
        let entry: ListEntry =
            serde_json::from_str(r#"{"type":"file","key":"readme.txt","size":12}"#).unwrap();
        assert!(entry.into_bucket().is_none());
    }

    #[test]
    fn test_list_entry_missing_size_defaults_to_zero() {
        let entry: ListEntry = serde_json::from_str(r#"{"type":"folder","key":"assets/"}"#).unwrap();
        let bucket = entry.into_bucket().unwrap();
        assert_eq!(bucket.size_bytes, 0);
        assert!(bucket.last_modified.is_none());
    }

    #[test]
    fn test_detail_status_prefers_account_status() {
        let detail: AccessKeyDetail = serde_json::from_str(
            r#"{"status":"success","accessKey":"K1","parentUser":"admin","accountStatus":"on","name":"ci","description":"pipeline","policy":{"Version":"2012-10-17"},"expiration":"1970-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(detail.status(), Some("on"));
        assert_eq!(detail.name.as_deref(), Some("ci"));
        assert!(detail.policy.is_some());
    }

    #[test]
    fn test_detail_status_ignores_success_envelope() {
        let detail: AccessKeyDetail = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(detail.status(), None);

        let detail: AccessKeyDetail = serde_json::from_str(r#"{"status":"off"}"#).unwrap();
        assert_eq!(detail.status(), Some("off"));
    }

    #[test]
    fn test_detail_accepts_capitalized_fields() {
        let detail: AccessKeyDetail =
            serde_json::from_str(r#"{"Name":"legacy","Description":"old mc"}"#).unwrap();
        assert_eq!(detail.name.as_deref(), Some("legacy"));
        assert_eq!(detail.description.as_deref(), Some("old mc"));
    }

    #[test]
    fn test_created_access_key_debug_hides_secret() {
        let created: CreatedAccessKey = serde_json::from_str(
            r#"{"status":"success","accessKey":"K1","secretKey":"S3CR3T"}"#,
        )
        .unwrap();
        assert_eq!(created.secret_key.as_str(), "S3CR3T");
        assert!(!format!("{created:?}").contains("S3CR3T"));
    }

    #[test]
    fn test_batch_report_counts() {
        let report = BatchReport {
            results: vec![
                ("a".to_string(), Ok(CreateOutcome::Created)),
                (
                    "b".to_string(),
                    Err(AdminError::ExternalTool {
                        command: "mc mb myminio/b".to_string(),
                        code: Some(1),
                        stderr: "denied".to_string(),
                    }),
                ),
            ],
        };
        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded(), 1);
        assert!(!report.is_complete());
        assert_eq!(report.failures().map(|(n, _)| n).collect::<Vec<_>>(), ["b"]);
    }
}
