//! Access key tables.

use super::truncate;
use crate::reconciler::{AccessKey, CreatedAccessKey};
use std::fmt::Write;

/// Numbered table of access keys, or a notice when there are none
#[must_use]
pub fn access_key_table(keys: &[AccessKey]) -> String {
    if keys.is_empty() {
        return "📋 No access keys found\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "\n📋 Access keys (total: {})", keys.len());
    let _ = writeln!(out, "{}", "=".repeat(90));
    let _ = writeln!(
        out,
        "{:<4} {:<25} {:<25} {:<12} {:<20}",
        "NO.", "ACCESS KEY", "NAME", "STATUS", "DESCRIPTION"
    );
    let _ = writeln!(out, "{}", "-".repeat(90));

    for (i, key) in keys.iter().enumerate() {
        let access_key = truncate(&key.access_key, 25, 23);
        let name = truncate(key.name().unwrap_or("No name"), 25, 23);
        let status = key.status().unwrap_or("N/A");
        let description = truncate(key.description().unwrap_or(""), 20, 18);
        let _ = writeln!(
            out,
            "{:<4} {access_key:<25} {name:<25} {status:<12} {description:<20}",
            i + 1
        );
    }

    let _ = writeln!(out, "{}", "=".repeat(90));
    out
}

/// Detail block for one access key
#[must_use]
pub fn access_key_detail(key: &AccessKey) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n🔑 Access key detail");
    let _ = writeln!(out, "{}", "=".repeat(60));
    let _ = writeln!(out, "Access Key:  {}", key.access_key);
    let _ = writeln!(out, "Name:        {}", key.name().unwrap_or("No name"));
    let _ = writeln!(out, "Status:      {}", key.status().unwrap_or("N/A"));
    let _ = writeln!(
        out,
        "Description: {}",
        key.description().unwrap_or("No description")
    );

    if let Some(detail) = &key.detail {
        if let Some(expiration) = &detail.expiration {
            let _ = writeln!(out, "Expiration:  {expiration}");
        }
        if let Some(policy) = &detail.policy {
            let _ = writeln!(out, "Policy:      {policy}");
        }
    }

    let _ = writeln!(out, "{}", "=".repeat(60));
    out
}

/// Credentials of a newly created key; the secret key is shown only here
#[must_use]
pub fn created_access_key(created: &CreatedAccessKey, name: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✅ Access key created");
    let _ = writeln!(out, "   Access Key: {}", created.access_key);
    let _ = writeln!(out, "   Secret Key: {}", created.secret_key.as_str());
    if let Some(name) = name {
        let _ = writeln!(out, "   Name: {name}");
    }
    out
}
