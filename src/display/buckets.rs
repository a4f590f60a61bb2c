//! Bucket tables.

use super::{thousands, truncate};
use crate::reconciler::{Bucket, BucketStatus};
use std::fmt::Write;

/// Table of buckets, or a notice when there are none
#[must_use]
pub fn bucket_table(buckets: &[Bucket]) -> String {
    if buckets.is_empty() {
        return "📭 No buckets found\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "\n📋 Buckets (total: {})", buckets.len());
    let _ = writeln!(out, "{}", "=".repeat(80));
    let _ = writeln!(out, "{:<30} {:<25} {:<15}", "BUCKET", "LAST MODIFIED", "SIZE");
    let _ = writeln!(out, "{}", "-".repeat(80));

    for bucket in buckets {
        let name = truncate(&bucket.name, 30, 28);
        let last_modified = bucket
            .last_modified
            .as_deref()
            .filter(|s| !s.is_empty())
            .map_or_else(|| "N/A".to_string(), |s| s.chars().take(24).collect());
        let size = format!("{} bytes", thousands(bucket.size_bytes));
        let _ = writeln!(out, "{name:<30} {last_modified:<25} {size:<15}");
    }

    let _ = writeln!(out, "{}", "=".repeat(80));
    out
}

/// Existence of each declared bucket
#[must_use]
pub fn status_table(statuses: &[BucketStatus]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n🎯 Declared bucket status");
    let _ = writeln!(out, "{}", "=".repeat(60));
    for status in statuses {
        let state = if status.exists { "✅ exists" } else { "❌ missing" };
        let _ = writeln!(out, "{:<30} {}", status.name, state);
    }
    let _ = writeln!(out, "{}", "=".repeat(60));
    out
}
