//! # Bucket Name Validation
//!
//! Checks bucket names against the MinIO naming rules before any mutating
//! call is attempted.
//!
//! Rules are applied in order and the first failure is reported:
//! 1. Length between 3 and 63 characters
//! 2. Only lowercase ASCII letters, digits, hyphens and periods
//! 3. No leading or trailing period

use crate::constants::{MAX_BUCKET_NAME_LEN, MIN_BUCKET_NAME_LEN};
use thiserror::Error;

/// Naming rule a bucket name failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BucketNameError {
    #[error(
        "bucket name '{name}' must be {min}-{max} characters long (got {len})",
        min = MIN_BUCKET_NAME_LEN,
        max = MAX_BUCKET_NAME_LEN
    )]
    Length { name: String, len: usize },

    #[error("bucket name '{name}' may only contain lowercase letters, digits, hyphens and periods")]
    InvalidCharacters { name: String },

    #[error("bucket name '{name}' cannot start or end with a period")]
    PeriodBoundary { name: String },
}

/// Validate a bucket name, reporting the first rule it breaks
pub fn validate_bucket_name(name: &str) -> Result<(), BucketNameError> {
    let len = name.chars().count();
    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(BucketNameError::Length {
            name: name.to_string(),
            len,
        });
    }

    if !name.chars().all(is_bucket_name_char) {
        return Err(BucketNameError::InvalidCharacters {
            name: name.to_string(),
        });
    }

    if name.starts_with('.') || name.ends_with('.') {
        return Err(BucketNameError::PeriodBoundary {
            name: name.to_string(),
        });
    }

    Ok(())
}

/// Boolean form of [`validate_bucket_name`]
#[must_use]
pub fn is_valid_bucket_name(name: &str) -> bool {
    validate_bucket_name(name).is_ok()
}

fn is_bucket_name_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '.' | '-')
}
