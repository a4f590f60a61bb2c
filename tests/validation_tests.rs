//! # Bucket Name Validation Tests
//!
//! Exercises the naming rules through the public API: length, character set
//! and period placement, plus how violations surface as [`AdminError`].

use minio_reconciler::validation::{is_valid_bucket_name, validate_bucket_name, BucketNameError};
use minio_reconciler::AdminError;

#[test]
fn test_valid_bucket_names() {
    let max_name = "a".repeat(63);
    let valid_names = vec![
        "abc",
        "logs",
        "my-bucket",
        "my.bucket",
        "bucket-2024.archive",
        "123",
        "a-b",
        "a..b",
        "a.-b",
        &max_name,
    ];

    for name in valid_names {
        assert!(
            validate_bucket_name(name).is_ok(),
            "Expected '{name}' to be valid"
        );
        assert!(is_valid_bucket_name(name));
    }
}

#[test]
fn test_invalid_length() {
    let too_long = "a".repeat(64);
    for name in ["", "a", "ab", too_long.as_str()] {
        match validate_bucket_name(name) {
            Err(BucketNameError::Length { len, .. }) => assert_eq!(len, name.chars().count()),
            other => panic!("Expected a length error for '{name}', got {other:?}"),
        }
    }
}

#[test]
fn test_invalid_characters() {
    let invalid_names = vec![
        "MyBucket",
        "my_bucket",
        "my bucket",
        "bucket!",
        "bücket",
        "bucket/name",
    ];

    for name in invalid_names {
        assert!(
            matches!(
                validate_bucket_name(name),
                Err(BucketNameError::InvalidCharacters { .. })
            ),
            "Expected '{name}' to be rejected for its characters"
        );
        assert!(!is_valid_bucket_name(name));
    }
}

#[test]
fn test_leading_or_trailing_period() {
    for name in [".logs", "logs.", ".a.", "..."] {
        assert!(
            matches!(
                validate_bucket_name(name),
                Err(BucketNameError::PeriodBoundary { .. })
            ),
            "Expected '{name}' to be rejected for its periods"
        );
    }
}

#[test]
fn test_hyphen_boundaries_are_allowed() {
    assert!(is_valid_bucket_name("-logs"));
    assert!(is_valid_bucket_name("logs-"));
}

#[test]
fn test_validation_error_converts_to_admin_error() {
    let err: AdminError = validate_bucket_name("Bad_Name").unwrap_err().into();
    assert!(matches!(err, AdminError::Validation(_)));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("Bad_Name"));
}
