//! # Display
//!
//! Plain-text tables for the CLI. Kept apart from the reconcilers: every
//! function here takes already-fetched records and returns a `String`.

pub mod access_keys;
pub mod buckets;

/// Cut `value` to `keep` characters plus `...` when it is longer than `max`
pub(crate) fn truncate(value: &str, max: usize, keep: usize) -> String {
    if value.chars().count() > max {
        let mut cut: String = value.chars().take(keep).collect();
        cut.push_str("...");
        cut
    } else {
        value.to_string()
    }
}

/// `1234567` -> `1,234,567`
pub(crate) fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
