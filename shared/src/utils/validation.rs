//! Validation utilities for credentials and user input

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email shape check: one `@`, a non-empty local part, and a dotted
/// domain. Full RFC 5322 parsing is deliberately out of scope.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email regex must compile")
});

/// Normalize an email address for storage and comparison.
///
/// Emails compare case-insensitively; we normalize once at the boundary so
/// every lookup is a plain equality probe.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check whether a string looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Validate a password against the registration policy.
///
/// Returns every violated rule so callers can report them all at once,
/// mirroring how identity frameworks aggregate policy errors.
pub fn validate_password(password: &str) -> Vec<String> {
    let mut reasons = Vec::new();

    if password.len() < 8 {
        reasons.push("Password must be at least 8 characters long".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        reasons.push("Password must contain at least one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        reasons.push("Password must contain at least one lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        reasons.push("Password must contain at least one digit".to_string());
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        reasons.push("Password must contain at least one non-alphanumeric character".to_string());
    }

    reasons
}

/// Common validation functions
pub mod validators {
    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.len();
        len >= min && len <= max
    }
}
