//! Input normalization shared by the request payloads

use crate::{CoreError, CoreResult};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

static NATIONAL_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]{0,31}$").expect("national id pattern is valid")
});

/// Trimmed value of a mandatory text field.
pub fn required(field: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text collapses to `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lowercased, trimmed email address.
pub fn email(value: &str) -> CoreResult<String> {
    let normalized = value.trim().to_lowercase();
    if !EMAIL.is_match(&normalized) {
        return Err(CoreError::validation(format!(
            "'{}' is not a valid email address",
            value.trim()
        )));
    }
    Ok(normalized)
}

pub fn password(value: &str) -> CoreResult<String> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(value.to_string())
}

pub fn national_id(value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if !NATIONAL_ID.is_match(trimmed) {
        return Err(CoreError::validation(format!(
            "'{}' is not a valid national id",
            trimmed
        )));
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("title", "  x ").unwrap(), "x");
        assert!(required("title", "   ").is_err());
    }

    #[test]
    fn test_optional() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" a ".into())), Some("a".into()));
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_email() {
        assert_eq!(email(" Admin@Example.COM ").unwrap(), "admin@example.com");
        assert!(email("not-an-email").is_err());
        assert!(email("a b@c.d").is_err());
    }

    #[test]
    fn test_password() {
        assert!(password("12345").is_err());
        assert!(password("123456").is_ok());
    }

    #[test]
    fn test_national_id() {
        assert_eq!(national_id(" gha-001 ").unwrap(), "GHA-001");
        assert!(national_id("has space").is_err());
        assert!(national_id("").is_err());
    }
}
