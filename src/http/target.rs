use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::outcome::ProbeError;

/// Dotted hostname with an alphabetic TLD of at least two letters. IP
/// literals and single-label hosts do not match.
const TARGET_PATTERN: &str = r"^https?://(?:[a-z0-9-]+\.)+[a-z]{2,}/?";

static TARGET_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(TARGET_PATTERN).ok());

/// Checks that `target` is an absolute `http`/`https` URL with a dotted
/// hostname.
///
/// # Errors
///
/// Returns [`ProbeError::Validation`] when any check fails.
pub fn validate_target(target: &str) -> Result<Url, ProbeError> {
    let parsed = Url::parse(target).map_err(|_err| ProbeError::Validation)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ProbeError::Validation);
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ProbeError::Validation);
    }
    let matches_pattern = TARGET_REGEX
        .as_ref()
        .is_some_and(|regex| regex.is_match(target));
    if !matches_pattern {
        return Err(ProbeError::Validation);
    }
    Ok(parsed)
}

#[must_use]
pub fn is_valid_target(target: &str) -> bool {
    validate_target(target).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_http_and_https() -> Result<(), String> {
        for target in [
            "http://example.com",
            "https://example.com/",
            "http://sub.example.co.uk/path?q=1",
            "http://probe.test:8080/status/404",
            "https://my-host.example.org",
        ] {
            if !is_valid_target(target) {
                return Err(format!("Expected '{}' to be accepted", target));
            }
        }
        Ok(())
    }

    #[test]
    fn rejects_malformed_and_foreign_schemes() -> Result<(), String> {
        for target in [
            "not-a-url",
            "",
            "ftp://example.com",
            "file:///etc/passwd",
            "http://",
            "http://localhost",
            "http://127.0.0.1",
            "http://127.0.0.1:8080/",
            "http://[::1]/",
            "http://example.c",
            "HTTP://EXAMPLE.COM",
        ] {
            if is_valid_target(target) {
                return Err(format!("Expected '{}' to be rejected", target));
            }
        }
        Ok(())
    }

    #[test]
    fn rejection_is_a_validation_error() -> Result<(), String> {
        match validate_target("ftp://example.com") {
            Err(ProbeError::Validation) => Ok(()),
            Err(other) => Err(format!("Unexpected error: {}", other)),
            Ok(url) => Err(format!("Unexpected success: {}", url)),
        }
    }
}
