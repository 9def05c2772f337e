//! Credential scrubbing utilities for preventing token exposure.
//!
//! Response bodies and transport errors from the storage API are logged
//! when an upload fails. This module removes bearer tokens and similar
//! secrets from those strings before they reach the log.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex patterns for detecting various types of credentials
    static ref CREDENTIAL_PATTERNS: Vec<(Regex, &'static str)> = vec![
        // Bearer tokens
        (Regex::new(r"(?i)(bearer|authorization)\s*[:=]?\s*(bearer\s+)?([A-Za-z0-9\-._~+/]{8,}=*)").unwrap(),
         "$1=<REDACTED_TOKEN>"),

        // Short-lived storage API access tokens
        (Regex::new(r"\bsl\.[A-Za-z0-9\-_]{20,}").unwrap(),
         "<REDACTED_TOKEN>"),

        // Generic tokens
        (Regex::new(r"(?i)(token|access[_-]?token|auth[_-]?token)\s*[:=]\s*([A-Za-z0-9\-._~+/]{20,})").unwrap(),
         "$1=<REDACTED_TOKEN>"),

        // Basic auth in URLs
        (Regex::new(r"(https?://)([^:/\s]+):([^@\s]+)@").unwrap(),
         "$1<REDACTED_USER>:<REDACTED_PASS>@"),
    ];
}

/// Scrub credentials from a string.
///
/// # Example
///
/// ```
/// use report_uploader::security::credential_scrubber::scrub_credentials;
///
/// let input = "request failed: Authorization: Bearer abcdefgh12345678";
/// assert_eq!(scrub_credentials(input), "request failed: Authorization=<REDACTED_TOKEN>");
/// ```
pub fn scrub_credentials(input: &str) -> String {
    let mut result = input.to_string();

    for (pattern, replacement) in CREDENTIAL_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }

    result
}

/// Scrub a known secret and any recognizable credential from a string.
///
/// The exact secret is removed first so that tokens with an unusual shape
/// are still hidden.
pub fn scrub_secret(input: &str, secret: &str) -> String {
    let without_secret = if secret.is_empty() {
        input.to_string()
    } else {
        input.replace(secret, "<REDACTED_TOKEN>")
    };

    scrub_credentials(&without_secret)
}

/// Create a safe error message that scrubs credentials.
pub fn safe_error_message(context: &str, error: &impl std::fmt::Display) -> String {
    let raw_message = format!("{}: {}", context, error);
    scrub_credentials(&raw_message)
}
