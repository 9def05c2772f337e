//! Filename derivation and path validation.
//!
//! Remote file names are derived from free text typed by a user, so they
//! go through [`sanitize_filename`] before they reach the upload API.
//! Local file names come from configuration and are checked with
//! [`validate_file_name`] so they can never escape their base directory.

use std::path::{Component, Path};

use anyhow::{bail, Result};
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::constants::{FALLBACK_FILE_STEM, MAX_FILE_STEM_LEN};

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Sanitizes arbitrary text into a bounded, filesystem-safe file stem.
///
/// Diacritics are stripped (NFD, drop combining marks, NFC), each run of
/// whitespace becomes a single `_`, and every character outside
/// `[A-Za-z0-9._-]` is removed. The result is truncated to
/// [`MAX_FILE_STEM_LEN`] characters.
///
/// Never fails: blank input, or input with nothing left after stripping,
/// yields [`FALLBACK_FILE_STEM`].
///
/// # Example
///
/// ```
/// use report_uploader::security::path_validator::sanitize_filename;
///
/// assert_eq!(sanitize_filename("café!!! déjà-vu"), "cafe_deja-vu");
/// assert_eq!(sanitize_filename("   "), "report");
/// ```
pub fn sanitize_filename(input: &str) -> String {
    if input.trim().is_empty() {
        return FALLBACK_FILE_STEM.to_string();
    }

    let stripped: String = input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect();

    let underscored = WHITESPACE_RUN.replace_all(&stripped, "_");

    let mut sanitized: String = underscored
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    if sanitized.is_empty() {
        return FALLBACK_FILE_STEM.to_string();
    }

    // Only ASCII survives the filter, so a byte offset is a char boundary
    sanitized.truncate(MAX_FILE_STEM_LEN);
    sanitized
}

/// Validates that a configured file name is a single plain path component.
///
/// Rejects empty names, separators, `..`, absolute paths and null bytes so
/// joining the name onto a base directory always stays inside it.
pub fn validate_file_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("File name is empty");
    }

    if name.contains('\0') {
        bail!("File name contains null bytes: {:?}", name);
    }

    if name.contains('/') || name.contains('\\') {
        bail!("File name must not contain path separators: {}", name);
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => bail!("File name is not a plain path component: {}", name),
    }
}
