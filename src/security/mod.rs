//! Security utilities and validation functions.
//!
//! This module provides:
//! - Filename sanitizing for names derived from user text
//! - Validation of configured file names
//! - Credential scrubbing to keep bearer tokens out of logs

pub mod credential_scrubber;
pub mod path_validator;

pub use credential_scrubber::{safe_error_message, scrub_credentials, scrub_secret};
pub use path_validator::{sanitize_filename, validate_file_name};
