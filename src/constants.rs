//! Global constants for report-uploader.
//!
//! This module centralizes hardcoded values (file names, endpoints, limits)
//! so the configuration defaults and the pipeline agree on them.

// Naming constants
/// Fallback name used when a summary sanitizes to nothing
pub const FALLBACK_FILE_STEM: &str = "report";

/// Maximum length of a sanitized file stem
pub const MAX_FILE_STEM_LEN: usize = 50;

/// Extension of the uploaded archive
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Date format of the per-day remote folder
pub const REMOTE_FOLDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Separator between the summary and the detail in the report file
pub const REPORT_SEPARATOR: &str = "\n\n";

// Default file names
pub const DEFAULT_APP_NAME: &str = "report-uploader";
pub const DEFAULT_REPORT_FILE_NAME: &str = "report.txt";
pub const DEFAULT_ARCHIVE_FILE_NAME: &str = "report.zip";
pub const DEFAULT_WORKING_DIR_NAME: &str = "report_bundle";
pub const DEFAULT_CURRENT_LOG_NAME: &str = "current.log";
pub const DEFAULT_PREVIOUS_LOG_NAME: &str = "previous.log";

// Compression constants
/// Chunk size for compression operations (512KB)
pub const COMPRESSION_CHUNK_SIZE: usize = 512 * 1024;

/// Large file threshold for compression decisions (100MB)
pub const LARGE_FILE_COMPRESSION_THRESHOLD: u64 = 100 * 1024 * 1024;

pub const COMPRESSED_EXTENSIONS: &[&str] = &[
    "zip", "gz", "xz", "bz2", "7z", "rar", "jpg", "jpeg", "png", "gif", "mp3", "mp4", "avi", "mov",
    "mpg", "mpeg",
];

// Remote API constants
pub const DEFAULT_CREATE_FOLDER_ENDPOINT: &str = "https://api.dropboxapi.com/2/files/create_folder_v2";
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://content.dropboxapi.com/2/files/upload";

/// Header carrying the JSON upload arguments
pub const API_ARG_HEADER: &str = "Dropbox-API-Arg";

/// Write mode for uploads; "add" never overwrites an existing file
pub const UPLOAD_MODE_ADD: &str = "add";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Environment variable holding the bearer token
pub const TOKEN_ENV_VAR: &str = "REPORT_UPLOADER_TOKEN";

// Error messages
pub const ERROR_FAILED_TO_WRITE_FILE: &str = "Failed to write file";
pub const ERROR_FAILED_TO_READ_FILE: &str = "Failed to read file";
pub const ERROR_FAILED_TO_COMPRESS: &str = "Failed to compress file";
