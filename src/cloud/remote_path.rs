use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};

use crate::constants::{ARCHIVE_EXTENSION, REMOTE_FOLDER_DATE_FORMAT};
use crate::models::RemoteTarget;
use crate::security::path_validator::sanitize_filename;

/// Derive the remote folder and file for a submission.
///
/// The folder is one per calendar day of `now` (in its own time zone); the
/// file name is the sanitized summary with a `.zip` extension.
///
/// # Example
///
/// ```
/// use chrono::{Local, TimeZone};
/// use report_uploader::cloud::remote_path::plan;
///
/// let now = Local.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
/// let target = plan(&now, "Crash on load");
/// assert_eq!(target.folder, "/2025-01-15");
/// assert_eq!(target.file, "/2025-01-15/Crash_on_load.zip");
/// ```
pub fn plan<Tz>(now: &DateTime<Tz>, summary: &str) -> RemoteTarget
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let folder = format!("/{}", now.format(REMOTE_FOLDER_DATE_FORMAT));
    let file = format!("{}/{}.{}", folder, sanitize_filename(summary), ARCHIVE_EXTENSION);

    RemoteTarget { folder, file }
}

/// [`plan`] against the local clock
pub fn plan_now(summary: &str) -> RemoteTarget {
    plan(&Local::now(), summary)
}
