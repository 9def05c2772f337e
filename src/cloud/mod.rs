//! Cloud storage upload for report archives.
//!
//! A submission makes exactly two calls against the storage HTTP API, in
//! order, with no retries:
//!
//! ```text
//!   plan(now, summary)
//!          │
//!   ┌──────▼───────┐   409 / failure tolerated
//!   │ ensure-folder│──────────────┐
//!   └──────┬───────┘              │
//!          │◀─────────────────────┘
//!   ┌──────▼───────┐
//!   │ upload-file  │  mode "add", autorename on
//!   └──────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use tokio_util::sync::CancellationToken;
//! use report_uploader::cloud::dropbox::UploadClient;
//! use report_uploader::cloud::remote_path::plan_now;
//! use report_uploader::config::ApiConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = UploadClient::new(ApiConfig::default())?;
//! let target = plan_now("Crash on load");
//! let archive = Bytes::from(std::fs::read("/tmp/report.zip")?);
//!
//! let receipt = client
//!     .upload("ACCESS_TOKEN", &target, archive, &CancellationToken::new())
//!     .await?;
//! println!("Stored as {}", receipt.stored_path);
//! # Ok(())
//! # }
//! ```

/// HTTP client construction for the storage API
pub mod client;

/// Ensure-folder and upload calls
pub mod dropbox;

/// Upload failure taxonomy
pub mod error;

/// Date-partitioned remote naming
pub mod remote_path;

pub use dropbox::{FolderStatus, UploadClient, UploadReceipt};
pub use error::UploadError;
