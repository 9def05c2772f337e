//! Utility functions for report packaging.
//!
//! ## Components
//!
//! - **Compression**: deterministic ZIP archive creation from a directory
//! - **Hashing**: SHA-256 digests of archive bytes
//!
//! ### Creating a ZIP Archive
//!
//! ```no_run
//! use report_uploader::utils::compress::compress_directory;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let zip_path = compress_directory(Path::new("/tmp/report_bundle"), Path::new("/tmp/report.zip"))?;
//! println!("Created archive: {}", zip_path.display());
//! # Ok(())
//! # }
//! ```

/// File compression and ZIP archive creation
pub mod compress;

/// Cryptographic hash calculation utilities
pub mod hash;
