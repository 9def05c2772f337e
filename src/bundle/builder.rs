use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use log::{debug, info, warn};

use crate::config::SubmissionConfig;
use crate::constants::{ERROR_FAILED_TO_READ_FILE, ERROR_FAILED_TO_WRITE_FILE};
use crate::models::Report;
use crate::utils::compress::compress_directory;

/// Builds the report archive for one submission.
///
/// All locations come from the [`SubmissionConfig`] handed to
/// [`ArchiveBuilder::new`]; nothing is shared between builders.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    config: SubmissionConfig,
}

impl ArchiveBuilder {
    pub fn new(config: SubmissionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    /// Write the report text file, replacing any previous one.
    ///
    /// The file content is `summary + "\n\n" + detail`.
    pub fn write_report(&self, report: &Report) -> Result<PathBuf> {
        let path = self.config.report_path();
        ensure_parent(&path)?;

        fs::write(&path, report.contents())
            .context(format!("{} {}", ERROR_FAILED_TO_WRITE_FILE, path.display()))?;

        debug!("Wrote report to {}", path.display());
        Ok(path)
    }

    /// Recreate the working directory and copy the known artifacts into it.
    ///
    /// Any existing working directory is removed first. The current log,
    /// the report text and the previous log are each copied when present;
    /// missing sources are skipped.
    pub fn prepare_working_directory(&self) -> Result<PathBuf> {
        let working_dir = self.config.working_dir();

        if working_dir.exists() {
            fs::remove_dir_all(&working_dir)
                .context(format!("Failed to remove stale {}", working_dir.display()))?;
        }
        fs::create_dir_all(&working_dir)
            .context(format!("Failed to create {}", working_dir.display()))?;

        let sources = [
            (self.config.current_log_path(), &self.config.current_log_name),
            (self.config.report_path(), &self.config.report_file_name),
            (self.config.previous_log_path(), &self.config.previous_log_destination),
        ];

        let mut copied = 0usize;
        for (source, destination_name) in sources {
            if copy_if_exists(&source, &working_dir.join(destination_name))? {
                copied += 1;
            }
        }

        info!("Prepared {} with {} artifact(s)", working_dir.display(), copied);
        Ok(working_dir)
    }

    /// Compress `working_dir` into the archive and delete `working_dir`.
    ///
    /// A leftover archive from an earlier run is always removed first. When
    /// `working_dir` does not exist a warning is logged, no archive is
    /// created and the archive path is still returned.
    pub fn compress(&self, working_dir: &Path) -> Result<PathBuf> {
        let archive_path = self.config.archive_path();
        remove_file_if_exists(&archive_path)?;

        if !working_dir.is_dir() {
            warn!("Working directory {} does not exist, skipping compression",
                  working_dir.display());
            return Ok(archive_path);
        }

        ensure_parent(&archive_path)?;
        compress_directory(working_dir, &archive_path)?;

        fs::remove_dir_all(working_dir)
            .context(format!("Failed to remove {}", working_dir.display()))?;

        Ok(archive_path)
    }

    /// Read the archive into memory, or `None` when it does not exist.
    pub fn read_archive_bytes(&self, archive_path: &Path) -> Result<Option<Bytes>> {
        match fs::read(archive_path) {
            Ok(data) => {
                debug!("Read {} bytes from {}", data.len(), archive_path.display());
                Ok(Some(Bytes::from(data)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Archive {} not found", archive_path.display());
                Ok(None)
            }
            Err(e) => Err(e)
                .context(format!("{} {}", ERROR_FAILED_TO_READ_FILE, archive_path.display())),
        }
    }
}

/// Copy `source` to `destination`, overwriting; `false` when `source` is missing
fn copy_if_exists(source: &Path, destination: &Path) -> Result<bool> {
    if !source.is_file() {
        debug!("Skipping missing source {}", source.display());
        return Ok(false);
    }

    fs::copy(source, destination)
        .context(format!("Failed to copy {} to {}", source.display(), destination.display()))?;
    Ok(true)
}

fn remove_file_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed leftover {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context(format!("Failed to remove {}", path.display())),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }
    Ok(())
}
