use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};
use walkdir::WalkDir;
use zip::{write::FileOptions, ZipWriter};

use crate::constants::{
    COMPRESSED_EXTENSIONS, COMPRESSION_CHUNK_SIZE as CHUNK_SIZE, ERROR_FAILED_TO_COMPRESS,
    LARGE_FILE_COMPRESSION_THRESHOLD,
};

/// Deflate level for `path`, based on file type and size.
///
/// Files that are already compressed (like nested zips or screenshots) or
/// very large files use the fastest level; everything else, logs
/// included, uses the default level.
pub fn compression_level(path: &Path) -> i32 {
    let low_compression = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => COMPRESSED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        _ => false,
    };

    let large_file = matches!(
        fs::metadata(path),
        Ok(metadata) if metadata.len() > LARGE_FILE_COMPRESSION_THRESHOLD
    );

    if low_compression || large_file { 1 } else { 6 }
}

/// Entry options for `path`: deflate at [`compression_level`]
pub fn get_compression_options(path: &Path) -> FileOptions {
    FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .compression_level(Some(compression_level(path)))
        .unix_permissions(0o644)
}

/// Archive entry name for `path`, relative to `base` and always `/`-separated
fn entry_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Compress the full contents of `source_dir` into a zip at `zip_path`.
///
/// Entries are written in sorted order so the same directory contents
/// always produce the same entry layout. Any existing file at `zip_path`
/// is replaced. An empty directory yields a valid, empty archive.
///
/// # Example
///
/// ```no_run
/// # use std::path::Path;
/// # use report_uploader::utils::compress::compress_directory;
/// let zip_path = compress_directory(
///     Path::new("/tmp/report_bundle"),
///     Path::new("/tmp/report.zip"),
/// )?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn compress_directory(source_dir: &Path, zip_path: &Path) -> Result<PathBuf> {
    let start = Instant::now();

    let zip_file = fs::File::create(zip_path)
        .context(format!("Failed to create zip file {}", zip_path.display()))?;
    let mut zip = ZipWriter::new(zip_file);

    // Reused across files to avoid repeated allocations
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut file_count = 0usize;

    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by(|a, b| a.file_name().cmp(b.file_name()));

    for entry in walker {
        let entry = entry.context(format!("Failed to walk {}", source_dir.display()))?;
        let path = entry.path();
        let name = entry_name(source_dir, path);

        if entry.file_type().is_dir() {
            zip.add_directory(format!("{}/", name), FileOptions::default())
                .context(format!("Failed to add directory entry {}", name))?;
            continue;
        }

        let file = fs::File::open(path)
            .context(format!("Failed to open {}", path.display()))?;
        let mut reader = BufReader::new(file);

        zip.start_file(name.clone(), get_compression_options(path))
            .context(format!("Failed to start file entry for {}", name))?;

        // Stream file content in chunks to avoid large memory usage
        let mut written = 0u64;
        loop {
            let bytes_read = reader.read(&mut buffer)
                .context(format!("Failed to read from {}", path.display()))?;

            if bytes_read == 0 {
                break;
            }

            zip.write_all(&buffer[..bytes_read])
                .context(format!("{} {}", ERROR_FAILED_TO_COMPRESS, name))?;
            written += bytes_read as u64;
        }

        file_count += 1;
        debug!("Compressed {} ({} bytes)", name, written);
    }

    zip.finish().context("Failed to finalize zip file")?;

    info!("Compressed {} file(s) to {} in {:?}",
          file_count, zip_path.display(), start.elapsed());
    Ok(zip_path.to_path_buf())
}
