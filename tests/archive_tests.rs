//! Integration tests for local archive construction.
//!
//! These tests drive the write, collect, compress and read steps in the
//! same order a submission does.

use std::fs;
use std::io::Read;
use tempfile::TempDir;
use anyhow::Result;
use zip::ZipArchive;

use report_uploader::bundle::ArchiveBuilder;
use report_uploader::config::SubmissionConfig;
use report_uploader::models::Report;
use report_uploader::utils::hash::sha256_hex;

fn config_in(temp_dir: &TempDir) -> SubmissionConfig {
    SubmissionConfig::with_dirs(temp_dir.path().join("data"), temp_dir.path().join("cache"))
}

fn entries(bytes: &[u8]) -> Result<Vec<(String, String)>> {
    let mut archive = ZipArchive::new(std::io::Cursor::new(bytes.to_vec()))?;
    let mut result = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        result.push((file.name().to_string(), content));
    }
    Ok(result)
}

/// Run the local half of a submission and return the archive bytes
fn build(builder: &ArchiveBuilder, report: &Report) -> Result<Option<bytes::Bytes>> {
    builder.write_report(report)?;
    let working_dir = builder.prepare_working_directory()?;
    let archive_path = builder.compress(&working_dir)?;
    builder.read_archive_bytes(&archive_path)
}

/// Report and both logs are packaged under their own names
#[test]
fn test_archive_contains_report_and_logs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(&temp_dir);
    fs::create_dir_all(&config.data_dir)?;
    fs::write(config.current_log_path(), "current session")?;
    fs::write(config.previous_log_path(), "previous session")?;

    let builder = ArchiveBuilder::new(config.clone());
    let bytes = build(&builder, &Report::new("S", "D"))?.expect("archive should exist");

    assert_eq!(
        entries(&bytes)?,
        vec![
            ("current.log".to_string(), "current session".to_string()),
            ("previous.log".to_string(), "previous session".to_string()),
            ("report.txt".to_string(), "S\n\nD".to_string()),
        ]
    );

    assert!(!config.working_dir().exists());
    assert_eq!(fs::read_to_string(config.report_path())?, "S\n\nD");
    Ok(())
}

/// The legacy layout lets the previous log replace the report copy
#[test]
fn test_legacy_previous_log_destination() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = config_in(&temp_dir);
    config.previous_log_destination = config.report_file_name.clone();
    fs::create_dir_all(&config.data_dir)?;
    fs::write(config.previous_log_path(), "previous session")?;

    let builder = ArchiveBuilder::new(config);
    let bytes = build(&builder, &Report::new("S", "D"))?.expect("archive should exist");

    assert_eq!(
        entries(&bytes)?,
        vec![("report.txt".to_string(), "previous session".to_string())]
    );
    Ok(())
}

/// Repeated submissions produce identical archives for identical inputs
#[test]
fn test_archive_is_reproducible() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(&temp_dir);
    fs::create_dir_all(&config.data_dir)?;
    fs::write(config.current_log_path(), "log line\n".repeat(100))?;

    let builder = ArchiveBuilder::new(config);
    let report = Report::new("Crash on load", "Slot 2");

    let first = build(&builder, &report)?.expect("archive should exist");
    let second = build(&builder, &report)?.expect("archive should exist");

    assert_eq!(entries(&first)?, entries(&second)?);
    assert_eq!(first.len(), second.len());
    assert_eq!(sha256_hex(&first).len(), 64);
    Ok(())
}

/// A missing working directory removes the stale archive and yields nothing
#[test]
fn test_missing_working_directory_yields_no_archive() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(&temp_dir);
    let builder = ArchiveBuilder::new(config.clone());

    fs::create_dir_all(&config.data_dir)?;
    fs::write(config.archive_path(), b"stale archive")?;

    let archive_path = builder.compress(&config.working_dir())?;
    assert_eq!(archive_path, config.archive_path());
    assert!(!archive_path.exists());
    assert!(builder.read_archive_bytes(&archive_path)?.is_none());
    Ok(())
}

/// Names configured in YAML are honored by the builder
#[test]
fn test_builder_uses_configured_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = config_in(&temp_dir);
    config.report_file_name = "bug.txt".to_string();
    config.archive_file_name = "bug.zip".to_string();
    config.current_log_name = "game.log".to_string();

    let config_path = temp_dir.path().join("report_uploader.yaml");
    config.save_to_yaml_file(&config_path)?;
    let loaded = SubmissionConfig::from_yaml_file(&config_path)?;

    fs::create_dir_all(&loaded.data_dir)?;
    fs::write(loaded.current_log_path(), "game output")?;

    let builder = ArchiveBuilder::new(loaded.clone());
    let bytes = build(&builder, &Report::new("S", ""))?.expect("archive should exist");

    assert!(loaded.data_dir.join("bug.zip").exists());
    assert_eq!(
        entries(&bytes)?,
        vec![
            ("bug.txt".to_string(), "S\n\n".to_string()),
            ("game.log".to_string(), "game output".to_string()),
        ]
    );
    Ok(())
}
