use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::env_vars::expand_env_vars;
use crate::constants::{
    DEFAULT_APP_NAME, DEFAULT_ARCHIVE_FILE_NAME, DEFAULT_CREATE_FOLDER_ENDPOINT,
    DEFAULT_CURRENT_LOG_NAME, DEFAULT_PREVIOUS_LOG_NAME, DEFAULT_REPORT_FILE_NAME,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_UPLOAD_ENDPOINT, DEFAULT_WORKING_DIR_NAME,
};
use crate::security::path_validator::validate_file_name;

/// Endpoints and transport settings for the storage API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    pub create_folder_endpoint: String,
    pub upload_endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            create_folder_endpoint: DEFAULT_CREATE_FOLDER_ENDPOINT.to_string(),
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Local layout of a submission: where sources live and where the
/// report, working directory and archive are written.
///
/// Every submission reuses the same names, so at most one working
/// directory and one archive exist at any time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubmissionConfig {
    /// Directory holding the logs, the report text and the archive
    pub data_dir: PathBuf,
    /// Directory under which the working directory is created
    pub cache_dir: PathBuf,
    pub report_file_name: String,
    pub archive_file_name: String,
    pub working_dir_name: String,
    pub current_log_name: String,
    pub previous_log_name: String,
    /// Name the previous log is copied under inside the working directory.
    /// Setting it to `report_file_name` reproduces the legacy layout where
    /// the previous log replaces the report copy.
    pub previous_log_destination: String,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        let (data_dir, cache_dir) = match ProjectDirs::from("", "", DEFAULT_APP_NAME) {
            Some(dirs) => (dirs.data_dir().to_path_buf(), dirs.cache_dir().to_path_buf()),
            None => {
                let fallback = env::temp_dir().join(DEFAULT_APP_NAME);
                (fallback.clone(), fallback)
            }
        };

        Self::with_dirs(data_dir, cache_dir)
    }
}

impl SubmissionConfig {
    /// Default layout rooted at explicit directories
    pub fn with_dirs(data_dir: impl Into<PathBuf>, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            cache_dir: cache_dir.into(),
            report_file_name: DEFAULT_REPORT_FILE_NAME.to_string(),
            archive_file_name: DEFAULT_ARCHIVE_FILE_NAME.to_string(),
            working_dir_name: DEFAULT_WORKING_DIR_NAME.to_string(),
            current_log_name: DEFAULT_CURRENT_LOG_NAME.to_string(),
            previous_log_name: DEFAULT_PREVIOUS_LOG_NAME.to_string(),
            previous_log_destination: DEFAULT_PREVIOUS_LOG_NAME.to_string(),
            api: ApiConfig::default(),
        }
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: SubmissionConfig = serde_yaml::from_str(&content)
            .context("Failed to parse YAML config")?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config to YAML")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .context(format!("Failed to create {}", parent.display()))?;
            }
        }

        fs::write(path, yaml)
            .context(format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Expand `%VAR%`, `$VAR` and `${VAR}` in the directory settings
    pub fn process_environment_variables(&mut self) {
        self.data_dir = PathBuf::from(expand_env_vars(&self.data_dir.to_string_lossy()));
        self.cache_dir = PathBuf::from(expand_env_vars(&self.cache_dir.to_string_lossy()));
    }

    /// Check that every configured file name is a plain name
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("report_file_name", &self.report_file_name),
            ("archive_file_name", &self.archive_file_name),
            ("working_dir_name", &self.working_dir_name),
            ("current_log_name", &self.current_log_name),
            ("previous_log_name", &self.previous_log_name),
            ("previous_log_destination", &self.previous_log_destination),
        ];

        for (field, name) in names {
            validate_file_name(name).context(format!("Invalid {}", field))?;
        }

        Ok(())
    }

    pub fn report_path(&self) -> PathBuf {
        self.data_dir.join(&self.report_file_name)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.data_dir.join(&self.archive_file_name)
    }

    pub fn working_dir(&self) -> PathBuf {
        self.cache_dir.join(&self.working_dir_name)
    }

    pub fn current_log_path(&self) -> PathBuf {
        self.data_dir.join(&self.current_log_name)
    }

    pub fn previous_log_path(&self) -> PathBuf {
        self.data_dir.join(&self.previous_log_name)
    }

    /// Write the default configuration to `path`
    pub fn create_default_config_file(path: &Path) -> Result<()> {
        SubmissionConfig::default().save_to_yaml_file(path)
    }
}

/// Load a configuration file or create a default one.
///
/// 1. An existing file at `config_path` is parsed.
/// 2. A missing file at `config_path` is created from the defaults.
/// 3. Without a path the defaults are used as-is.
///
/// Environment variables in directory settings are expanded and the file
/// names are validated in every case.
pub fn load_or_create_config(config_path: Option<&Path>) -> Result<SubmissionConfig> {
    let mut config = match config_path {
        Some(path) if path.exists() => SubmissionConfig::from_yaml_file(path)?,
        Some(path) => {
            info!("Creating default config at {}", path.display());
            let default_config = SubmissionConfig::default();
            default_config.save_to_yaml_file(path)?;
            default_config
        }
        None => {
            info!("No config path provided, using default configuration");
            SubmissionConfig::default()
        }
    };

    config.process_environment_variables();
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = SubmissionConfig::with_dirs("/data", "/cache");
        config.api.request_timeout_secs = 5;
        config.save_to_yaml_file(&path).unwrap();

        let loaded = SubmissionConfig::from_yaml_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_derived_paths() {
        let config = SubmissionConfig::with_dirs("/data", "/cache");
        assert_eq!(config.report_path(), PathBuf::from("/data/report.txt"));
        assert_eq!(config.archive_path(), PathBuf::from("/data/report.zip"));
        assert_eq!(config.working_dir(), PathBuf::from("/cache/report_bundle"));
        assert_eq!(config.current_log_path(), PathBuf::from("/data/current.log"));
        assert_eq!(config.previous_log_path(), PathBuf::from("/data/previous.log"));
    }

    #[test]
    fn test_missing_api_section_uses_defaults() {
        let yaml = r#"
data_dir: /data
cache_dir: /cache
report_file_name: report.txt
archive_file_name: report.zip
working_dir_name: report_bundle
current_log_name: Player.log
previous_log_name: Player-prev.log
previous_log_destination: Player-prev.log
"#;
        let config: SubmissionConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.api.request_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_load_or_create_config_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.yaml");

        let config = load_or_create_config(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(config.report_file_name, "report.txt");
    }

    #[test]
    fn test_load_or_create_config_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = SubmissionConfig::with_dirs(temp_dir.path(), temp_dir.path());
        config.current_log_name = "Player.log".to_string();
        config.save_to_yaml_file(&path).unwrap();

        let loaded = load_or_create_config(Some(&path)).unwrap();
        assert_eq!(loaded.current_log_name, "Player.log");
    }

    #[test]
    fn test_load_or_create_config_no_path() {
        let config = load_or_create_config(None).unwrap();
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_invalid_file_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        let mut config = SubmissionConfig::with_dirs(temp_dir.path(), temp_dir.path());
        config.archive_file_name = "../escape.zip".to_string();
        config.save_to_yaml_file(&path).unwrap();

        let result = load_or_create_config(Some(&path));
        assert!(result.is_err());
    }

    #[test]
    fn test_process_environment_variables() {
        std::env::set_var("RU_TEST_DATA_ROOT", "/srv/game");
        let mut config = SubmissionConfig::with_dirs("$RU_TEST_DATA_ROOT/data", "${RU_TEST_DATA_ROOT}/cache");
        config.process_environment_variables();
        assert_eq!(config.data_dir, PathBuf::from("/srv/game/data"));
        assert_eq!(config.cache_dir, PathBuf::from("/srv/game/cache"));
        std::env::remove_var("RU_TEST_DATA_ROOT");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.yaml");
        fs::write(&path, "data_dir: [unclosed").unwrap();
        assert!(SubmissionConfig::from_yaml_file(&path).is_err());
    }
}
