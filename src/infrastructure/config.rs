//! Application configuration loaded from TOML.

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::InMemoryDirectory;

/// Default configuration file, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "yan.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(".yan") }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file name, relative to the data directory.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "yan.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// TOML file with a `[[users]]` table; the demo accounts are used when unset.
    pub users_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Seconds a transient notice stays on screen.
    pub notice_seconds: u64,
    /// Audit entries shown on the admin dashboard.
    pub audit_preview: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_seconds: 5,
            audit_preview: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub directory: DirectoryConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when the file does not exist,
    /// then applies environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = match fs::read_to_string(path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(source) => {
                return Err(ConfigError::Io { path: path.to_path_buf(), source });
            }
        };
        config.apply_env_overrides(|name| env::var(name).ok());
        Ok(config)
    }

    /// `YAN_DATA_DIR` replaces the data directory when set and non-empty.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("YAN_DATA_DIR") {
            if !dir.is_empty() {
                self.storage.data_dir = PathBuf::from(dir);
            }
        }
    }

    /// Log file inside the data directory.
    pub fn log_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.logging.file)
    }

    /// Directory named by `[directory] users_file`, or the demo accounts.
    pub fn user_directory(&self) -> Result<InMemoryDirectory, ConfigError> {
        match &self.directory.users_file {
            Some(path) => load_user_directory(path),
            None => Ok(InMemoryDirectory::demo()),
        }
    }
}

pub fn load_user_directory(path: impl AsRef<Path>) -> Result<InMemoryDirectory, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    let mut directory: InMemoryDirectory = toml::from_str(&raw)?;
    directory.reindex();
    tracing::info!(users = directory.len(), path = %path.display(), "loaded user directory");
    Ok(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, UserDirectory};
    use tempfile::TempDir;

    #[test]
    fn test_load_from_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(dir.path().join("nonexistent.toml")).unwrap();
        assert_eq!(cfg.ui.notice_seconds, 5);
        assert_eq!(cfg.ui.audit_preview, 10);
        assert_eq!(cfg.logging.file, "yan.log");
    }

    #[test]
    fn test_load_from_partial_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yan.toml");
        fs::write(&path, "[ui]\nnotice_seconds = 2\n\n[logging]\nlevel = \"debug\"\n").unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.ui.notice_seconds, 2);
        assert_eq!(cfg.ui.audit_preview, 10);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yan.toml");
        fs::write(&path, "[ui\nnotice_seconds = ").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_env_override_data_dir() {
        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|name| (name == "YAN_DATA_DIR").then(|| "/tmp/yan".to_string()));
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/tmp/yan"));

        cfg.apply_env_overrides(|_| Some(String::new()));
        assert_eq!(cfg.storage.data_dir, PathBuf::from("/tmp/yan"));
    }

    #[test]
    fn test_log_path_follows_data_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("yan.toml");
        fs::write(&path, "[storage]\ndata_dir = \"/srv/yan\"\n\n[logging]\nfile = \"portal.log\"\n").unwrap();

        let cfg = AppConfig::load_from(&path).unwrap();
        assert_eq!(cfg.log_path(), PathBuf::from("/srv/yan/portal.log"));
    }

    #[test]
    fn test_users_file_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.toml");
        fs::write(
            &path,
            r#"
[[users]]
email = "chair@yan.org"
password = "secret"
role = "admin"
name = "Board Chair"

[[users]]
email = "new@yan.org"
password = "pw"
role = "applicant"
name = "New Person"
applicationId = "APP004"
"#,
        )
        .unwrap();

        let mut cfg = AppConfig::default();
        cfg.directory.users_file = Some(path);
        let directory = cfg.user_directory().unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.lookup("chair@yan.org").unwrap().role, Role::Admin);
        assert_eq!(
            directory.lookup("new@yan.org").unwrap().application_id.as_deref(),
            Some("APP004")
        );
    }

    #[test]
    fn test_default_directory_is_demo() {
        let directory = AppConfig::default().user_directory().unwrap();
        assert!(directory.lookup("member@yan.org").is_some());
    }
}
