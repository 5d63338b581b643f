//! TOML configuration.
//!
//! Loaded in order, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. User config (`<config_dir>/optodesk/config.toml`), skipped when absent
//! 3. An explicitly named file, which must exist
//!
//! ```toml
//! [database]
//! path = "/var/lib/optodesk/desk.db"
//!
//! [logging]
//! quiet = true
//!
//! [dropdown]
//! no_results_label = "Nothing found"
//! max_height_px = 200.0
//!
//! [toast]
//! max_visible = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub const DEFAULT_DATABASE_PATH: &str = "optodesk.db";
pub const DEFAULT_NO_RESULTS_LABEL: &str = "No results";
pub const DEFAULT_MAX_HEIGHT_PX: f32 = 160.0;
pub const DEFAULT_MAX_TOASTS: usize = 3;

/// Effective application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub dropdown: DropdownConfig,
    pub toast: ToastConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Only emit error-level events
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropdownConfig {
    /// Placeholder row shown when nothing matches
    pub no_results_label: String,
    /// Overlay height cap before it scrolls
    pub max_height_px: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    pub max_visible: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: PathBuf::from(DEFAULT_DATABASE_PATH),
            },
            logging: LoggingConfig::default(),
            dropdown: DropdownConfig::default(),
            toast: ToastConfig::default(),
        }
    }
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            no_results_label: DEFAULT_NO_RESULTS_LABEL.to_string(),
            max_height_px: DEFAULT_MAX_HEIGHT_PX,
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            max_visible: DEFAULT_MAX_TOASTS,
        }
    }
}

/// On-disk shape: every key optional so files can override selectively.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    logging: LoggingSection,
    #[serde(default)]
    dropdown: DropdownSection,
    #[serde(default)]
    toast: ToastSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatabaseSection {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingSection {
    quiet: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DropdownSection {
    no_results_label: Option<String>,
    max_height_px: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ToastSection {
    max_visible: Option<usize>,
}

impl AppConfig {
    /// Load defaults, then the user file, then `explicit` if given.
    pub fn load_hierarchy(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(user_path) = user_config_path() {
            if user_path.is_file() {
                config.apply(read_config_file(&user_path)?);
            }
        }

        if let Some(path) = explicit {
            config.apply(read_config_file(path)?);
        }

        config.validate()?;
        tracing::debug!(
            event = "core.config.load_completed",
            database = %config.database.path.display(),
            quiet = config.logging.quiet
        );
        Ok(config)
    }

    /// Load a single file over the defaults.
    pub fn load_file(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::default();
        config.apply(read_config_file(path)?);
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text over the defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        let mut config = Self::default();
        config.apply(file);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }
        if !(self.dropdown.max_height_px > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dropdown.max_height_px must be positive, got {}",
                self.dropdown.max_height_px
            )));
        }
        if self.toast.max_visible == 0 {
            return Err(ConfigError::Invalid("toast.max_visible must be at least 1".into()));
        }
        Ok(())
    }

    fn apply(&mut self, file: ConfigFile) {
        if let Some(path) = file.database.path {
            self.database.path = path;
        }
        if let Some(quiet) = file.logging.quiet {
            self.logging.quiet = quiet;
        }
        if let Some(label) = file.dropdown.no_results_label {
            self.dropdown.no_results_label = label;
        }
        if let Some(height) = file.dropdown.max_height_px {
            self.dropdown.max_height_px = height;
        }
        if let Some(max) = file.toast.max_visible {
            self.toast.max_visible = max;
        }
    }
}

/// `<config_dir>/optodesk/config.toml`, if the platform has a config dir.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("optodesk").join("config.toml"))
}

fn read_config_file(path: &Path) -> ConfigResult<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dropdown.no_results_label, "No results");
        assert_eq!(config.toast.max_visible, 3);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_toml_str(
            r#"
            [dropdown]
            no_results_label = "Nothing found"
            "#,
        )
        .unwrap();

        assert_eq!(config.dropdown.no_results_label, "Nothing found");
        assert_eq!(config.dropdown.max_height_px, DEFAULT_MAX_HEIGHT_PX);
        assert_eq!(config.database.path, PathBuf::from(DEFAULT_DATABASE_PATH));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = AppConfig::from_toml_str("[toast]\nmax_visible = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = AppConfig::from_toml_str("[dropdown]\nmax_height_px = -1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let result = AppConfig::from_toml_str("[database]\nurl = \"x\"\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\npath = \"clinic.db\"\n\n[logging]\nquiet = true").unwrap();

        let config = AppConfig::load_file(file.path()).unwrap();
        assert_eq!(config.database.path, PathBuf::from("clinic.db"));
        assert!(config.logging.quiet);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load_file(&missing);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
