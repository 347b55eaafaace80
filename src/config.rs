use crate::app::viewer::RenderMode;
use crate::model::diff::{DEFAULT_LOOKAHEAD, MAX_LOOKAHEAD};
use crate::view::theme::ThemeKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Viewer defaults
    #[serde(default)]
    pub viewer: ViewerConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
}

/// Viewer defaults, overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    #[serde(default)]
    pub theme: ThemeKind,

    #[serde(default)]
    pub render_mode: RenderMode,

    /// Lines the diff engine scans ahead to realign after a mismatch
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,

    /// Label of the original pane; the file path when unset
    #[serde(default)]
    pub original_label: Option<String>,

    /// Label of the modified pane; the file path when unset
    #[serde(default)]
    pub modified_label: Option<String>,

    #[serde(default = "default_true")]
    pub show_line_numbers: bool,

    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
}

fn default_lookahead() -> usize {
    DEFAULT_LOOKAHEAD
}

fn default_true() -> bool {
    true
}

fn default_tab_size() -> usize {
    4
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: ThemeKind::default(),
            render_mode: RenderMode::default(),
            lookahead: default_lookahead(),
            original_label: None,
            modified_label: None,
            show_line_numbers: true,
            tab_size: default_tab_size(),
        }
    }
}

/// Where exports are written
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExportConfig {
    /// Export directory; the current directory when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    pub fn directory_or_current(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Load from `path` if it exists, otherwise defaults.
    ///
    /// A present but broken file is an error; a missing one is not.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// Default config file location (`<config dir>/diffpane/config.json`)
    #[cfg(feature = "runtime")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("diffpane").join("config.json"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewer.tab_size == 0 {
            return Err(ConfigError::ValidationError(
                "tab_size must be greater than 0".to_string(),
            ));
        }

        if self.viewer.lookahead > MAX_LOOKAHEAD {
            return Err(ConfigError::ValidationError(format!(
                "lookahead must be <= {MAX_LOOKAHEAD}"
            )));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.viewer.theme, ThemeKind::Dark);
        assert_eq!(config.viewer.render_mode, RenderMode::SideBySide);
        assert_eq!(config.viewer.lookahead, 3);
        assert_eq!(config.viewer.original_label, None);
        assert!(config.viewer.show_line_numbers);
        assert_eq!(config.export.directory, None);
        assert_eq!(config.export.directory_or_current(), PathBuf::from("."));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"viewer": {"theme": "light", "render_mode": "inline"}}"#)
                .unwrap();
        assert_eq!(config.viewer.theme, ThemeKind::Light);
        assert_eq!(config.viewer.render_mode, RenderMode::Inline);
        assert_eq!(config.viewer.tab_size, 4);
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.viewer.lookahead = 5;
        config.export.directory = Some(temp_dir.path().join("exports"));
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_broken_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Config::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.viewer.tab_size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        let mut config = Config::default();
        config.viewer.lookahead = MAX_LOOKAHEAD;
        assert!(config.validate().is_ok());
        config.viewer.lookahead = MAX_LOOKAHEAD + 1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: lookahead must be <= 1000");
    }
}
