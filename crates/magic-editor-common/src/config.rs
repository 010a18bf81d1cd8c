use serde::{Deserialize, Serialize};

use std::path::Path;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Storage key the editor content is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "magic-editor-content";

/// Content seeded into an empty store.
pub const DEFAULT_CONTENT: &str = "<p>👋 Welcome back! Your content has been restored.</p>";

/// What gets written to the content store on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistMode {
    /// Repaired HTML from the export pipeline.
    #[default]
    Exported,
    /// The editing surface's serialization, untouched.
    Raw,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Key in the content store holding the document.
    pub storage_key: String,
    /// HTML loaded when nothing is stored yet.
    pub default_content: String,
    /// Whether autosave stores exported or raw HTML.
    pub persist: PersistMode,
    /// Console log level, used when `RUST_LOG` is unset.
    pub log_level: String,
}

impl EditorConfig {
    /// Loads the configuration from the provided loader.
    pub fn load(loader: &impl Loader) -> Result<Self, ConfigError> {
        loader.load()
    }
    /// Saves the configuration using the provided saver.
    pub fn save(&self, saver: &impl Saver) -> Result<(), ConfigError> {
        saver.save(self)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            default_content: DEFAULT_CONTENT.to_owned(),
            persist: PersistMode::default(),
            log_level: "info".to_owned(),
        }
    }
}

/// The trait for loading configuration data.
pub trait Loader {
    /// Loads the configuration data.
    fn load(&self) -> Result<EditorConfig, ConfigError>;
}

/// The trait for saving configuration data.
pub trait Saver {
    /// Saves the configuration data.
    fn save(&self, config: &EditorConfig) -> Result<(), ConfigError>;
}

/// An implementation of [`Loader`] and [`Saver`] that reads and writes a configuration file.
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Create a new [`ConfigFile`] with the given path.
    ///
    /// The format is picked from the file extension. Only `.json` is supported.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn check_format(&self) -> Result<(), ConfigError> {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(()),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_owned(),
            )),
        }
    }
}

impl Loader for ConfigFile {
    fn load(&self) -> Result<EditorConfig, ConfigError> {
        self.check_format()?;
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl Saver for ConfigFile {
    fn save(&self, config: &EditorConfig) -> Result<(), ConfigError> {
        self.check_format()?;
        std::fs::write(&self.path, serde_json::to_string_pretty(config)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{ "persist": "raw" }"#).unwrap();
        assert_eq!(config.persist, PersistMode::Raw);
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let file = ConfigFile::new(dir.path().join("editor.json"));

        let config = EditorConfig {
            storage_key: "draft".into(),
            ..EditorConfig::default()
        };
        config.save(&file).unwrap();

        let loaded = EditorConfig::load(&file).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = ConfigFile::new("editor.toml");
        let err = EditorConfig::load(&file).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(ext) if ext == "toml"));
    }
}
