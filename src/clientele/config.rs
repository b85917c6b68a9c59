use crate::error::{ClienteleError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".txt";

/// Configuration for clientele, stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClienteleConfig {
    /// Where record files live. `None` means the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// File extension for record files (e.g., ".txt", ".rec")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

impl Default for ClienteleConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }
}

impl ClienteleConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ClienteleError::Storage {
            operation: "read",
            path: config_path.clone(),
            reason: e.to_string(),
        })?;
        let config: ClienteleConfig =
            serde_json::from_str(&content).map_err(|e| ClienteleError::Storage {
                operation: "read",
                path: config_path,
                reason: e.to_string(),
            })?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| ClienteleError::Storage {
                operation: "create directory",
                path: config_dir.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(|e| ClienteleError::Storage {
            operation: "write",
            path: config_path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&config_path, content).map_err(|e| ClienteleError::Storage {
            operation: "write",
            path: config_path,
            reason: e.to_string(),
        })
    }

    /// Get the file extension (ensures it starts with a dot)
    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ClienteleConfig::default();
        assert_eq!(config.file_ext, ".txt");
        assert_eq!(config.data_dir, None);
    }

    #[test]
    fn test_set_file_ext_with_dot() {
        let mut config = ClienteleConfig::default();
        config.set_file_ext(".rec");
        assert_eq!(config.file_ext, ".rec");
    }

    #[test]
    fn test_set_file_ext_without_dot() {
        let mut config = ClienteleConfig::default();
        config.set_file_ext("rec");
        assert_eq!(config.file_ext, ".rec");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = ClienteleConfig::load(temp_dir.path().join("nope")).unwrap();
        assert_eq!(config, ClienteleConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = ClienteleConfig::default();
        config.data_dir = Some(PathBuf::from("/tmp/records"));
        config.set_file_ext(".rec");
        config.save(temp_dir.path()).unwrap();

        let loaded = ClienteleConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{}").unwrap();

        let loaded = ClienteleConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.file_ext, ".txt");
        assert_eq!(loaded.data_dir, None);
    }
}
