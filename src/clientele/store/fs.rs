use super::RecordStore;
use crate::error::{ClienteleError, Result};
use crate::model::Client;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FILE_EXT: &str = ".txt";

/// File-backed record storage: one `<normalized_name><ext>` text file per
/// client inside `data_dir`.
pub struct FileStore {
    data_dir: PathBuf,
    file_ext: String,
}

impl FileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    /// Creation is idempotent.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        if !data_dir.exists() {
            fs::create_dir_all(&data_dir).map_err(|e| ClienteleError::Storage {
                operation: "create directory",
                path: data_dir.clone(),
                reason: e.to_string(),
            })?;
        }
        Ok(Self {
            data_dir,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        })
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Deterministic backing path for a key.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", key, self.file_ext))
    }
}

impl RecordStore for FileStore {
    fn read(&self, key: &str) -> Result<Client> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(ClienteleError::NotFound {
                name: key.to_string(),
            });
        }
        let text = fs::read_to_string(&path).map_err(|e| ClienteleError::Storage {
            operation: "read",
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Client::from_file_format(&text).map_err(|e| ClienteleError::Storage {
            operation: "read",
            path,
            reason: e.to_string(),
        })
    }

    fn write(&mut self, client: &Client) -> Result<()> {
        let path = self.path_for(&client.normalized_name());
        fs::write(&path, client.to_file_format()).map_err(|e| ClienteleError::Storage {
            operation: "write",
            path,
            reason: e.to_string(),
        })
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| ClienteleError::Storage {
            operation: "delete",
            path,
            reason: e.to_string(),
        })
    }

    fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.data_dir).map_err(|e| ClienteleError::Storage {
            operation: "list",
            path: self.data_dir.clone(),
            reason: e.to_string(),
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ClienteleError::Storage {
                operation: "list",
                path: self.data_dir.clone(),
                reason: e.to_string(),
            })?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stem) = name.strip_suffix(&self.file_ext) {
                if !stem.is_empty() {
                    keys.push(stem.to_string());
                }
            }
        }
        Ok(keys)
    }
}
