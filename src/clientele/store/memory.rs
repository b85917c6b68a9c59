use super::RecordStore;
use crate::error::{ClienteleError, Result};
use crate::model::Client;
use std::collections::HashMap;

/// In-memory storage for testing. Does NOT persist data.
///
/// Records are held as the same serialized text a [`super::fs::FileStore`]
/// would write, so reads go through the real parser.
#[derive(Default)]
pub struct InMemoryStore {
    records: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw text blob under a key, bypassing serialization. Lets tests
    /// stage corrupt or hand-written records.
    pub fn seed(&mut self, key: &str, text: &str) {
        self.records.insert(key.to_string(), text.to_string());
    }
}

impl RecordStore for InMemoryStore {
    fn read(&self, key: &str) -> Result<Client> {
        let text = self
            .records
            .get(key)
            .ok_or_else(|| ClienteleError::NotFound {
                name: key.to_string(),
            })?;
        Client::from_file_format(text).map_err(|e| ClienteleError::Storage {
            operation: "read",
            path: key.into(),
            reason: e.to_string(),
        })
    }

    fn write(&mut self, client: &Client) -> Result<()> {
        self.records
            .insert(client.normalized_name(), client.to_file_format());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.records.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    fn list_keys(&self) -> Result<Vec<String>> {
        Ok(self.records.keys().cloned().collect())
    }
}
