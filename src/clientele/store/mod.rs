//! # Storage layer
//!
//! Persistence is abstracted behind the [`RecordStore`] trait so the manager
//! can be tested without a filesystem and so the flat-file layout stays a
//! detail of one module.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage. One record per text file,
//!   `<normalized_name><ext>` inside a configured data directory.
//! - [`memory::InMemoryStore`]: in-memory storage for tests. Holds the same
//!   serialized text blobs a file would, so reads exercise the parser.
//!
//! ## Keys
//!
//! Every operation is keyed by the client's normalized name (see
//! [`crate::normalize`]). The store holds at most one record per key;
//! `write` is a whole-record overwrite.

use crate::error::Result;
use crate::model::Client;

pub mod fs;
pub mod memory;

/// Abstract interface for record storage.
pub trait RecordStore {
    /// Read and deserialize the record for a key. Fails with
    /// [`ClienteleError::NotFound`](crate::error::ClienteleError::NotFound)
    /// when no record exists.
    fn read(&self, key: &str) -> Result<Client>;

    /// Serialize and store a record under its normalized name, fully
    /// overwriting any previous version.
    fn write(&mut self, client: &Client) -> Result<()>;

    /// Remove the record for a key. Absence is not an error.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Whether a record exists for a key. Authoritative for duplicate checks
    /// even when the manager's cache is cold.
    fn exists(&self, key: &str) -> bool;

    /// Every stored key, for bulk cache warm-up.
    fn list_keys(&self) -> Result<Vec<String>>;
}
