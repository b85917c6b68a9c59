use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClienteleError {
    /// Bad input on one field. Recoverable: the caller can re-prompt.
    #[error("invalid {field} {value:?}: {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Lookup miss. `name` is the name as the caller supplied it.
    #[error("no client found with the name '{name}'")]
    NotFound { name: String },

    /// Create collision on the normalized name.
    #[error("a client with the name '{name}' already exists")]
    AlreadyExists { name: String },

    /// I/O failure. Fatal to the operation, never to the process.
    #[error("could not {operation} '{}': {reason}", path.display())]
    Storage {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ClienteleError>;
