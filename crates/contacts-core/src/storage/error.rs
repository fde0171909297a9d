//! Storage error handling
//!
//! Typed errors for store operations. Validation and not-found outcomes are
//! kept apart from infrastructure faults so the API layer can map them to
//! distinct responses.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationError;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// The record broke one or more field rules
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No record with this ID
    #[error("Contact not found: {0}")]
    NotFound(Uuid),

    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stored row could not be turned back into a contact
    #[error("Stored contact '{id}' is unreadable: {details}")]
    CorruptRecord { id: String, details: String },

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The store lock was poisoned by a panicking writer
    #[error("Store unavailable: lock poisoned")]
    Poisoned,
}

impl StoreError {
    /// Create an error from an I/O error raised while preparing `path`
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                path,
                source: error,
            },
            _ => StoreError::CreateDirectory {
                path,
                source: error,
            },
        }
    }

    /// Whether the caller sent something the store refused, as opposed to
    /// the store itself failing
    pub fn is_client_error(&self) -> bool {
        matches!(self, StoreError::Validation(_) | StoreError::NotFound(_))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
