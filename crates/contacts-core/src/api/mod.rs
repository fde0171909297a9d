//! Contact API contract
//!
//! Wire types shared with the server, the `ContactApi` trait that client
//! code programs against, and an HTTP implementation of it.
//!
//! ## Routes
//!
//! - `POST /api/contacts` - create
//! - `GET /api/contacts` - list, newest first
//! - `PUT /api/contacts/{id}` - update
//! - `DELETE /api/contacts/{id}` - delete

mod envelope;
mod http;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Contact, ContactFields};

pub use envelope::{Empty, Envelope, ErrorPayload, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE};
pub use http::HttpClient;

/// Path of the contacts collection
pub const CONTACTS_PATH: &str = "/api/contacts";

/// Fallback text when the service gave no usable error
pub const GENERIC_FAILURE: &str = "Operation failed.";

/// Failures reported by a `ContactApi`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service rejected the fields
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    /// The target contact does not exist
    #[error("{0}")]
    NotFound(String),

    /// The service reported a fault
    #[error("{0}")]
    Server(String),

    /// The service could not be reached or answered with something unreadable
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// Text to show the user
    ///
    /// Service messages are shown verbatim; transport failures fall back to
    /// a generic message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(messages) if !messages.is_empty() => messages.join(", "),
            ApiError::NotFound(message) | ApiError::Server(message) if !message.is_empty() => {
                message.clone()
            }
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Client-side view of the contact service
#[async_trait]
pub trait ContactApi: Send + Sync {
    /// Every contact, newest first
    async fn list(&self) -> Result<Vec<Contact>, ApiError>;

    /// Create a contact from a full set of fields
    async fn create(&self, fields: &ContactFields) -> Result<Contact, ApiError>;

    /// Update the contact `id`
    async fn update(&self, id: Uuid, fields: &ContactFields) -> Result<Contact, ApiError>;

    /// Permanently delete the contact `id`
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;
}
