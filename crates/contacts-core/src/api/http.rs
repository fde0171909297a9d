//! HTTP implementation of `ContactApi`

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

use super::envelope::{Empty, Envelope, NOT_FOUND_MESSAGE};
use super::{ApiError, ContactApi, CONTACTS_PATH};
use crate::models::{Contact, ContactFields};

/// Talks to a contacts server over HTTP
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// The server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, CONTACTS_PATH)
    }

    fn item_url(&self, id: Uuid) -> String {
        format!("{}{}/{}", self.base_url, CONTACTS_PATH, id)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", self.base_url, e);
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            warn!("Unreadable response (status {}): {}", status, e);
            ApiError::Transport(format!("unreadable response ({}): {}", status, e))
        })?;

        into_result(status, envelope)
    }
}

/// Turn a decoded envelope into the caller's result
fn into_result<T>(status: StatusCode, envelope: Envelope<T>) -> Result<T, ApiError> {
    if envelope.success {
        return envelope
            .data
            .ok_or_else(|| ApiError::Transport("response is missing data".to_string()));
    }

    let messages = envelope
        .error
        .map(|e| e.messages())
        .unwrap_or_default();

    Err(match status {
        StatusCode::BAD_REQUEST => ApiError::Validation(messages),
        StatusCode::NOT_FOUND => ApiError::NotFound(
            messages
                .into_iter()
                .next()
                .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string()),
        ),
        _ => ApiError::Server(messages.join(", ")),
    })
}

#[async_trait]
impl ContactApi for HttpClient {
    async fn list(&self) -> Result<Vec<Contact>, ApiError> {
        debug!("GET {}", self.collection_url());
        self.send(self.client.get(self.collection_url())).await
    }

    async fn create(&self, fields: &ContactFields) -> Result<Contact, ApiError> {
        debug!("POST {}", self.collection_url());
        self.send(self.client.post(self.collection_url()).json(fields))
            .await
    }

    async fn update(&self, id: Uuid, fields: &ContactFields) -> Result<Contact, ApiError> {
        debug!("PUT {}", self.item_url(id));
        self.send(self.client.put(self.item_url(id)).json(fields))
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        debug!("DELETE {}", self.item_url(id));
        let _: Empty = self.send(self.client.delete(self.item_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorPayload;

    #[test]
    fn test_base_url_trimmed() {
        let client = HttpClient::new("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.collection_url(), "http://localhost:5000/api/contacts");
    }

    #[test]
    fn test_item_url() {
        let client = HttpClient::new("http://localhost:5000");
        let id = Uuid::new_v4();
        assert_eq!(
            client.item_url(id),
            format!("http://localhost:5000/api/contacts/{}", id)
        );
    }

    #[test]
    fn test_into_result_maps_statuses() {
        let validation: Envelope<Empty> =
            Envelope::failure(ErrorPayload::Many(vec!["Name is required".into()]));
        assert_eq!(
            into_result(StatusCode::BAD_REQUEST, validation),
            Err(ApiError::Validation(vec!["Name is required".into()]))
        );

        let missing: Envelope<Empty> = Envelope::failure(ErrorPayload::One("Contact not found".into()));
        assert_eq!(
            into_result(StatusCode::NOT_FOUND, missing),
            Err(ApiError::NotFound("Contact not found".into()))
        );

        let fault: Envelope<Empty> = Envelope::failure(ErrorPayload::One("Server Error".into()));
        assert_eq!(
            into_result(StatusCode::INTERNAL_SERVER_ERROR, fault),
            Err(ApiError::Server("Server Error".into()))
        );
    }

    #[test]
    fn test_into_result_requires_data() {
        let envelope: Envelope<Empty> = Envelope {
            success: true,
            count: None,
            data: None,
            error: None,
        };
        assert!(matches!(
            into_result(StatusCode::OK, envelope),
            Err(ApiError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is almost never listening
        let client = HttpClient::new("http://127.0.0.1:9");
        let err = client.list().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(err.user_message(), "Operation failed.");
    }
}
