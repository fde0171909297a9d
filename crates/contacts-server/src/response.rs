//! Mapping store outcomes onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

use contacts_core::api::{Empty, Envelope, ErrorPayload, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE};
use contacts_core::StoreError;

/// A request that could not be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    /// 400 with every message
    BadRequest(Vec<String>),
    /// 404
    NotFound,
    /// 500, details stay in the log
    Internal,
}

impl ApiFailure {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiFailure::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiFailure::NotFound => StatusCode::NOT_FOUND,
            ApiFailure::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn payload(self) -> ErrorPayload {
        match self {
            ApiFailure::BadRequest(messages) => ErrorPayload::Many(messages),
            ApiFailure::NotFound => ErrorPayload::One(NOT_FOUND_MESSAGE.to_string()),
            ApiFailure::Internal => ErrorPayload::One(SERVER_ERROR_MESSAGE.to_string()),
        }
    }
}

impl From<StoreError> for ApiFailure {
    fn from(err: StoreError) -> Self {
        if !err.is_client_error() {
            error!("Store failure: {}", err);
            return ApiFailure::Internal;
        }

        debug!("Request refused: {}", err);
        match err {
            StoreError::Validation(v) => ApiFailure::BadRequest(v.messages()),
            _ => ApiFailure::NotFound,
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: Envelope<Empty> = Envelope::failure(self.payload());
        (status, Json(body)).into_response()
    }
}
