//! Request handlers for `/api/contacts`
//!
//! Each handler runs one store operation on the blocking pool while holding
//! the store lock, so concurrent writes are serialized and the last one wins.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, error};
use uuid::Uuid;

use contacts_core::api::{Empty, Envelope};
use contacts_core::{Contact, ContactFields, Store, StoreError, StoreResult};

use crate::response::ApiFailure;
use crate::AppState;

type Reply<T> = Result<(StatusCode, Json<Envelope<T>>), ApiFailure>;

/// Liveness check
pub async fn health() -> &'static str {
    "Backend is running successfully"
}

pub async fn create_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactFields>, JsonRejection>,
) -> Reply<Contact> {
    let Json(fields) = body.map_err(bad_body)?;
    let contact = with_store(&state, move |store| store.create(&fields)).await?;
    Ok((StatusCode::CREATED, Json(Envelope::ok(contact))))
}

pub async fn list_contacts(State(state): State<AppState>) -> Reply<Vec<Contact>> {
    let contacts = with_store(&state, |store| store.list()).await?;
    Ok((StatusCode::OK, Json(Envelope::listed(contacts))))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ContactFields>, JsonRejection>,
) -> Reply<Contact> {
    let id = parse_id(&id)?;
    let Json(fields) = body.map_err(bad_body)?;
    let contact = with_store(&state, move |store| store.update(id, &fields)).await?;
    Ok((StatusCode::OK, Json(Envelope::ok(contact))))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Reply<Empty> {
    let id = parse_id(&id)?;
    with_store(&state, move |store| store.delete(id)).await?;
    Ok((StatusCode::OK, Json(Envelope::ok(Empty {}))))
}

/// Run one store operation under the lock, off the async workers
async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, ApiFailure>
where
    T: Send + 'static,
    F: FnOnce(&mut Store) -> StoreResult<T> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    let result = tokio::task::spawn_blocking(move || {
        let mut store = store.lock().map_err(|_| StoreError::Poisoned)?;
        op(&mut *store)
    })
    .await
    .map_err(|e| {
        error!("Store task failed: {}", e);
        ApiFailure::Internal
    })?;

    Ok(result?)
}

/// A malformed ID cannot name a stored contact
fn parse_id(raw: &str) -> Result<Uuid, ApiFailure> {
    Uuid::parse_str(raw).map_err(|_| {
        debug!("Rejecting malformed contact id {:?}", raw);
        ApiFailure::NotFound
    })
}

fn bad_body(rejection: JsonRejection) -> ApiFailure {
    debug!("Rejecting request body: {}", rejection);
    ApiFailure::BadRequest(vec![format!("Invalid request body: {}", rejection.body_text())])
}
