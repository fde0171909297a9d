//! Contacts HTTP API
//!
//! Serves the contact store as a JSON API under `/api/contacts`. Every
//! response uses the envelope from `contacts_core::api`.
//!
//! ## Routes
//!
//! - `GET /` - liveness check
//! - `POST /api/contacts` - create (201, or 400 with all violations)
//! - `GET /api/contacts` - list newest first with a count
//! - `PUT /api/contacts/{id}` - update (404 when missing, 400 on violations)
//! - `DELETE /api/contacts/{id}` - delete (404 when missing)

mod handlers;
mod response;

use std::future::Future;
use std::sync::{Arc, Mutex};

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use contacts_core::Store;

pub use response::ApiFailure;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

/// Build the API router around `store`
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/api/contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/api/contacts/{id}",
            axum::routing::put(handlers::update_contact).delete(handlers::delete_contact),
        )
        .with_state(AppState::new(store))
}

/// Serve `app` on `listener` until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Contacts API listening on http://{}", addr);
    }
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
