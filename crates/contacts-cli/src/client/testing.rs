//! In-process `ContactApi` backed by an in-memory store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Semaphore;
use uuid::Uuid;

use contacts_core::api::{NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE};
use contacts_core::{ApiError, Contact, ContactApi, ContactFields, Store, StoreError};

const OPEN_PERMITS: usize = 1024;

pub fn contact(name: &str, email: &str, phone: &str) -> Contact {
    Contact {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        message: String::new(),
        created_at: Utc::now(),
    }
}

pub struct StoreApi {
    store: Mutex<Store>,
    gate: Semaphore,
    failure: Mutex<Option<ApiError>>,
    list_calls: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl StoreApi {
    pub fn new() -> Self {
        Self::with_permits(OPEN_PERMITS)
    }

    /// Calls block until [`StoreApi::release`]
    pub fn held() -> Self {
        Self::with_permits(0)
    }

    fn with_permits(permits: usize) -> Self {
        Self {
            store: Mutex::new(Store::open_in_memory().unwrap()),
            gate: Semaphore::new(permits),
            failure: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.add_permits(OPEN_PERMITS);
    }

    /// Every following call fails with `err`
    pub fn fail_with(&self, err: ApiError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn seed(&self, name: &str, email: &str, phone: &str) -> Contact {
        self.store
            .lock()
            .unwrap()
            .create(&ContactFields::new(name, email, phone))
            .unwrap()
    }

    /// Delete behind the client's back
    pub fn remove(&self, id: Uuid) {
        self.store.lock().unwrap().delete(id).unwrap();
    }

    pub fn snapshot(&self) -> Vec<Contact> {
        self.store.lock().unwrap().list().unwrap()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, counter: &AtomicUsize) -> Result<(), ApiError> {
        counter.fetch_add(1, Ordering::SeqCst);
        let _permit = self.gate.acquire().await.unwrap();
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn to_api_error(err: StoreError) -> ApiError {
    match err {
        StoreError::Validation(v) => ApiError::Validation(v.messages()),
        StoreError::NotFound(_) => ApiError::NotFound(NOT_FOUND_MESSAGE.to_string()),
        _ => ApiError::Server(SERVER_ERROR_MESSAGE.to_string()),
    }
}

#[async_trait]
impl ContactApi for StoreApi {
    async fn list(&self) -> Result<Vec<Contact>, ApiError> {
        self.enter(&self.list_calls).await?;
        self.store.lock().unwrap().list().map_err(to_api_error)
    }

    async fn create(&self, fields: &ContactFields) -> Result<Contact, ApiError> {
        self.enter(&self.create_calls).await?;
        self.store.lock().unwrap().create(fields).map_err(to_api_error)
    }

    async fn update(&self, id: Uuid, fields: &ContactFields) -> Result<Contact, ApiError> {
        self.enter(&self.update_calls).await?;
        self.store
            .lock()
            .unwrap()
            .update(id, fields)
            .map_err(to_api_error)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.enter(&self.delete_calls).await?;
        self.store.lock().unwrap().delete(id).map_err(to_api_error)
    }
}
