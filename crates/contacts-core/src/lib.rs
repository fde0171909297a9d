//! Contacts Core Library
//!
//! Core functionality for Contacts, a small personal contact manager:
//! a validated SQLite-backed store on the server side and an API client on
//! the client side, sharing one set of models and validation rules.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open(&Config::load()?)?;
//!
//! let contact = store.create(&ContactFields::new("Ann Lee", "ann@example.com", "9876543210"))?;
//! let contacts = store.list()?;
//! ```
//!
//! # Modules
//!
//! - `store`: Contact store (main entry point for the server)
//! - `models`: Contact record and field payloads
//! - `validation`: Field rules shared by store and client forms
//! - `storage`: SQLite schema and storage errors
//! - `api`: Wire envelope, `ContactApi` trait and HTTP client
//! - `config`: Application configuration

pub mod api;
pub mod config;
pub mod models;
pub mod storage;
pub mod store;
pub mod validation;

pub use api::{ApiError, ContactApi, HttpClient};
pub use config::Config;
pub use models::{Contact, ContactFields};
pub use storage::{StoreError, StoreResult};
pub use store::Store;
pub use validation::{ValidationError, Violation};
