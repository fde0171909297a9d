//! Client-side controllers
//!
//! Frontend-agnostic state machines shared by the TUI and the one-shot
//! commands:
//!
//! - `form`: the create/edit input buffer and submission state
//! - `list`: the current record set, message expansion and delete confirmation
//! - `sync`: the mutation bus and the loop that refetches after each mutation
//!
//! Controllers never talk to the terminal. Network calls go through a
//! `ContactApi`, and outcomes come back as `Notice`s plus an optional
//! `MutationEvent` for the caller to publish.

pub mod form;
pub mod list;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use form::{FormController, FormField, FormMode, SubmitBlocked, SubmitRequest};
pub use list::{ListController, EMPTY_PLACEHOLDER};
pub use sync::{MutationBus, MutationEvent, SyncLoop};

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}
