//! Contact list state
//!
//! Holds the latest snapshot from the sync loop, a cursor, which record's
//! message is expanded, and the two-step delete confirmation.

use uuid::Uuid;

use contacts_core::{ApiError, Contact, ContactApi};

use super::{FormController, MutationEvent, Notice};

pub const EMPTY_PLACEHOLDER: &str = "No contacts yet. Add one to get started!";
pub const DELETE_TITLE: &str = "Delete Contact?";
pub const DELETE_PROMPT: &str = "Are you sure? This cannot be undone.";
pub const DELETED_NOTICE: &str = "Contact deleted";
pub const DELETE_FAILED_NOTICE: &str = "Failed to delete";

/// Result of a finished delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub notice: Notice,
    pub mutation: Option<MutationEvent>,
}

#[derive(Debug, Default)]
pub struct ListController {
    contacts: Vec<Contact>,
    cursor: usize,
    expanded: Option<Uuid>,
    pending_delete: Option<Uuid>,
    deleting: Option<Uuid>,
}

impl ListController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a fresh snapshot, keeping the cursor on the same record if it survived
    pub fn replace(&mut self, contacts: Vec<Contact>) {
        let selected = self.selected().map(|c| c.id);
        self.contacts = contacts;
        self.cursor = selected
            .and_then(|id| self.position(id))
            .unwrap_or(self.cursor)
            .min(self.contacts.len().saturating_sub(1));
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Contact> {
        self.contacts.get(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.contacts.len() {
            self.cursor += 1;
        }
    }

    pub fn find(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    /// Expand `id`'s message, or collapse it if already expanded
    ///
    /// Only one message is expanded at a time.
    pub fn toggle_expand(&mut self, id: Uuid) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    pub fn is_expanded(&self, id: Uuid) -> bool {
        self.expanded == Some(id)
    }

    /// Load `id` into the form for editing
    pub fn edit(&self, id: Uuid, form: &mut FormController) -> bool {
        match self.find(id) {
            Some(contact) => {
                form.begin_edit(contact);
                true
            }
            None => false,
        }
    }

    /// Open the delete confirmation for `id`
    ///
    /// Ignored while a delete is in flight.
    pub fn request_delete(&mut self, id: Uuid) -> bool {
        if self.deleting.is_some() || self.find(id).is_none() {
            return false;
        }
        self.pending_delete = Some(id);
        true
    }

    /// Close the confirmation without calling the service
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Record awaiting confirmation, if any
    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting.is_some()
    }

    /// Confirm the pending delete, returning the id to send
    ///
    /// Returns `None` with nothing pending or a delete already in flight.
    pub fn begin_delete(&mut self) -> Option<Uuid> {
        if self.deleting.is_some() {
            return None;
        }
        let id = self.pending_delete?;
        self.deleting = Some(id);
        Some(id)
    }

    /// Apply the service's answer and close the confirmation
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> DeleteOutcome {
        let id = self.deleting.take();
        self.pending_delete = None;

        match (result, id) {
            (Ok(()), Some(id)) => {
                if self.expanded == Some(id) {
                    self.expanded = None;
                }
                DeleteOutcome {
                    notice: Notice::Success(DELETED_NOTICE.to_string()),
                    mutation: Some(MutationEvent::Deleted(id)),
                }
            }
            (Ok(()), None) => DeleteOutcome {
                notice: Notice::Success(DELETED_NOTICE.to_string()),
                mutation: None,
            },
            (Err(err), _) => {
                tracing::debug!("Delete failed: {}", err);
                DeleteOutcome {
                    notice: Notice::Error(DELETE_FAILED_NOTICE.to_string()),
                    mutation: None,
                }
            }
        }
    }

    /// Begin, send and finish the pending delete in one step
    pub async fn confirm_delete(&mut self, api: &dyn ContactApi) -> Option<DeleteOutcome> {
        let id = self.begin_delete()?;
        let result = api.delete(id).await;
        Some(self.finish_delete(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{contact, StoreApi};
    use crate::client::FormMode;

    fn three() -> Vec<Contact> {
        vec![
            contact("Cy", "cy@example.com", "3333333333"),
            contact("Bo", "bo@example.com", "2222222222"),
            contact("Ann", "ann@example.com", "1111111111"),
        ]
    }

    #[test]
    fn test_empty_list() {
        let list = ListController::new();
        assert!(list.is_empty());
        assert!(list.selected().is_none());
        assert_eq!(EMPTY_PLACEHOLDER, "No contacts yet. Add one to get started!");
    }

    #[test]
    fn test_cursor_movement_is_clamped() {
        let mut list = ListController::new();
        list.replace(three());
        list.move_up();
        assert_eq!(list.cursor(), 0);
        list.move_down();
        list.move_down();
        list.move_down();
        assert_eq!(list.cursor(), 2);
    }

    #[test]
    fn test_replace_follows_selected_record() {
        let mut list = ListController::new();
        let contacts = three();
        list.replace(contacts.clone());
        list.move_down();
        let bo = list.selected().unwrap().id;

        let mut newer = vec![contact("Dee", "dee@example.com", "4444444444")];
        newer.extend(contacts);
        list.replace(newer);
        assert_eq!(list.selected().unwrap().id, bo);

        list.replace(Vec::new());
        assert_eq!(list.cursor(), 0);
        assert!(list.selected().is_none());
    }

    #[test]
    fn test_toggle_expand_keeps_one_open() {
        let mut list = ListController::new();
        let contacts = three();
        list.replace(contacts.clone());

        list.toggle_expand(contacts[0].id);
        assert!(list.is_expanded(contacts[0].id));
        list.toggle_expand(contacts[1].id);
        assert!(!list.is_expanded(contacts[0].id));
        assert!(list.is_expanded(contacts[1].id));
        list.toggle_expand(contacts[1].id);
        assert!(!list.is_expanded(contacts[1].id));
    }

    #[test]
    fn test_edit_loads_form() {
        let mut list = ListController::new();
        let contacts = three();
        list.replace(contacts.clone());

        let mut form = FormController::new();
        assert!(list.edit(contacts[1].id, &mut form));
        assert_eq!(form.mode(), FormMode::Edit(contacts[1].id));
        assert_eq!(form.buffer().name, "Bo");
        assert!(!list.edit(Uuid::new_v4(), &mut form));
    }

    #[tokio::test]
    async fn test_cancel_makes_no_call() {
        let api = StoreApi::new();
        let ann = api.seed("Ann", "ann@example.com", "1111111111");
        let mut list = ListController::new();
        list.replace(api.snapshot());

        assert!(list.request_delete(ann.id));
        assert_eq!(list.pending_delete(), Some(ann.id));
        list.cancel_delete();
        assert_eq!(list.pending_delete(), None);
        assert!(list.confirm_delete(&api).await.is_none());
        assert_eq!(api.delete_calls(), 0);
        assert_eq!(api.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmed_delete() {
        let api = StoreApi::new();
        let ann = api.seed("Ann", "ann@example.com", "1111111111");
        let mut list = ListController::new();
        list.replace(api.snapshot());
        list.toggle_expand(ann.id);

        list.request_delete(ann.id);
        let outcome = list.confirm_delete(&api).await.unwrap();
        assert_eq!(outcome.notice, Notice::Success(DELETED_NOTICE.to_string()));
        assert_eq!(outcome.mutation, Some(MutationEvent::Deleted(ann.id)));
        assert_eq!(list.pending_delete(), None);
        assert!(!list.is_deleting());
        assert!(!list.is_expanded(ann.id));
        assert!(api.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_delete_of_vanished_record_fails() {
        let api = StoreApi::new();
        let ann = api.seed("Ann", "ann@example.com", "1111111111");
        let mut list = ListController::new();
        list.replace(api.snapshot());
        api.remove(ann.id);

        list.request_delete(ann.id);
        let outcome = list.confirm_delete(&api).await.unwrap();
        assert_eq!(outcome.notice, Notice::Error(DELETE_FAILED_NOTICE.to_string()));
        assert!(outcome.mutation.is_none());
        assert_eq!(list.pending_delete(), None);
        assert!(!list.is_deleting());
    }

    #[test]
    fn test_requests_ignored_while_deleting() {
        let mut list = ListController::new();
        let contacts = three();
        list.replace(contacts.clone());

        list.request_delete(contacts[0].id);
        assert_eq!(list.begin_delete(), Some(contacts[0].id));
        assert_eq!(list.begin_delete(), None);
        assert!(!list.request_delete(contacts[1].id));
        assert_eq!(list.pending_delete(), Some(contacts[0].id));

        let outcome = list.finish_delete(Ok(()));
        assert_eq!(outcome.mutation, Some(MutationEvent::Deleted(contacts[0].id)));
        assert!(list.request_delete(contacts[1].id));
    }
}
