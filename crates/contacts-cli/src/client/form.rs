//! Create/edit form state
//!
//! One buffer serves both modes. Entering edit mode loads a record into
//! the buffer; a successful submit clears it and returns to create mode.
//! At most one submission is in flight at a time.

use thiserror::Error;
use uuid::Uuid;

use contacts_core::validation::{precheck, sanitize_phone, PHONE_DIGITS};
use contacts_core::{ApiError, Contact, ContactApi, ContactFields};

use super::{MutationEvent, Notice};

pub const CREATED_NOTICE: &str = "Contact saved successfully!";
pub const UPDATED_NOTICE: &str = "Contact updated successfully!";

/// Input fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Message => "Message",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Phone,
            FormField::Phone => FormField::Message,
            FormField::Message => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Message,
            FormField::Email => FormField::Name,
            FormField::Phone => FormField::Email,
            FormField::Message => FormField::Phone,
        }
    }
}

/// Whether a submit creates or updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(Uuid),
}

/// Raw text of the four inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormBuffer {
    pub name: String,
    pub email: String,
    phone: String,
    pub message: String,
}

impl FormBuffer {
    fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: sanitize_phone(&contact.phone),
            message: contact.message.clone(),
        }
    }

    /// Digits only, never more than ten
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
        }
    }

    fn to_fields(&self) -> ContactFields {
        ContactFields::new(&self.name, &self.email, &self.phone).with_message(&self.message)
    }
}

/// Why a submit did not start
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("A submission is already in progress")]
    InFlight,

    #[error("{0}")]
    Invalid(&'static str),
}

/// A service call prepared by [`FormController::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    Create(ContactFields),
    Update(Uuid, ContactFields),
}

impl SubmitRequest {
    pub async fn send(&self, api: &dyn ContactApi) -> Result<Contact, ApiError> {
        match self {
            SubmitRequest::Create(fields) => api.create(fields).await,
            SubmitRequest::Update(id, fields) => api.update(*id, fields).await,
        }
    }
}

/// Result of a finished submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub notice: Notice,
    pub saved: Option<Contact>,
    /// For the caller to publish on the mutation bus
    pub mutation: Option<MutationEvent>,
}

#[derive(Debug, Default)]
pub struct FormController {
    buffer: FormBuffer,
    editing: Option<Uuid>,
    in_flight: Option<FormMode>,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &FormBuffer {
        &self.buffer
    }

    pub fn mode(&self) -> FormMode {
        match self.editing {
            Some(id) => FormMode::Edit(id),
            None => FormMode::Create,
        }
    }

    /// Record being edited, if any
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Replace one field's text
    ///
    /// Phone input is reduced to its digits. Input with more than ten
    /// digits is rejected and the previous value kept; returns false then.
    pub fn set_field(&mut self, field: FormField, value: &str) -> bool {
        match field {
            FormField::Name => self.buffer.name = value.to_string(),
            FormField::Email => self.buffer.email = value.to_string(),
            FormField::Message => self.buffer.message = value.to_string(),
            FormField::Phone => {
                let digits = sanitize_phone(value);
                if digits.len() > PHONE_DIGITS {
                    return false;
                }
                self.buffer.phone = digits;
            }
        }
        true
    }

    pub fn push_char(&mut self, field: FormField, c: char) -> bool {
        let mut value = self.buffer.get(field).to_string();
        value.push(c);
        self.set_field(field, &value)
    }

    pub fn pop_char(&mut self, field: FormField) {
        let mut value = self.buffer.get(field).to_string();
        value.pop();
        self.set_field(field, &value);
    }

    /// Load `contact` into the buffer and switch to edit mode
    pub fn begin_edit(&mut self, contact: &Contact) {
        self.buffer = FormBuffer::from_contact(contact);
        self.editing = Some(contact.id);
    }

    /// Leave edit mode and clear the buffer
    pub fn cancel_edit(&mut self) {
        self.buffer = FormBuffer::default();
        self.editing = None;
    }

    /// First failing client-side rule, if any
    pub fn validate(&self) -> Result<(), &'static str> {
        precheck(&self.buffer.name, &self.buffer.email, &self.buffer.phone)
    }

    /// Check the buffer and mark a submission in flight
    ///
    /// Nothing is sent when this fails.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, SubmitBlocked> {
        if self.in_flight.is_some() {
            return Err(SubmitBlocked::InFlight);
        }
        self.validate().map_err(SubmitBlocked::Invalid)?;

        let mode = self.mode();
        let fields = self.buffer.to_fields();
        self.in_flight = Some(mode);
        Ok(match mode {
            FormMode::Create => SubmitRequest::Create(fields),
            FormMode::Edit(id) => SubmitRequest::Update(id, fields),
        })
    }

    /// Apply the service's answer to the submission in flight
    ///
    /// On success the buffer is cleared and edit mode left, unless the user
    /// switched to another record while the request was in flight. On
    /// failure the buffer is kept so the user can correct it.
    pub fn finish_submit(&mut self, result: Result<Contact, ApiError>) -> SubmitOutcome {
        let mode = self.in_flight.take().unwrap_or(FormMode::Create);

        match result {
            Ok(contact) => {
                if self.mode() == mode {
                    self.buffer = FormBuffer::default();
                    self.editing = None;
                }
                let (text, mutation) = match mode {
                    FormMode::Create => (CREATED_NOTICE, MutationEvent::Created(contact.clone())),
                    FormMode::Edit(_) => (UPDATED_NOTICE, MutationEvent::Updated(contact.clone())),
                };
                SubmitOutcome {
                    notice: Notice::Success(text.to_string()),
                    saved: Some(contact),
                    mutation: Some(mutation),
                }
            }
            Err(err) => {
                tracing::debug!("Submit failed: {}", err);
                SubmitOutcome {
                    notice: Notice::Error(err.user_message()),
                    saved: None,
                    mutation: None,
                }
            }
        }
    }

    /// Begin, send and finish in one step
    pub async fn submit(&mut self, api: &dyn ContactApi) -> Result<SubmitOutcome, SubmitBlocked> {
        let request = self.begin_submit()?;
        let result = request.send(api).await;
        Ok(self.finish_submit(result))
    }
}
