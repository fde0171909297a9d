//! Contact command handlers
//!
//! These drive the same form and list controllers as the TUI, one
//! operation per invocation.

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use contacts_core::validation::PHONE_LENGTH;
use contacts_core::{Contact, ContactApi};

use crate::client::list::{DELETE_PROMPT, DELETE_TITLE};
use crate::client::{FormController, FormField, ListController};
use crate::commands::confirm;
use crate::output::Output;

/// Field values given on the command line
#[derive(Debug, Default, Clone)]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl ContactInput {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.message.is_none()
    }

    fn apply(&self, form: &mut FormController) -> Result<()> {
        let values = [
            (FormField::Name, &self.name),
            (FormField::Email, &self.email),
            (FormField::Phone, &self.phone),
            (FormField::Message, &self.message),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                if !form.set_field(field, value) {
                    bail!("{}", PHONE_LENGTH);
                }
            }
        }
        Ok(())
    }
}

/// List all contacts, newest first
pub async fn list(api: &dyn ContactApi, output: &Output) -> Result<()> {
    let contacts = api.list().await.context("Failed to fetch contacts")?;
    output.print_contacts(&contacts);
    Ok(())
}

/// Create a contact
pub async fn add(api: &dyn ContactApi, input: ContactInput, output: &Output) -> Result<()> {
    let mut form = FormController::new();
    input.apply(&mut form)?;
    submit(&mut form, api, output).await
}

/// Change some fields of an existing contact
pub async fn edit(
    api: &dyn ContactApi,
    id: String,
    input: ContactInput,
    output: &Output,
) -> Result<()> {
    if input.is_empty() {
        bail!("Nothing to change. Pass --name, --email, --phone or --message.");
    }

    let mut list = ListController::new();
    list.replace(api.list().await.context("Failed to fetch contacts")?);
    let uuid = resolve_id(&id, list.contacts())?;

    let mut form = FormController::new();
    if !list.edit(uuid, &mut form) {
        bail!("No contact found matching: {}", id);
    }
    input.apply(&mut form)?;
    submit(&mut form, api, output).await
}

/// Delete a contact after confirmation
pub async fn delete(api: &dyn ContactApi, id: String, yes: bool, output: &Output) -> Result<()> {
    let mut list = ListController::new();
    list.replace(api.list().await.context("Failed to fetch contacts")?);
    let uuid = resolve_id(&id, list.contacts())?;

    if !list.request_delete(uuid) {
        bail!("No contact found matching: {}", id);
    }

    if !yes {
        if let Some(contact) = list.find(uuid) {
            println!("{} <{}>", contact.name, contact.email);
        }
        if !confirm(&format!("{} {}", DELETE_TITLE, DELETE_PROMPT))? {
            list.cancel_delete();
            output.message("Cancelled.");
            return Ok(());
        }
    }

    match list.confirm_delete(api).await {
        Some(outcome) if outcome.notice.is_error() => bail!("{}", outcome.notice.text()),
        Some(outcome) => {
            output.notice(&outcome.notice);
            if output.is_quiet() {
                println!("{}", uuid);
            }
            Ok(())
        }
        None => bail!("Delete did not start"),
    }
}

async fn submit(form: &mut FormController, api: &dyn ContactApi, output: &Output) -> Result<()> {
    let outcome = form.submit(api).await?;
    if outcome.notice.is_error() {
        bail!("{}", outcome.notice.text());
    }

    output.notice(&outcome.notice);
    if let Some(ref contact) = outcome.saved {
        output.print_contact(contact);
    }
    Ok(())
}

/// Resolve a full ID or a unique prefix of one
fn resolve_id(id: &str, contacts: &[Contact]) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(id) {
        return Ok(uuid);
    }

    let matches: Vec<_> = contacts
        .iter()
        .filter(|c| c.id.to_string().starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No contact found matching: {}", id),
        1 => Ok(matches[0].id),
        _ => {
            eprintln!("Multiple contacts match '{}':", id);
            for contact in &matches {
                eprintln!("  {} - {}", contact.id, contact.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}
