//! Data models for Contacts
//!
//! Defines the persisted `Contact` record and `ContactFields`, the
//! partially-filled payload used for create and update requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored contact record
///
/// Serialized with camelCase keys, matching the HTTP wire shape
/// `{id, name, email, phone, message, createdAt}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique identifier, assigned by the store
    pub id: Uuid,
    /// Display name (trimmed, non-empty)
    pub name: String,
    /// Lowercased email address
    pub email: String,
    /// Exactly 10 decimal digits
    pub phone: String,
    /// Free-form message, empty when not provided
    #[serde(default)]
    pub message: String,
    /// When this contact was created
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Short form of the ID used in listings
    pub fn short_id(&self) -> String {
        self.id.to_string()[..8].to_string()
    }

    /// The editable content of this record as a full set of fields
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            message: Some(self.message.clone()),
        }
    }
}

/// Content fields of a contact, any of which may be absent
///
/// On create, a missing required field is a validation failure. On update,
/// a missing field keeps the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ContactFields {
    /// Fields for a new contact
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
            message: None,
        }
    }

    /// Set the optional message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Overlay these fields onto an existing record
    ///
    /// Fields present here win; absent fields fall back to `base`.
    pub fn merged_onto(&self, base: &Contact) -> ContactFields {
        ContactFields {
            name: self.name.clone().or_else(|| Some(base.name.clone())),
            email: self.email.clone().or_else(|| Some(base.email.clone())),
            phone: self.phone.clone().or_else(|| Some(base.phone.clone())),
            message: self.message.clone().or_else(|| Some(base.message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: "Ann Lee".to_string(),
            email: "ann.lee@example.com".to_string(),
            phone: "9876543210".to_string(),
            message: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_contact_wire_keys_are_camel_case() {
        let contact = sample();
        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
        assert_eq!(json["email"], "ann.lee@example.com");
    }

    #[test]
    fn test_contact_message_defaults_when_missing() {
        let json = r#"{
            "id": "8f7f3d0e-2b4a-4a49-9a35-0e8f6f7a1b2c",
            "name": "Ann",
            "email": "a@b.co",
            "phone": "0123456789",
            "createdAt": "2025-01-01T00:00:00Z"
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.message, "");
    }

    #[test]
    fn test_fields_skip_absent_values() {
        let fields = ContactFields {
            phone: Some("123".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"phone":"123"}"#);
    }

    #[test]
    fn test_merged_onto_keeps_stored_values() {
        let contact = sample();
        let patch = ContactFields {
            phone: Some("123".to_string()),
            ..Default::default()
        };
        let merged = patch.merged_onto(&contact);
        assert_eq!(merged.name.as_deref(), Some("Ann Lee"));
        assert_eq!(merged.email.as_deref(), Some("ann.lee@example.com"));
        assert_eq!(merged.phone.as_deref(), Some("123"));
        assert_eq!(merged.message.as_deref(), Some(""));
    }

    #[test]
    fn test_short_id() {
        let contact = sample();
        assert_eq!(contact.short_id().len(), 8);
        assert!(contact.id.to_string().starts_with(&contact.short_id()));
    }
}
