//! Contact validation rules
//!
//! The single home for every rule that gates a contact write. The store runs
//! [`validate`] before each insert and update; client forms run [`precheck`]
//! to fail fast before any request is sent. Both sides share the phone and
//! email helpers defined here.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use thiserror::Error;

use crate::models::ContactFields;

/// Number of digits a phone number must have
pub const PHONE_DIGITS: usize = 10;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please provide a valid email";
pub const PHONE_REQUIRED: &str = "Phone number is required";
pub const PHONE_LENGTH: &str = "Phone number must be exactly 10 digits";

/// Client-side message for the loose email check
pub const EMAIL_FORMAT: &str = "Invalid email format";

/// A contact field subject to validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        };
        f.write_str(name)
    }
}

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: Field,
    pub message: &'static str,
}

/// One or more broken rules, in field order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Human-readable messages, one per violation
    pub fn messages(&self) -> Vec<String> {
        self.violations
            .iter()
            .map(|v| v.message.to_string())
            .collect()
    }

    /// Whether a given field is among the violations
    pub fn has(&self, field: Field) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_messages(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalized field values that passed every rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Validate and normalize a complete set of fields
///
/// Name and phone are trimmed, email is lowercased, a missing message
/// becomes empty. Every broken rule is reported, not just the first.
pub fn validate(fields: &ContactFields) -> Result<ValidContact, ValidationError> {
    let mut violations = Vec::new();

    let name = fields.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        violations.push(Violation {
            field: Field::Name,
            message: NAME_REQUIRED,
        });
    }

    let email = fields.email.as_deref().unwrap_or("").to_lowercase();
    if email.is_empty() {
        violations.push(Violation {
            field: Field::Email,
            message: EMAIL_REQUIRED,
        });
    } else if !is_valid_email(&email) {
        violations.push(Violation {
            field: Field::Email,
            message: EMAIL_INVALID,
        });
    }

    let phone = fields.phone.as_deref().unwrap_or("").trim().to_string();
    if phone.is_empty() {
        violations.push(Violation {
            field: Field::Phone,
            message: PHONE_REQUIRED,
        });
    } else if !is_valid_phone(&phone) {
        violations.push(Violation {
            field: Field::Phone,
            message: PHONE_LENGTH,
        });
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    Ok(ValidContact {
        name,
        email,
        phone,
        message: fields.message.clone().unwrap_or_default(),
    })
}

/// Fast client-side check, returning the first failing rule's message
///
/// Uses the loose email shape; the server's grammar stays authoritative.
pub fn precheck(name: &str, email: &str, phone: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err(NAME_REQUIRED);
    }
    if !looks_like_email(email) {
        return Err(EMAIL_FORMAT);
    }
    if phone.len() != PHONE_DIGITS {
        return Err(PHONE_LENGTH);
    }
    Ok(())
}

/// Strip everything but ASCII digits
pub fn sanitize_phone(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Exactly [`PHONE_DIGITS`] ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.bytes().all(|b| b.is_ascii_digit())
}

/// Server grammar: word runs joined by single `.` or `-`, ending in a 2-3 letter label
static STRICT_EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.[A-Za-z]{2,3})+$").ok()
});

/// Client shape: `x@y.z` with no whitespace
static LOOSE_EMAIL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").ok());

/// Strict email grammar
///
/// Local part and domain are runs of word characters joined by single `.`
/// or `-`. The domain must end in `.` followed by a 2-3 letter label.
pub fn is_valid_email(email: &str) -> bool {
    STRICT_EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

/// Loose `x@y.z` shape with no whitespace anywhere
pub fn looks_like_email(email: &str) -> bool {
    LOOSE_EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}
