//! Response envelope shared by server and client
//!
//! Every API response is `{success, data?, count?, error?}`. Validation
//! failures carry a list of messages; every other failure carries one string.

use serde::{Deserialize, Serialize};

/// Error text for not-found responses
pub const NOT_FOUND_MESSAGE: &str = "Contact not found";

/// Error text for unclassified server faults
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Uniform response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            count: None,
            data: Some(data),
            error: None,
        }
    }

    /// Failed response carrying `error`
    pub fn failure(error: ErrorPayload) -> Self {
        Self {
            success: false,
            count: None,
            data: None,
            error: Some(error),
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// Successful list response with its count
    pub fn listed(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            error: None,
        }
    }
}

/// The `error` member: a single message or a list of validation messages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ErrorPayload {
    One(String),
    Many(Vec<String>),
}

impl ErrorPayload {
    /// All messages, in order
    pub fn messages(&self) -> Vec<String> {
        match self {
            ErrorPayload::One(message) => vec![message.clone()],
            ErrorPayload::Many(messages) => messages.clone(),
        }
    }
}

/// Body of a successful delete: `{}`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contact;
    use serde_json::json;

    #[test]
    fn test_list_envelope_shape() {
        let envelope = Envelope::listed(vec!["a", "b"]);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": true, "count": 2, "data": ["a", "b"]}));
    }

    #[test]
    fn test_delete_envelope_shape() {
        let value = serde_json::to_value(Envelope::ok(Empty {})).unwrap();
        assert_eq!(value, json!({"success": true, "data": {}}));
    }

    #[test]
    fn test_failure_shapes() {
        let one: Envelope<Empty> = Envelope::failure(ErrorPayload::One(NOT_FOUND_MESSAGE.into()));
        assert_eq!(
            serde_json::to_value(&one).unwrap(),
            json!({"success": false, "error": "Contact not found"})
        );

        let many: Envelope<Empty> =
            Envelope::failure(ErrorPayload::Many(vec!["a".into(), "b".into()]));
        assert_eq!(
            serde_json::to_value(&many).unwrap(),
            json!({"success": false, "error": ["a", "b"]})
        );
    }

    #[test]
    fn test_error_payload_parses_both_forms() {
        let one: Envelope<Empty> =
            serde_json::from_str(r#"{"success":false,"error":"Server Error"}"#).unwrap();
        assert_eq!(one.error.unwrap().messages(), vec!["Server Error"]);

        let many: Envelope<Empty> =
            serde_json::from_str(r#"{"success":false,"error":["x","y"]}"#).unwrap();
        assert_eq!(many.error.unwrap().messages(), vec!["x", "y"]);
    }

    #[test]
    fn test_contact_envelope_parses_create_response() {
        let body = r#"{
            "success": true,
            "data": {
                "id": "8f7f3d0e-2b4a-4a49-9a35-0e8f6f7a1b2c",
                "name": "Ann Lee",
                "email": "ann.lee@example.com",
                "phone": "9876543210",
                "message": "",
                "createdAt": "2025-01-01T00:00:00Z"
            }
        }"#;
        let envelope: Envelope<Contact> = serde_json::from_str(body).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.unwrap().email, "ann.lee@example.com");

        let rejected: Envelope<Contact> =
            serde_json::from_str(r#"{"success":false,"error":["Name is required"]}"#).unwrap();
        assert!(rejected.data.is_none());
        assert_eq!(rejected.error.unwrap().messages(), vec!["Name is required"]);
    }
}
