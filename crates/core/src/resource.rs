//! Request schemas for creating and updating resources.
//!
//! Each operation has its own validator that turns raw JSON input into a typed
//! request or a full list of field violations. Fields not named here are
//! dropped without complaint.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{
    contains_nul, field, is_blank, length_within, optional_bool, Field, RawInput, Violations,
};

/// Entity label used in not-found errors.
pub const ENTITY: &str = "Resource";

/// Maximum length of a resource name, in characters.
pub const MAX_NAME_LENGTH: u64 = 255;

/// Status applied on create when the client omits it.
pub const DEFAULT_STATUS: bool = true;

pub const MSG_NAME_REQUIRED: &str = "Resource name is required";
pub const MSG_NAME_EMPTY: &str = "Resource name cannot be empty";
pub const MSG_NAME_NOT_STRING: &str = "name must be a string";
pub const MSG_NAME_TOO_LONG: &str = "Resource name must not exceed 255 characters";
pub const MSG_NAME_NUL: &str = "name must not contain NUL characters";
pub const MSG_DESCRIPTION_NOT_STRING: &str = "description must be a string";
pub const MSG_DESCRIPTION_NUL: &str = "description must not contain NUL characters";
pub const MSG_STATUS_NOT_BOOLEAN: &str = "status must be a boolean value";
pub const MSG_INVALID_ID: &str = "Invalid resource ID";

/// Validated input for creating a resource.
///
/// `status` stays `None` when omitted; the service applies [`DEFAULT_STATUS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResource {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<bool>,
}

/// Validated input for a partial update. `None` means "leave untouched".
///
/// `description` is doubly optional: `Some(None)` is an explicit `null` from
/// the client and clears the stored description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateResource {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<bool>,
}

impl UpdateResource {
    /// True when the request carries no field to change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Validate a create request. `name` is mandatory.
pub fn validate_create(input: &RawInput) -> Result<CreateResource, CoreError> {
    let mut violations = Violations::new();

    let name = match field(input, "name") {
        Field::Absent | Field::Null => {
            violations.add("name", MSG_NAME_REQUIRED);
            None
        }
        Field::Present(value) => check_name(value, MSG_NAME_REQUIRED, &mut violations),
    };

    let description = match field(input, "description") {
        Field::Absent | Field::Null => None,
        Field::Present(value) => check_description(value, &mut violations),
    };

    let status = optional_bool(input, "status", MSG_STATUS_NOT_BOOLEAN, &mut violations);

    violations.finish(CreateResource {
        name: name.unwrap_or_default(),
        description,
        status,
    })
}

/// Validate an update request. Every field is optional, but a `name` that is
/// present must still be a non-blank string within the length limit.
pub fn validate_update(input: &RawInput) -> Result<UpdateResource, CoreError> {
    let mut violations = Violations::new();

    let name = match field(input, "name") {
        Field::Absent => None,
        Field::Null => {
            violations.add("name", MSG_NAME_EMPTY);
            None
        }
        Field::Present(value) => check_name(value, MSG_NAME_EMPTY, &mut violations),
    };

    let description = match field(input, "description") {
        Field::Absent => None,
        Field::Null => Some(None),
        Field::Present(value) => check_description(value, &mut violations).map(Some),
    };

    let status = match field(input, "status") {
        Field::Absent => None,
        Field::Null => {
            violations.add("status", MSG_STATUS_NOT_BOOLEAN);
            None
        }
        Field::Present(_) => optional_bool(input, "status", MSG_STATUS_NOT_BOOLEAN, &mut violations),
    };

    violations.finish(UpdateResource {
        name,
        description,
        status,
    })
}

/// Parse a resource id path segment.
///
/// Anything that is not a plain base-10 integer is rejected before any
/// repository call is made.
pub fn parse_resource_id(raw: &str) -> Result<DbId, CoreError> {
    raw.parse::<DbId>()
        .map_err(|_| CoreError::InvalidInput(MSG_INVALID_ID.to_string()))
}

fn check_name(value: &Value, blank_message: &str, violations: &mut Violations) -> Option<String> {
    let Value::String(name) = value else {
        violations.add("name", MSG_NAME_NOT_STRING);
        return None;
    };
    if is_blank(name) {
        violations.add("name", blank_message);
        return None;
    }
    if !length_within(name, 1, MAX_NAME_LENGTH) {
        violations.add("name", MSG_NAME_TOO_LONG);
        return None;
    }
    if contains_nul(name) {
        violations.add("name", MSG_NAME_NUL);
        return None;
    }
    Some(name.clone())
}

fn check_description(value: &Value, violations: &mut Violations) -> Option<String> {
    match value {
        Value::String(description) if contains_nul(description) => {
            violations.add("description", MSG_DESCRIPTION_NUL);
            None
        }
        Value::String(description) => Some(description.clone()),
        _ => {
            violations.add("description", MSG_DESCRIPTION_NOT_STRING);
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn raw(value: Value) -> RawInput {
        value.as_object().cloned().unwrap_or_default()
    }

    fn violation_fields(err: CoreError) -> Vec<(String, String)> {
        match err {
            CoreError::Validation(entries) => entries
                .into_iter()
                .map(|entry| (entry.field, entry.message))
                .collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_accepts_full_payload() {
        let req = validate_create(&raw(json!({
            "name": "Test Resource",
            "description": "Test Description",
            "status": true
        })))
        .unwrap();

        assert_eq!(req.name, "Test Resource");
        assert_eq!(req.description.as_deref(), Some("Test Description"));
        assert_eq!(req.status, Some(true));
    }

    #[test]
    fn create_leaves_status_unset_when_omitted() {
        let req = validate_create(&raw(json!({"name": "Only name"}))).unwrap();
        assert_eq!(req.status, None);
        assert_eq!(req.description, None);
    }

    #[test]
    fn create_coerces_string_status() {
        let req = validate_create(&raw(json!({"name": "x", "status": "false"}))).unwrap();
        assert_eq!(req.status, Some(false));
    }

    #[test]
    fn create_requires_name() {
        let fields = violation_fields(validate_create(&raw(json!({"description": "d"}))).unwrap_err());
        assert_eq!(fields, vec![("name".to_string(), MSG_NAME_REQUIRED.to_string())]);
    }

    #[test]
    fn create_rejects_blank_name() {
        let fields = violation_fields(validate_create(&raw(json!({"name": "   "}))).unwrap_err());
        assert_eq!(fields[0].0, "name");
        assert_eq!(fields[0].1, MSG_NAME_REQUIRED);
    }

    #[test]
    fn create_rejects_long_name() {
        let long = "a".repeat(256);
        let fields = violation_fields(validate_create(&raw(json!({"name": long}))).unwrap_err());
        assert_eq!(fields[0], ("name".to_string(), MSG_NAME_TOO_LONG.to_string()));
    }

    #[test]
    fn create_accepts_name_at_limit() {
        let name = "a".repeat(255);
        assert!(validate_create(&raw(json!({"name": name}))).is_ok());
    }

    #[test]
    fn create_collects_every_violation() {
        let fields = violation_fields(
            validate_create(&raw(json!({"name": 5, "description": [], "status": "maybe"})))
                .unwrap_err(),
        );
        let names: Vec<&str> = fields.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(names, vec!["name", "description", "status"]);
    }

    #[test]
    fn create_drops_unknown_fields() {
        let req = validate_create(&raw(json!({"name": "x", "id": 99, "created_at": "now"}))).unwrap();
        assert_eq!(req.name, "x");
    }

    #[test]
    fn update_accepts_empty_payload() {
        let req = validate_update(&raw(json!({}))).unwrap();
        assert!(req.is_empty());
    }

    #[test]
    fn update_keeps_false_status_distinct_from_absent() {
        let req = validate_update(&raw(json!({"status": false}))).unwrap();
        assert_eq!(req.status, Some(false));
        assert_eq!(req.name, None);
        assert_eq!(req.description, None);
    }

    #[test]
    fn update_null_description_clears() {
        let req = validate_update(&raw(json!({"description": null}))).unwrap();
        assert_eq!(req.description, Some(None));
    }

    #[test]
    fn update_rejects_empty_name() {
        let fields = violation_fields(validate_update(&raw(json!({"name": ""}))).unwrap_err());
        assert_eq!(fields, vec![("name".to_string(), MSG_NAME_EMPTY.to_string())]);
    }

    #[test]
    fn update_rejects_null_status() {
        let fields = violation_fields(validate_update(&raw(json!({"status": null}))).unwrap_err());
        assert_eq!(fields[0].0, "status");
    }

    #[test]
    fn nul_characters_are_rejected_in_text_fields() {
        let fields = violation_fields(
            validate_create(&raw(json!({"name": "a\u{0}b", "description": "x\u{0}"}))).unwrap_err(),
        );
        assert_eq!(
            fields,
            vec![
                ("name".to_string(), MSG_NAME_NUL.to_string()),
                ("description".to_string(), MSG_DESCRIPTION_NUL.to_string()),
            ]
        );

        let fields =
            violation_fields(validate_update(&raw(json!({"description": "\u{0}"}))).unwrap_err());
        assert_eq!(fields[0].0, "description");
    }

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_resource_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_garbage() {
        for raw in ["invalid", "12abc", "", "1.5"] {
            assert_matches!(
                parse_resource_id(raw),
                Err(CoreError::InvalidInput(msg)) if msg == MSG_INVALID_ID
            );
        }
    }
}
