//! Field-level coercion and validation helpers.
//!
//! Request schemas read raw JSON input one field at a time through these
//! helpers. Every violation is recorded in a [`Violations`] collector so a
//! single response can report all problems at once. Fields a schema does not
//! read are simply never looked at, which makes each schema an allow-list.

use serde::Serialize;
use serde_json::{Map, Value};
use validator::ValidateLength;

use crate::error::CoreError;

/// Raw, untyped request input (JSON body or query string).
pub type RawInput = Map<String, Value>;

/// One rejected field and the reason(s) it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Accumulates violations across a whole request.
///
/// Multiple messages for the same field are merged into one entry, joined
/// with `", "`, and entries keep the order in which fields were first rejected.
#[derive(Debug, Default)]
pub struct Violations {
    entries: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|entry| entry.field == field) {
            Some(entry) => {
                entry.message.push_str(", ");
                entry.message.push_str(&message);
            }
            None => self.entries.push(FieldViolation {
                field: field.to_string(),
                message,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return `value` if nothing was recorded, otherwise a
    /// [`CoreError::Validation`] carrying every collected violation.
    pub fn finish<T>(self, value: T) -> Result<T, CoreError> {
        if self.entries.is_empty() {
            Ok(value)
        } else {
            Err(CoreError::Validation(self.entries))
        }
    }
}

/// Presence state of a single input field.
///
/// Partial updates need to tell "not sent" apart from "sent as null", so
/// lookups never collapse the two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    Absent,
    Null,
    Present(&'a Value),
}

/// Look up `name` in the raw input.
pub fn field<'a>(input: &'a RawInput, name: &str) -> Field<'a> {
    match input.get(name) {
        None => Field::Absent,
        Some(Value::Null) => Field::Null,
        Some(value) => Field::Present(value),
    }
}

/// Coerce a boolean-like value.
///
/// Accepts JSON booleans and the exact strings `"true"` / `"false"` (query
/// strings and form-encoded clients only ever send strings).
pub fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

/// Coerce an integer-like value: a JSON number or a numeric string whose
/// value is integral, so `"1.0"` reads as `1` and `"1.5"` is rejected.
pub fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
        Value::String(s) => {
            let s = s.trim();
            s.parse()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        _ => None,
    }
}

fn integral(number: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    let in_range = number >= i64::MIN as f64 && number < i64::MAX as f64;
    (number.is_finite() && number.fract() == 0.0 && in_range).then_some(number as i64)
}

/// Check a string's length in characters (not bytes) against inclusive bounds.
pub fn length_within(value: &str, min: u64, max: u64) -> bool {
    value.validate_length(Some(min), Some(max), None)
}

/// A string that is empty or contains only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// A string carrying a NUL character, which text columns cannot store.
pub fn contains_nul(value: &str) -> bool {
    value.contains('\0')
}

/// Read an optional boolean field, recording `message` when the value cannot
/// be coerced. `null` is treated as absent.
pub fn optional_bool(
    input: &RawInput,
    name: &str,
    message: &str,
    violations: &mut Violations,
) -> Option<bool> {
    match field(input, name) {
        Field::Absent | Field::Null => None,
        Field::Present(value) => {
            let coerced = coerce_bool(value);
            if coerced.is_none() {
                violations.add(name, message);
            }
            coerced
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
