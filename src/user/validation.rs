//! Validation gate for create/update payloads.
//!
//! Payloads are checked against [`USER_SCHEMA`], field by field in schema
//! order. The first violated rule is reported.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use super::NewUser;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// What a field's value must look like beyond being a non-blank string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Text,
    Email,
}

/// A single required field of the payload schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub format: FieldFormat,
}

/// Required fields of a user payload, in the order they are checked.
pub const USER_SCHEMA: [FieldRule; 3] = [
    FieldRule {
        name: "name",
        format: FieldFormat::Text,
    },
    FieldRule {
        name: "email",
        format: FieldFormat::Email,
    },
    FieldRule {
        name: "address",
        format: FieldFormat::Text,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NotAnObject,
    Missing(&'static str),
    NotAString(&'static str),
    InvalidEmail(&'static str),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnObject => write!(f, "request body must be a JSON object"),
            ValidationError::Missing(field) => write!(f, "{} is required", field),
            ValidationError::NotAString(field) => write!(f, "{} must be a string", field),
            ValidationError::InvalidEmail(field) => {
                write!(f, "{} must be a valid email address", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check `payload` against [`USER_SCHEMA`].
///
/// Unknown keys (including a client-supplied `id`) are ignored.
pub fn validate(payload: &Value) -> Result<NewUser, ValidationError> {
    let object = payload.as_object().ok_or(ValidationError::NotAnObject)?;

    let [name, email, address] = &USER_SCHEMA;
    Ok(NewUser::new(
        check_field(object, name)?,
        check_field(object, email)?,
        check_field(object, address)?,
    ))
}

fn check_field(object: &Map<String, Value>, rule: &FieldRule) -> Result<String, ValidationError> {
    let value = match object.get(rule.name) {
        None | Some(Value::Null) => return Err(ValidationError::Missing(rule.name)),
        Some(Value::String(s)) => s,
        Some(_) => return Err(ValidationError::NotAString(rule.name)),
    };

    if value.trim().is_empty() {
        return Err(ValidationError::Missing(rule.name));
    }

    if rule.format == FieldFormat::Email && !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail(rule.name));
    }

    Ok(value.clone())
}
