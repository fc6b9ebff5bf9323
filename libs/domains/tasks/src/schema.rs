//! Field rules for task payloads.
//!
//! The same table drives the HTTP boundary (shape) and the repository
//! (shape plus values). Checks run in a fixed order so a payload with
//! several problems always reports the same one:
//!
//! 1. unknown fields (first in key order)
//! 2. missing required fields
//! 3. JSON types
//! 4. value constraints (schema field order)

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Number, Value};
use strum::VariantNames;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::Location;

/// Untyped task body, as received or as passed to the repository.
pub type TaskPayload = Map<String, Value>;

pub const REQUIRED_FIELDS: [&str; 5] = ["title", "description", "priority", "due_date", "user_name"];
pub const OPTIONAL_FIELDS: [&str; 2] = ["location", "tag"];

pub const TITLE_MAX_CHARS: u64 = 255;
pub const PRIORITY_MIN: i64 = 1;
pub const PRIORITY_MAX: i64 = 5;

static ISO_DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    String,
    Integer,
}

fn kind_of(field: &str) -> FieldKind {
    match field {
        "priority" => FieldKind::Integer,
        _ => FieldKind::String,
    }
}

fn is_known(field: &str) -> bool {
    REQUIRED_FIELDS.contains(&field) || OPTIONAL_FIELDS.contains(&field)
}

/// A payload that does not satisfy the task schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Required fields missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("'{0}' is not an allowed field")]
    UnknownField(String),

    #[error("'{field}' must be {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    #[error("'{field}' must be at most {max} characters")]
    TooLong { field: &'static str, max: u64 },

    #[error("'{field}' must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("'{0}' must be in ISO format (YYYY-MM-DD)")]
    InvalidDate(&'static str),

    #[error("'{field}' must be one of: {}", .allowed.join(", "))]
    InvalidChoice {
        field: &'static str,
        allowed: &'static [&'static str],
    },

    #[error("'{0}' is invalid")]
    Invalid(&'static str),
}

impl SchemaError {
    /// The field this error is about. For several missing fields, the first.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField(field)
            | Self::Empty(field)
            | Self::InvalidDate(field)
            | Self::Invalid(field) => *field,
            Self::MissingFields(fields) => fields.first().copied().unwrap_or("body"),
            Self::UnknownField(field) => field.as_str(),
            Self::InvalidType { field, .. }
            | Self::TooLong { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::InvalidChoice { field, .. } => *field,
        }
    }
}

/// Rejects the first key (in map order) that is not part of the schema.
pub fn reject_unknown_fields(payload: &TaskPayload) -> Result<(), SchemaError> {
    match payload.keys().find(|key| !is_known(key)) {
        Some(key) => Err(SchemaError::UnknownField(key.clone())),
        None => Ok(()),
    }
}

/// Required fields that are absent or `null`, in schema order.
pub fn missing_fields(payload: &TaskPayload) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| payload.get(*field).is_none_or(Value::is_null))
        .collect()
}

/// Whole numbers that do not fit `i64` or `u64` are parsed as `f64`.
/// `-2^63` itself always parses as `i64`, so an `f64` at that value came
/// from a literal below it.
fn is_integral_beyond_i64(n: &Number) -> bool {
    n.as_f64().is_some_and(|f| {
        f.fract() == 0.0 && (f <= i64::MIN as f64 || f >= i64::MAX as f64)
    })
}

fn check_type(field: &'static str, value: &Value) -> Result<(), SchemaError> {
    match (kind_of(field), value) {
        (_, Value::Null) | (FieldKind::String, Value::String(_)) => Ok(()),
        (FieldKind::Integer, Value::Number(n)) if n.is_i64() => Ok(()),
        // Integral, but beyond anything the range check would accept
        (FieldKind::Integer, Value::Number(n)) if n.is_u64() || is_integral_beyond_i64(n) => {
            Err(SchemaError::OutOfRange {
                field,
                min: PRIORITY_MIN,
                max: PRIORITY_MAX,
            })
        }
        (FieldKind::Integer, _) => Err(SchemaError::InvalidType {
            field,
            expected: "an integer",
        }),
        (FieldKind::String, _) => Err(SchemaError::InvalidType {
            field,
            expected: "a string",
        }),
    }
}

/// String field, `None` when absent or `null`.
pub fn string_field(
    payload: &TaskPayload,
    field: &'static str,
) -> Result<Option<String>, SchemaError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            check_type(field, value)?;
            Ok(value.as_str().map(str::to_string))
        }
    }
}

/// Integer field, `None` when absent or `null`.
pub fn integer_field(
    payload: &TaskPayload,
    field: &'static str,
) -> Result<Option<i64>, SchemaError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            check_type(field, value)?;
            Ok(value.as_i64())
        }
    }
}

/// Structural checks only: unknown fields, missing fields, JSON types.
pub fn check_shape(payload: &TaskPayload) -> Result<(), SchemaError> {
    reject_unknown_fields(payload)?;

    let missing = missing_fields(payload);
    match missing.as_slice() {
        [] => {}
        [field] => return Err(SchemaError::MissingField(*field)),
        _ => return Err(SchemaError::MissingFields(missing)),
    }

    for field in REQUIRED_FIELDS.into_iter().chain(OPTIONAL_FIELDS) {
        if let Some(value) = payload.get(field) {
            check_type(field, value)?;
        }
    }

    Ok(())
}

/// Fields that passed every check, converted to their stored types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidTask {
    pub title: String,
    pub description: String,
    pub priority: u8,
    pub due_date: NaiveDate,
    pub user_name: String,
    pub location: Option<Location>,
    pub tag: Option<String>,
}

#[derive(Debug, Validate)]
struct TaskFields {
    #[validate(
        custom(function = "not_blank"),
        length(max = 255, code = "too_long")
    )]
    title: String,
    description: String,
    #[validate(range(min = 1, max = 5, code = "range"))]
    priority: i64,
    #[validate(custom(function = "iso_date"))]
    due_date: String,
    #[validate(custom(function = "not_blank"))]
    user_name: String,
    #[validate(custom(function = "known_location"))]
    location: Option<String>,
    tag: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("empty"));
    }
    Ok(())
}

fn iso_date(value: &str) -> Result<(), ValidationError> {
    if !ISO_DATE_REGEX.is_match(value) || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err(ValidationError::new("date_format"));
    }
    Ok(())
}

fn known_location(value: &str) -> Result<(), ValidationError> {
    if value.parse::<Location>().is_err() {
        return Err(ValidationError::new("invalid_choice"));
    }
    Ok(())
}

const VALUE_CHECK_ORDER: [&str; 5] = ["title", "priority", "due_date", "user_name", "location"];

fn first_value_error(errors: &ValidationErrors) -> SchemaError {
    let field_errors = errors.field_errors();

    for field in VALUE_CHECK_ORDER {
        let Some(errors) = field_errors.get(field) else {
            continue;
        };
        // Emptiness is reported before length.
        let Some(error) = errors
            .iter()
            .find(|error| error.code == "empty")
            .or_else(|| errors.first())
        else {
            continue;
        };

        return match &*error.code {
            "empty" => SchemaError::Empty(field),
            "too_long" => SchemaError::TooLong {
                field,
                max: TITLE_MAX_CHARS,
            },
            "range" => SchemaError::OutOfRange {
                field,
                min: PRIORITY_MIN,
                max: PRIORITY_MAX,
            },
            "date_format" => SchemaError::InvalidDate(field),
            "invalid_choice" => SchemaError::InvalidChoice {
                field,
                allowed: Location::VARIANTS,
            },
            _ => SchemaError::Invalid(field),
        };
    }

    SchemaError::Invalid("body")
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, SchemaError> {
    value.ok_or(SchemaError::MissingField(field))
}

/// Full check of a payload, in the documented order.
pub fn validate(payload: &TaskPayload) -> Result<ValidTask, SchemaError> {
    check_shape(payload)?;

    let fields = TaskFields {
        title: required(string_field(payload, "title")?, "title")?,
        description: required(string_field(payload, "description")?, "description")?,
        priority: required(integer_field(payload, "priority")?, "priority")?,
        due_date: required(string_field(payload, "due_date")?, "due_date")?,
        user_name: required(string_field(payload, "user_name")?, "user_name")?,
        location: string_field(payload, "location")?,
        tag: string_field(payload, "tag")?,
    };

    fields.validate().map_err(|errors| first_value_error(&errors))?;

    let priority = u8::try_from(fields.priority).map_err(|_| SchemaError::OutOfRange {
        field: "priority",
        min: PRIORITY_MIN,
        max: PRIORITY_MAX,
    })?;
    let due_date = NaiveDate::parse_from_str(&fields.due_date, "%Y-%m-%d")
        .map_err(|_| SchemaError::InvalidDate("due_date"))?;
    let location = fields
        .location
        .as_deref()
        .map(str::parse::<Location>)
        .transpose()
        .map_err(|_| SchemaError::InvalidChoice {
            field: "location",
            allowed: Location::VARIANTS,
        })?;

    Ok(ValidTask {
        priority,
        due_date,
        location,
        title: fields.title,
        description: fields.description,
        user_name: fields.user_name,
        tag: fields.tag,
    })
}
