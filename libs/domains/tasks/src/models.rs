use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, VariantNames};
use utoipa::ToSchema;

use crate::schema::{self, SchemaError, TaskPayload, ValidTask};

/// Identifier assigned by the repository, starting at 1.
pub type TaskId = u64;

/// Places a task can be bound to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Location {
    Ames,
    Boone,
}

/// Task entity - a stored to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier, strictly increasing per repository
    pub id: TaskId,
    /// Task title
    pub title: String,
    /// Task description
    pub description: String,
    /// Priority from 1 to 5
    pub priority: u8,
    /// Due date (YYYY-MM-DD)
    pub due_date: NaiveDate,
    /// User the task belongs to
    pub user_name: String,
    /// Optional location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    /// Optional free-form tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Task {
    pub fn new(id: TaskId, fields: ValidTask) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            priority: fields.priority,
            due_date: fields.due_date,
            user_name: fields.user_name,
            location: fields.location,
            tag: fields.tag,
        }
    }
}

/// DTO for creating a new task.
///
/// Built from a shape-checked payload through `TryFrom<&TaskPayload>`.
/// Every field is optional at this level: the service reports missing
/// required fields, the repository checks values.
#[derive(Debug, Clone, Default, PartialEq, Eq, ToSchema)]
pub struct CreateTask {
    #[schema(required = true, max_length = 255, min_length = 1)]
    pub title: Option<String>,
    #[schema(required = true)]
    pub description: Option<String>,
    #[schema(required = true, minimum = 1, maximum = 5)]
    pub priority: Option<i64>,
    #[schema(required = true, example = "2024-07-10")]
    pub due_date: Option<String>,
    #[schema(required = true)]
    pub user_name: Option<String>,
    #[schema(example = "ames")]
    pub location: Option<String>,
    pub tag: Option<String>,
}

impl CreateTask {
    /// First required field (in schema order) that is absent.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        let present = [
            self.title.is_some(),
            self.description.is_some(),
            self.priority.is_some(),
            self.due_date.is_some(),
            self.user_name.is_some(),
        ];

        schema::REQUIRED_FIELDS
            .iter()
            .zip(present)
            .find(|(_, present)| !present)
            .map(|(field, _)| *field)
    }

    /// Raw payload handed to the repository; absent fields are left out.
    pub fn into_payload(self) -> TaskPayload {
        let mut payload = TaskPayload::new();
        let mut put = |field: &str, value: Option<Value>| {
            if let Some(value) = value {
                payload.insert(field.to_string(), value);
            }
        };

        put("title", self.title.map(Value::from));
        put("description", self.description.map(Value::from));
        put("priority", self.priority.map(Value::from));
        put("due_date", self.due_date.map(Value::from));
        put("user_name", self.user_name.map(Value::from));
        put("location", self.location.map(Value::from));
        put("tag", self.tag.map(Value::from));

        payload
    }
}

impl TryFrom<&TaskPayload> for CreateTask {
    type Error = SchemaError;

    /// Types the payload field by field. Unknown keys and wrong JSON types
    /// are rejected; missing fields stay `None`.
    fn try_from(payload: &TaskPayload) -> Result<Self, Self::Error> {
        schema::reject_unknown_fields(payload)?;

        Ok(Self {
            title: schema::string_field(payload, "title")?,
            description: schema::string_field(payload, "description")?,
            priority: schema::integer_field(payload, "priority")?,
            due_date: schema::string_field(payload, "due_date")?,
            user_name: schema::string_field(payload, "user_name")?,
            location: schema::string_field(payload, "location")?,
            tag: schema::string_field(payload, "tag")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> TaskPayload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_location_parsing_is_case_sensitive() {
        assert_eq!("ames".parse::<Location>().unwrap(), Location::Ames);
        assert_eq!("boone".parse::<Location>().unwrap(), Location::Boone);
        assert!("Ames".parse::<Location>().is_err());
        assert!("des moines".parse::<Location>().is_err());
        assert_eq!(Location::VARIANTS, &["ames", "boone"]);
    }

    #[test]
    fn test_first_missing_field_follows_schema_order() {
        assert_eq!(CreateTask::default().first_missing_field(), Some("title"));

        let input = CreateTask {
            title: Some("Laundry".to_string()),
            priority: Some(1),
            ..Default::default()
        };
        assert_eq!(input.first_missing_field(), Some("description"));

        let complete = CreateTask {
            title: Some("Laundry".to_string()),
            description: Some(String::new()),
            priority: Some(1),
            due_date: Some("2024-06-29".to_string()),
            user_name: Some("eve".to_string()),
            ..Default::default()
        };
        assert_eq!(complete.first_missing_field(), None);
    }

    #[test]
    fn test_try_from_payload_keeps_absent_fields_empty() {
        let input = CreateTask::try_from(&payload(json!({
            "title": "Walk the dog",
            "priority": 3,
            "location": null
        })))
        .unwrap();

        assert_eq!(input.title.as_deref(), Some("Walk the dog"));
        assert_eq!(input.priority, Some(3));
        assert_eq!(input.location, None);
        assert_eq!(input.user_name, None);
    }

    #[test]
    fn test_try_from_payload_rejects_wrong_types() {
        let err = CreateTask::try_from(&payload(json!({ "priority": "high" }))).unwrap_err();
        assert_eq!(err.to_string(), "'priority' must be an integer");

        let err = CreateTask::try_from(&payload(json!({ "user_name": 7 }))).unwrap_err();
        assert_eq!(err.to_string(), "'user_name' must be a string");

        let err = CreateTask::try_from(&payload(json!({ "extraField": true }))).unwrap_err();
        assert_eq!(err.to_string(), "'extraField' is not an allowed field");
    }

    #[test]
    fn test_into_payload_omits_absent_fields() {
        let input = CreateTask {
            title: Some("Read book".to_string()),
            priority: Some(2),
            ..Default::default()
        };

        assert_eq!(
            Value::Object(input.into_payload()),
            json!({ "title": "Read book", "priority": 2 })
        );
    }

    #[test]
    fn test_task_serialization_skips_absent_optionals() {
        let task = Task {
            id: 1,
            title: "A".to_string(),
            description: "B".to_string(),
            priority: 1,
            due_date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            user_name: "C".to_string(),
            location: None,
            tag: None,
        };

        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            json!({
                "id": 1,
                "title": "A",
                "description": "B",
                "priority": 1,
                "due_date": "2024-07-10",
                "user_name": "C"
            })
        );
    }
}
