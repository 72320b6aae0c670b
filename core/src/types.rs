//! Domain types for the student resource.
//!
//! # Design
//! `Student` is what the server hands back. The store behind the endpoint is
//! schemaless, so every field is optional on decode and the grid decides how
//! to show a missing one. `StudentDraft` is the raw text of the form and
//! `StudentPayload` is the validated body sent on create and update.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Opaque record identifier assigned by the remote store.
///
/// Stores differ on whether ids are strings or numbers; both decode into
/// the same textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => StudentId(text),
            Raw::Number(number) => StudentId(number.to_string()),
        })
    }
}

/// A student record as returned by the API.
///
/// Each field decodes on its own: a value of the wrong shape becomes `None`
/// instead of failing the whole record, so one bad row cannot hide the rest
/// of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, deserialize_with = "lenient_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, deserialize_with = "lenient_age", skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// String or number; anything else is `None`.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<StudentId>, D::Error> {
    Ok(lenient_text(deserializer)?.map(StudentId))
}

/// Strings as-is, numbers in their JSON spelling; anything else is `None`.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

/// Integer or numeric string; anything else is `None`.
fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

impl Student {
    /// The id, if the store assigned a non-empty one.
    pub fn id(&self) -> Option<&StudentId> {
        self.id.as_ref().filter(|id| !id.is_empty())
    }
}

/// Request payload for create and update. Field order matches the wire body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPayload {
    pub name: String,
    pub lastname: String,
    pub age: u32,
    pub grade: String,
}

/// The form's current unsaved field values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub name: String,
    pub lastname: String,
    pub age: String,
    pub grade: String,
}

impl StudentDraft {
    pub fn new(
        name: impl Into<String>,
        lastname: impl Into<String>,
        age: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lastname: lastname.into(),
            age: age.into(),
            grade: grade.into(),
        }
    }

    /// Prefill from a fetched record. Missing text fields become empty.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone().unwrap_or_default(),
            lastname: student.lastname.clone().unwrap_or_default(),
            age: student.age.map(|age| age.to_string()).unwrap_or_default(),
            grade: student.grade.clone().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check the draft and build the payload to send.
    ///
    /// Text fields must be non-empty after trimming and `age` must parse as
    /// a whole number in `1..=u32::MAX`; larger values are rejected like any
    /// other unparsable age.
    pub fn validate(&self) -> Result<StudentPayload, ValidationError> {
        let name = self.name.trim();
        let lastname = self.lastname.trim();
        let grade = self.grade.trim();
        let age = self.age.trim().parse::<u32>().ok().filter(|age| *age > 0);

        let mut fields = Vec::new();
        if name.is_empty() {
            fields.push("name");
        }
        if lastname.is_empty() {
            fields.push("lastname");
        }
        if age.is_none() {
            fields.push("age");
        }
        if grade.is_empty() {
            fields.push("grade");
        }

        match age {
            Some(age) if fields.is_empty() => Ok(StudentPayload {
                name: name.to_string(),
                lastname: lastname.to_string(),
                age,
                grade: grade.to_string(),
            }),
            _ => Err(ValidationError { fields }),
        }
    }
}
