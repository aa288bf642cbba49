use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// A course with its internal/external mark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: DbId,
    #[serde(default)]
    pub code: Option<String>,
    pub title: String,
    #[serde(default)]
    pub total_internal_marks: Option<i32>,
    #[serde(default)]
    pub internal_passing_marks: Option<i32>,
    #[serde(default)]
    pub total_external_marks: Option<i32>,
    #[serde(default)]
    pub external_passing_marks: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateSubject {
    #[validate(length(min = 1, message = "Subject code is required"))]
    pub code: String,
    #[validate(length(min = 3, message = "Subject name must be at least 3 characters long"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Marks cannot be negative"))]
    pub total_internal_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Marks cannot be negative"))]
    pub internal_passing_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Marks cannot be negative"))]
    pub total_external_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Marks cannot be negative"))]
    pub external_passing_marks: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSubject {
    #[validate(length(min = 3, message = "Subject name must be at least 3 characters long"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Marks cannot be negative"))]
    pub total_internal_marks: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0, message = "Marks cannot be negative"))]
    pub total_external_marks: Option<i32>,
}

impl From<&Subject> for UpdateSubject {
    fn from(s: &Subject) -> Self {
        Self {
            title: s.title.clone(),
            code: s.code.clone(),
            total_internal_marks: s.total_internal_marks,
            total_external_marks: s.total_external_marks,
        }
    }
}
