use serde::{Deserialize, Serialize};
use validator::Validate;

use super::batch::Batch;
use super::semester::Semester;
use crate::types::DbId;

/// A student enrolled in one branch, batch and current semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: DbId,
    pub registration_number: i64,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub mother_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub phone: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub branch_id: Option<DbId>,
    #[serde(default)]
    pub batch_id: Option<DbId>,
    #[serde(default)]
    pub semester_id: Option<DbId>,
    #[serde(default)]
    pub batch: Option<Batch>,
    #[serde(default)]
    pub semester: Option<Semester>,
}

impl Student {
    pub fn full_name(&self) -> String {
        super::full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            self.last_name.as_deref(),
        )
    }

    /// Batch id, preferring the embedded batch object when present.
    pub fn effective_batch_id(&self) -> Option<DbId> {
        self.batch.as_ref().map(|b| b.id).or(self.batch_id)
    }

    /// Current semester id, preferring the embedded semester object.
    pub fn effective_semester_id(&self) -> Option<DbId> {
        self.semester.as_ref().map(|s| s.id).or(self.semester_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[validate(required(message = "Registration number is required"))]
    pub registration_number: Option<i64>,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(required(message = "Phone number is required"))]
    pub phone: Option<i64>,
    #[validate(length(min = 1, message = "Father's name is required"))]
    pub father_name: String,
    #[validate(length(min = 1, message = "Mother's name is required"))]
    pub mother_name: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    #[validate(required(message = "Branch is required"))]
    pub branch_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<DbId>,
    #[validate(required(message = "Semester is required"))]
    pub semester_id: Option<DbId>,
    #[validate(length(min = 1, message = "Course Type is required"))]
    pub course_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(required(message = "Registration number is required"))]
    pub registration_number: Option<i64>,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_id: Option<DbId>,
}

impl From<&Student> for UpdateStudent {
    fn from(s: &Student) -> Self {
        Self {
            registration_number: Some(s.registration_number),
            email: s.email.clone().unwrap_or_default(),
            first_name: s.first_name.clone(),
            middle_name: s.middle_name.clone(),
            last_name: s.last_name.clone(),
            father_name: s.father_name.clone(),
            mother_name: s.mother_name.clone(),
            category: s.category.clone(),
            phone: s.phone,
            batch_id: s.effective_batch_id(),
            semester_id: s.effective_semester_id(),
        }
    }
}
