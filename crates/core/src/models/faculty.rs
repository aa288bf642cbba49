use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// A faculty member, attached to one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: DbId,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<i64>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub branch_id: Option<DbId>,
}

impl Faculty {
    pub fn full_name(&self) -> String {
        super::full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            self.last_name.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateFaculty {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(required(message = "Phone number is required"))]
    pub phone: Option<i64>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFaculty {
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
    #[validate(required(message = "Phone is required"))]
    pub phone: Option<i64>,
    #[validate(length(min = 1, message = "Designation is required"))]
    pub designation: String,
    #[validate(required(message = "Branch is required"))]
    pub branch_id: Option<DbId>,
}

impl From<&Faculty> for UpdateFaculty {
    fn from(f: &Faculty) -> Self {
        Self {
            email: f.email.clone(),
            first_name: f.first_name.clone(),
            middle_name: f.middle_name.clone(),
            last_name: f.last_name.clone(),
            phone: f.phone,
            designation: f.designation.clone().unwrap_or_default(),
            branch_id: f.branch_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_requires_branch() {
        let form = UpdateFaculty {
            email: "t@college.edu".into(),
            first_name: "Tara".into(),
            phone: Some(1),
            designation: "Tutor".into(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert!(err.field_errors().contains_key("branch_id"));
    }
}
