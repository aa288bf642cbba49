use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// An administrator account, also returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<i64>,
    #[serde(default)]
    pub designation: Option<String>,
}

impl Admin {
    pub fn full_name(&self) -> String {
        super::full_name(
            &self.first_name,
            self.middle_name.as_deref(),
            self.last_name.as_deref(),
        )
    }
}

/// Payload of the admin creation form.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateAdmin {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
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
}

/// Edit form for an admin profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAdmin {
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
}

impl From<&Admin> for UpdateAdmin {
    fn from(admin: &Admin) -> Self {
        Self {
            email: admin.email.clone(),
            first_name: admin.first_name.clone(),
            middle_name: admin.middle_name.clone(),
            last_name: admin.last_name.clone(),
            phone: admin.phone,
            designation: admin.designation.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_form;

    fn valid() -> CreateAdmin {
        CreateAdmin {
            first_name: "Meera".into(),
            middle_name: None,
            last_name: "Iyer".into(),
            email: "meera@college.edu".into(),
            phone: Some(9876543210),
            password: "s3cret!".into(),
            designation: "Principal".into(),
        }
    }

    #[test]
    fn valid_create_passes() {
        assert!(validate_form(&valid()).is_ok());
    }

    #[test]
    fn missing_phone_is_reported() {
        let form = CreateAdmin {
            phone: None,
            ..valid()
        };
        let err = form.validate().unwrap_err();
        assert!(err.field_errors().contains_key("phone"));
    }

    #[test]
    fn create_omits_absent_middle_name() {
        let json = serde_json::to_value(valid()).unwrap();
        assert!(json.get("middle_name").is_none());
        assert_eq!(json["phone"], 9876543210_i64);
    }

    #[test]
    fn update_seeds_from_record() {
        let admin: Admin = serde_json::from_value(serde_json::json!({
            "id": 3,
            "email": "a@b.co",
            "first_name": "Ravi",
            "phone": 123,
            "designation": "HOD"
        }))
        .unwrap();
        let form = UpdateAdmin::from(&admin);
        assert_eq!(form.first_name, "Ravi");
        assert_eq!(form.designation, "HOD");
        assert_eq!(form.phone, Some(123));
        assert_eq!(admin.full_name(), "Ravi");
    }
}
