use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::subject::Subject;
use crate::types::DbId;

/// A dated academic term within a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub batch_id: Option<DbId>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

/// Payload of the semester creation form. Dates serialize as `yyyy-MM-dd`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateSemester {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<DbId>,
    pub subject_ids: Vec<DbId>,
    #[validate(required(message = "Start date is required."))]
    pub start_date: Option<NaiveDate>,
    #[validate(required(message = "End date is required."))]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSemester {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl From<&Semester> for UpdateSemester {
    fn from(s: &Semester) -> Self {
        Self {
            title: s.title.clone(),
            start_date: s.start_date.clone(),
            end_date: s.end_date.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_serializes_wire_dates() {
        let form = CreateSemester {
            title: "Semester 1".into(),
            branch_id: Some(2),
            subject_ids: vec![4, 5],
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 1),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["end_date"], "2024-06-01");
        assert_eq!(json["subject_ids"], serde_json::json!([4, 5]));
    }

    #[test]
    fn create_requires_both_dates() {
        let form = CreateSemester {
            title: "Semester 1".into(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("start_date"));
        assert!(fields.contains_key("end_date"));
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let sem: Semester =
            serde_json::from_value(serde_json::json!({"id": 1, "title": "Sem 1"})).unwrap();
        assert!(sem.subjects.is_empty());
        assert!(sem.start_date.is_none());
    }
}
