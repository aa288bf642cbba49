use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::semester::Semester;
use crate::dates::year_of;
use crate::types::DbId;

/// A cohort admitted over a year range, grouping a sequence of semesters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: DbId,
    pub start_year: String,
    pub end_year: String,
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub branch_id: Option<DbId>,
    /// Branch title as embedded in student payloads.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub course_type: Option<String>,
    #[serde(default)]
    pub semesters: Vec<Semester>,
}

impl Batch {
    /// Select-box label, e.g. `2021-2024 full CSE`.
    pub fn label(&self) -> String {
        let range = match (year_of(&self.start_year), year_of(&self.end_year)) {
            (Some(start), Some(end)) => format!("{start}-{end}"),
            _ => String::new(),
        };
        let branch = self
            .title
            .as_deref()
            .or(self.branch.as_deref())
            .unwrap_or_default();
        [range.as_str(), self.course_type.as_deref().unwrap_or_default(), branch]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct CreateBatch {
    #[validate(required(message = "Start date is required"))]
    pub start_year: Option<NaiveDate>,
    #[validate(required(message = "End date is required"))]
    pub end_year: Option<NaiveDate>,
    #[validate(required(message = "Branch is required"))]
    pub branch_id: Option<DbId>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Course type is required"))]
    pub course_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<DbId>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
}

impl From<&Batch> for UpdateBatch {
    fn from(b: &Batch) -> Self {
        Self {
            start_year: Some(b.start_year.clone()),
            end_year: Some(b.end_year.clone()),
            branch_id: b.branch_id,
            course_type: b.course_type.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn label_joins_year_range_type_and_branch() {
        let batch: Batch = serde_json::from_value(json!({
            "id": 1,
            "start_year": "2021-07-01T00:00:00Z",
            "end_year": "2024-06-30",
            "type": "full",
            "title": "CSE"
        }))
        .unwrap();
        assert_eq!(batch.label(), "2021-2024 full CSE");
    }

    #[test]
    fn label_skips_unparseable_years() {
        let batch: Batch = serde_json::from_value(json!({
            "id": 1,
            "start_year": "soon",
            "end_year": "later",
            "branch": "ECE"
        }))
        .unwrap();
        assert_eq!(batch.label(), "ECE");
    }

    #[test]
    fn create_uses_type_key() {
        let form = CreateBatch {
            start_year: NaiveDate::from_ymd_opt(2024, 7, 1),
            end_year: NaiveDate::from_ymd_opt(2027, 6, 30),
            branch_id: Some(3),
            course_type: "part".into(),
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["type"], "part");
        assert_eq!(json["start_year"], "2024-07-01");
        assert!(json.get("course_type").is_none());
    }
}
