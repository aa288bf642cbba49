//! Per-student marks as returned by the marks endpoints.

use serde::{Deserialize, Serialize};

use super::semester::Semester;
use crate::types::DbId;

/// Pass/fail state of one subject row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarksStatus {
    /// Marks not yet recorded.
    Pending,
    Pass,
    Fail,
}

impl MarksStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Pass => "Pass",
            Self::Fail => "Fail",
        }
    }
}

impl From<Option<bool>> for MarksStatus {
    fn from(is_pass: Option<bool>) -> Self {
        match is_pass {
            None => Self::Pending,
            Some(true) => Self::Pass,
            Some(false) => Self::Fail,
        }
    }
}

/// One subject row of a semester marksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMarks {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub internal_marks: Option<f64>,
    #[serde(default)]
    pub external_marks: Option<f64>,
    #[serde(default)]
    pub internal_passing_marks: Option<f64>,
    #[serde(default)]
    pub external_passing_marks: Option<f64>,
    #[serde(default)]
    pub total_internal_marks: Option<f64>,
    #[serde(default)]
    pub total_external_marks: Option<f64>,
    #[serde(default)]
    pub total_marks: Option<f64>,
    #[serde(default)]
    pub is_pass: Option<bool>,
}

impl SubjectMarks {
    pub fn status(&self) -> MarksStatus {
        MarksStatus::from(self.is_pass)
    }

    /// Total as reported, else internal + external when both are recorded.
    pub fn total(&self) -> Option<f64> {
        self.total_marks.or(match (self.internal_marks, self.external_marks) {
            (Some(i), Some(e)) => Some(i + e),
            _ => None,
        })
    }

    /// Pass/fail derived from the configured thresholds.
    ///
    /// `None` until both marks are recorded. A missing threshold counts as
    /// zero.
    pub fn evaluate_pass(&self) -> Option<bool> {
        let internal = self.internal_marks?;
        let external = self.external_marks?;
        Some(
            internal >= self.internal_passing_marks.unwrap_or(0.0)
                && external >= self.external_passing_marks.unwrap_or(0.0),
        )
    }
}

/// Render an optional mark, `N/A` when absent.
pub fn display_mark(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.2}"),
        None => "N/A".to_string(),
    }
}

/// Student header embedded in a marksheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarksStudent {
    pub id: DbId,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Marksheet for one student in one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterMarks {
    pub student: MarksStudent,
    pub semester: Semester,
    #[serde(default)]
    pub subjects: Vec<SubjectMarks>,
}

impl SemesterMarks {
    pub fn passed_count(&self) -> usize {
        self.subjects
            .iter()
            .filter(|s| s.status() == MarksStatus::Pass)
            .count()
    }
}

/// Flat marks row from `/students/{id}/marks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarksRecord {
    pub subject_id: DbId,
    #[serde(default)]
    pub semester_id: Option<DbId>,
    #[serde(default)]
    pub internal_marks: Option<f64>,
    #[serde(default)]
    pub external_marks: Option<f64>,
    #[serde(default)]
    pub total_marks: Option<f64>,
    #[serde(default)]
    pub is_pass: Option<bool>,
}
