//! Marks screens: one student's semester marksheet and their flat marks
//! history.

use std::collections::BTreeMap;

use campus_core::lifecycle::Lifecycle;
use campus_core::models::{MarksRecord, SemesterMarks};
use campus_core::navigation::Route;
use campus_core::types::DbId;
use serde_json::Value;

use super::{from_json, FETCH_ERROR_MESSAGE};
use crate::error::ClientError;
use crate::http::{ApiClient, ApiError};
use crate::navigator::Navigator;

/// Notice when the marksheet endpoint answers without `payload.data`.
pub const INVALID_MARKS_MESSAGE: &str = "Invalid data structure received from API";

const MARKS_FETCH_FAILED: &str = "Failed to fetch marks.";

// ---------------------------------------------------------------------------
// Semester marksheet
// ---------------------------------------------------------------------------

pub struct SemesterMarksScreen {
    api: ApiClient,
    lifecycle: Lifecycle<(DbId, DbId)>,
    marks: Option<SemesterMarks>,
}

impl SemesterMarksScreen {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            lifecycle: Lifecycle::default(),
            marks: None,
        }
    }

    pub async fn load(&mut self, student_id: DbId, semester_id: DbId) -> Result<(), ClientError> {
        let key = (student_id, semester_id);
        if !self.lifecycle.begin(key) {
            return Ok(());
        }
        match self.fetch(student_id, semester_id).await {
            Ok(marks) => {
                self.marks = Some(marks);
                self.lifecycle.succeed(&key);
                Ok(())
            }
            Err(err) => {
                self.marks = None;
                self.lifecycle.fail(&key);
                let notices = self.api.notices();
                match &err {
                    ClientError::Api(ApiError::Envelope(_)) => {
                        notices.error(INVALID_MARKS_MESSAGE).await
                    }
                    e if e.is_reported() => {}
                    _ => notices.error(MARKS_FETCH_FAILED).await,
                }
                Err(err)
            }
        }
    }

    async fn fetch(&self, student_id: DbId, semester_id: DbId) -> Result<SemesterMarks, ClientError> {
        let payload: Value = self
            .api
            .get(&format!("/students/{student_id}/semesters/{semester_id}/marks"))
            .await?;
        let data = match payload {
            Value::Object(mut body) => body.remove("data").filter(|d| d.is_object()),
            _ => None,
        }
        .ok_or_else(|| ApiError::Envelope("marks payload has no data object".into()))?;
        serde_json::from_value(data).map_err(|e| ApiError::Envelope(e.to_string()).into())
    }

    pub fn marks(&self) -> Option<&SemesterMarks> {
        self.marks.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }
}

// ---------------------------------------------------------------------------
// Student marks history
// ---------------------------------------------------------------------------

pub struct StudentMarksScreen {
    api: ApiClient,
    navigator: Navigator,
    lifecycle: Lifecycle<DbId>,
    student_id: Option<DbId>,
    records: Vec<MarksRecord>,
    error: Option<String>,
}

impl StudentMarksScreen {
    pub fn new(api: ApiClient, navigator: Navigator) -> Self {
        Self {
            api,
            navigator,
            lifecycle: Lifecycle::default(),
            student_id: None,
            records: Vec::new(),
            error: None,
        }
    }

    pub async fn load(&mut self, student_id: DbId) -> Result<(), ClientError> {
        if !self.lifecycle.begin(student_id) {
            return Ok(());
        }
        let result: Result<Value, ApiError> =
            self.api.get(&format!("/students/{student_id}/marks")).await;
        match result.map_err(ClientError::from).and_then(from_json::<Vec<MarksRecord>>) {
            Ok(records) => {
                self.student_id = Some(student_id);
                self.records = records;
                self.error = None;
                self.lifecycle.succeed(&student_id);
                Ok(())
            }
            Err(err) => {
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.lifecycle.fail(&student_id);
                Err(err)
            }
        }
    }

    pub fn records(&self) -> &[MarksRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Records grouped by semester id. Rows without a semester are left out.
    pub fn by_semester(&self) -> BTreeMap<DbId, Vec<&MarksRecord>> {
        let mut groups: BTreeMap<DbId, Vec<&MarksRecord>> = BTreeMap::new();
        for record in &self.records {
            if let Some(semester_id) = record.semester_id {
                groups.entry(semester_id).or_default().push(record);
            }
        }
        groups
    }

    /// Open the marksheet for one semester of the loaded student.
    pub async fn open_semester(&self, semester_id: DbId) -> Result<Route, ClientError> {
        let student_id = self.student_id.ok_or(ClientError::NotLoaded("Student marks"))?;
        let route = Route::StudentSemesterMarks {
            student_id,
            semester_id,
        };
        self.navigator.push(route).await;
        Ok(route)
    }
}
