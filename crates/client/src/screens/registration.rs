//! Batch registration workflow: dates and subjects for every semester of
//! a batch, submitted in one request.

use campus_core::error::CoreError;
use campus_core::lifecycle::Lifecycle;
use campus_core::models::{Semester, Subject};
use campus_core::navigation::Route;
use campus_core::registration::{reduce, RegistrationAction, RegistrationForm, SlotKey};
use campus_core::types::DbId;
use campus_core::validation::FieldErrors;
use serde::Deserialize;
use serde_json::Value;

use super::FETCH_ERROR_MESSAGE;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::navigator::Navigator;

pub const REGISTERED_MESSAGE: &str = "Semester registered successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Idle,
    Loading,
    /// Editable. `error()` holds the message of a failed submit, if any.
    Ready,
    Submitting,
    Succeeded,
    LoadFailed,
}

#[derive(Debug, Deserialize)]
struct BatchDetail {
    #[serde(default)]
    semesters: Vec<Semester>,
}

pub struct RegistrationWorkflow {
    api: ApiClient,
    navigator: Navigator,
    lifecycle: Lifecycle<DbId>,
    state: RegistrationState,
    batch_id: Option<DbId>,
    form: RegistrationForm,
    subjects: Vec<Subject>,
    errors: FieldErrors,
    error: Option<String>,
}

impl RegistrationWorkflow {
    pub fn new(api: ApiClient, navigator: Navigator) -> Self {
        Self {
            api,
            navigator,
            lifecycle: Lifecycle::default(),
            state: RegistrationState::Idle,
            batch_id: None,
            form: RegistrationForm::default(),
            subjects: Vec::new(),
            errors: FieldErrors::new(),
            error: None,
        }
    }

    pub fn state(&self) -> RegistrationState {
        self.state
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Subject catalog offered by every slot.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Load the batch's semesters and the subject catalog.
    ///
    /// A batch without semesters is initialized server-side first. Calling
    /// this again for the batch already loading or loaded does nothing.
    pub async fn load(&mut self, batch_id: DbId) -> Result<(), ClientError> {
        if !self.lifecycle.begin(batch_id) {
            return Ok(());
        }
        self.state = RegistrationState::Loading;

        let result = tokio::try_join!(self.fetch_semesters(batch_id), async {
            Ok::<_, ClientError>(self.api.get::<Vec<Subject>>("/subjects").await?)
        });
        match result {
            Ok((semesters, subjects)) => {
                self.form = RegistrationForm::seed(&semesters);
                self.subjects = subjects;
                self.batch_id = Some(batch_id);
                self.errors = FieldErrors::new();
                self.error = None;
                self.state = RegistrationState::Ready;
                self.lifecycle.succeed(&batch_id);
                tracing::info!(batch_id, semesters = self.form.len(), "Registration loaded");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(batch_id, error = %err, "Registration load failed");
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.state = RegistrationState::LoadFailed;
                self.lifecycle.fail(&batch_id);
                Err(err)
            }
        }
    }

    async fn fetch_semesters(&self, batch_id: DbId) -> Result<Vec<Semester>, ClientError> {
        let path = format!("/batch/{batch_id}/detail");
        let detail: BatchDetail = self.api.get(&path).await?;
        if !detail.semesters.is_empty() {
            return Ok(detail.semesters);
        }

        tracing::info!(batch_id, "Batch has no semesters, initializing");
        let _: Value = self
            .api
            .post(&format!("/batch/{batch_id}/semester"), &serde_json::json!({}))
            .await?;
        let detail: BatchDetail = self.api.get(&path).await?;
        Ok(detail.semesters)
    }

    /// Apply one edit to the form.
    pub fn dispatch(&mut self, action: RegistrationAction) -> Result<(), ClientError> {
        if self.state != RegistrationState::Ready {
            return Err(CoreError::Validation(format!(
                "Registration cannot be edited while {:?}",
                self.state
            ))
            .into());
        }
        self.form = reduce(&self.form, action)?;
        Ok(())
    }

    /// Append an empty subject slot and return its key.
    pub fn add_subject_slot(&mut self, semester_id: DbId) -> Result<SlotKey, ClientError> {
        self.dispatch(RegistrationAction::AddSubjectSlot { semester_id })?;
        self.form
            .entry(semester_id)
            .and_then(|e| e.slots.last())
            .map(|slot| slot.key)
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "semester",
                    id: semester_id,
                }
                .into()
            })
    }

    /// POST the whole form to `/batch/{id}/details`.
    pub async fn submit(&mut self) -> Result<(), ClientError> {
        let batch_id = self
            .batch_id
            .ok_or(ClientError::NotLoaded("Batch registration"))?;
        if self.state != RegistrationState::Ready {
            return Err(CoreError::Validation(format!(
                "Registration cannot be submitted while {:?}",
                self.state
            ))
            .into());
        }
        self.errors = FieldErrors::new();
        self.error = None;
        if let Err(e) = self.form.validate() {
            return Err(self.fail_submit(e.into()));
        }

        self.state = RegistrationState::Submitting;
        let payload = self.form.to_payload();
        let result: Result<Value, _> = self
            .api
            .post(&format!("/batch/{batch_id}/details"), &payload)
            .await;

        match result {
            Ok(_) => {
                self.state = RegistrationState::Succeeded;
                tracing::info!(batch_id, semesters = payload.semesters.len(), "Registration submitted");
                self.api.notices().success(REGISTERED_MESSAGE).await;
                self.navigator.push(Route::BatchHome).await;
                Ok(())
            }
            Err(e) => {
                let err = self.fail_submit(e.into());
                if err.field_errors().is_none() {
                    self.api.notices().report(&err).await;
                }
                Err(err)
            }
        }
    }

    fn fail_submit(&mut self, err: ClientError) -> ClientError {
        self.state = RegistrationState::Ready;
        if let Some(fields) = err.field_errors() {
            self.errors = fields.clone();
        }
        self.error = Some(err.user_message());
        err
    }
}
