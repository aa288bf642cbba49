//! Single-record edit screens.

use campus_core::error::CoreError;
use campus_core::lifecycle::Lifecycle;
use campus_core::models::{Admin, Batch, Branch, Semester, UpdateAdmin};
use campus_core::resource::{Admins, Resource};
use campus_core::types::DbId;
use campus_core::validation::{validate_form, FieldErrors};
use serde_json::Value;

use super::{from_json, merge_over, to_json, FETCH_ERROR_MESSAGE};
use crate::auth;
use crate::error::ClientError;
use crate::http::{ApiClient, ApiError};
use crate::navigator::Navigator;

// ---------------------------------------------------------------------------
// DetailScreen
// ---------------------------------------------------------------------------

pub struct DetailScreen<R: Resource> {
    api: ApiClient,
    navigator: Navigator,
    lifecycle: Lifecycle<DbId>,
    record: Option<R::Record>,
    form: Option<R::Update>,
    errors: FieldErrors,
    load_error: Option<String>,
    confirming_delete: bool,
}

impl<R: Resource> DetailScreen<R> {
    pub fn new(api: ApiClient, navigator: Navigator) -> Self {
        Self {
            api,
            navigator,
            lifecycle: Lifecycle::default(),
            record: None,
            form: None,
            errors: FieldErrors::new(),
            load_error: None,
            confirming_delete: false,
        }
    }

    /// Fetch record `id` and fill the edit form from it. Loading the same
    /// id again is a no-op.
    pub async fn load(&mut self, id: DbId) -> Result<(), ClientError> {
        if !self.lifecycle.begin(id) {
            return Ok(());
        }
        let result: Result<R::Record, ApiError> = self.api.get(&R::item_path(id)).await;
        match result {
            Ok(record) => {
                self.form = Some(R::Update::from(&record));
                self.record = Some(record);
                self.load_error = None;
                self.errors = FieldErrors::new();
                self.confirming_delete = false;
                self.lifecycle.succeed(&id);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(resource = R::LABEL, id, error = %e, "Detail load failed");
                self.load_error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.lifecycle.fail(&id);
                Err(e.into())
            }
        }
    }

    pub fn record(&self) -> Option<&R::Record> {
        self.record.as_ref()
    }

    /// Form values as last loaded or submitted.
    pub fn form(&self) -> Option<&R::Update> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut R::Update> {
        self.form.as_mut()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Validate `form`, merge it over the loaded record and PUT the result.
    pub async fn submit(&mut self, form: R::Update) -> Result<(), ClientError> {
        let record = self.record.as_ref().ok_or(ClientError::NotLoaded(R::LABEL))?;
        let id = R::id(record);
        let base = to_json(record)?;
        self.errors = FieldErrors::new();
        if let Err(e) = validate_form(&form) {
            return Err(self.capture(e.into()));
        }

        let merged = merge_over(base, to_json(&form)?);
        let result: Result<Value, ApiError> = self.api.put(&R::item_path(id), &merged).await;
        match result {
            Ok(_) => {
                if let Ok(updated) = from_json::<R::Record>(merged) {
                    self.record = Some(updated);
                }
                self.form = Some(form);
                self.api
                    .notices()
                    .success(format!("{} updated successfully", R::LABEL))
                    .await;
                self.navigator.push(R::LIST_ROUTE).await;
                Ok(())
            }
            Err(e) => {
                let err = self.capture(e.into());
                if err.field_errors().is_none() {
                    self.api.notices().report(&err).await;
                }
                Err(err)
            }
        }
    }

    /// Submit the form as currently held by the screen.
    pub async fn submit_current(&mut self) -> Result<(), ClientError> {
        let form = self.form.clone().ok_or(ClientError::NotLoaded(R::LABEL))?;
        self.submit(form).await
    }

    // ---- delete with confirmation ----

    pub fn request_delete(&mut self) -> Result<(), ClientError> {
        if self.record.is_none() {
            return Err(ClientError::NotLoaded(R::LABEL));
        }
        self.confirming_delete = true;
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub async fn confirm_delete(&mut self) -> Result<(), ClientError> {
        if !self.confirming_delete {
            return Err(CoreError::Validation("Deletion was not confirmed".into()).into());
        }
        self.confirming_delete = false;
        let id = self
            .record
            .as_ref()
            .map(R::id)
            .ok_or(ClientError::NotLoaded(R::LABEL))?;

        if let Err(e) = self.api.delete(&R::item_path(id)).await {
            let err = ClientError::from(e);
            self.api.notices().report(&err).await;
            return Err(err);
        }
        self.record = None;
        self.form = None;
        self.lifecycle.reset();
        self.api
            .notices()
            .success(format!("{} deleted successfully", R::LABEL))
            .await;
        self.navigator.push(R::LIST_ROUTE).await;
        Ok(())
    }

    fn capture(&mut self, err: ClientError) -> ClientError {
        if let Some(fields) = err.field_errors() {
            self.errors = fields.clone();
        }
        err
    }
}

// ---------------------------------------------------------------------------
// Reference collections for select inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub branches: Vec<Branch>,
    pub batches: Vec<Batch>,
    pub semesters: Vec<Semester>,
}

impl ReferenceData {
    /// Fetch branches, batches and semesters concurrently.
    pub async fn load(api: &ApiClient) -> Result<Self, ClientError> {
        let (branches, batches, semesters) = tokio::try_join!(
            api.get::<Vec<Branch>>("/branches"),
            api.get::<Vec<Batch>>("/batch"),
            api.get::<Vec<Semester>>("/semesters"),
        )?;
        Ok(Self {
            branches,
            batches,
            semesters,
        })
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The signed-in admin's own profile (`/admin/me`).
pub struct ProfileScreen {
    screen: DetailScreen<Admins>,
}

impl ProfileScreen {
    pub fn new(api: ApiClient, navigator: Navigator) -> Self {
        Self {
            screen: DetailScreen::new(api, navigator),
        }
    }

    /// Resolve the current admin through `/auth/me`, then load the record.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let me = match auth::me(self.screen.api()).await {
            Ok(me) => me,
            Err(err) => {
                self.screen.load_error = Some(FETCH_ERROR_MESSAGE.to_string());
                return Err(err);
            }
        };
        self.screen.load(me.id).await
    }

    pub fn admin(&self) -> Option<&Admin> {
        self.screen.record()
    }

    pub fn form(&self) -> Option<&UpdateAdmin> {
        self.screen.form()
    }

    pub fn errors(&self) -> &FieldErrors {
        self.screen.errors()
    }

    pub async fn submit(&mut self, form: UpdateAdmin) -> Result<(), ClientError> {
        self.screen.submit(form).await
    }
}
