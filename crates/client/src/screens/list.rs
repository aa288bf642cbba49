//! Paginated table screen with inline edit and row delete.

use campus_core::error::CoreError;
use campus_core::lifecycle::Lifecycle;
use campus_core::pagination::Paginator;
use campus_core::resource::Resource;
use campus_core::types::DbId;
use campus_core::validation::FieldErrors;
use serde_json::{Map, Value};

use super::{from_json, merge_over, to_json, FETCH_ERROR_MESSAGE};
use crate::error::ClientError;
use crate::http::{ApiClient, ApiError};

/// Row currently being edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEdit {
    pub id: DbId,
    pub draft: Map<String, Value>,
    /// Draft values the row cannot hold, from the last commit attempt.
    pub errors: FieldErrors,
}

pub struct ListScreen<R: Resource> {
    api: ApiClient,
    rows: Vec<R::Record>,
    paginator: Paginator,
    lifecycle: Lifecycle<()>,
    error: Option<String>,
    editing: Option<InlineEdit>,
}

impl<R: Resource> ListScreen<R> {
    pub fn new(api: ApiClient, page_size: usize) -> Self {
        Self {
            api,
            rows: Vec::new(),
            paginator: Paginator::new(page_size),
            lifecycle: Lifecycle::default(),
            error: None,
            editing: None,
        }
    }

    // ---- loading ----

    /// Fetch the collection once. Later calls are no-ops until
    /// [`reload`](Self::reload) or a failed attempt.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        if !self.lifecycle.begin(()) {
            return Ok(());
        }
        match self.fetch().await {
            Ok(rows) => {
                self.rows = rows;
                self.error = None;
                self.paginator.reclamp(self.rows.len());
                self.lifecycle.succeed(&());
                Ok(())
            }
            Err(err) => {
                tracing::warn!(resource = R::LABEL, error = %err, "List load failed");
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
                self.lifecycle.fail(&());
                Err(err)
            }
        }
    }

    pub async fn reload(&mut self) -> Result<(), ClientError> {
        self.lifecycle.reset();
        self.load().await
    }

    async fn fetch(&self) -> Result<Vec<R::Record>, ClientError> {
        let payload: Value = self.api.get(R::COLLECTION).await?;
        if !payload.is_array() {
            return Err(ApiError::Envelope(format!("{} list is not an array", R::LABEL)).into());
        }
        serde_json::from_value(payload).map_err(|e| ApiError::Envelope(e.to_string()).into())
    }

    pub fn is_loading(&self) -> bool {
        self.lifecycle.is_loading()
    }

    /// Page-level error from the last load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn rows(&self) -> &[R::Record] {
        &self.rows
    }

    // ---- pagination ----

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[R::Record] {
        self.paginator.slice(&self.rows)
    }

    pub fn page(&self) -> usize {
        self.paginator.page()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count(self.rows.len())
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.paginator.go_to(page, self.rows.len())
    }

    pub fn next(&mut self) -> usize {
        self.paginator.next(self.rows.len())
    }

    pub fn prev(&mut self) -> usize {
        self.paginator.prev(self.rows.len())
    }

    // ---- inline edit ----

    pub fn editing(&self) -> Option<&InlineEdit> {
        self.editing.as_ref()
    }

    /// Start editing `id`, seeding the draft from the row's current values.
    pub fn begin_edit(&mut self, id: DbId) -> Result<(), ClientError> {
        if R::INLINE_FIELDS.is_empty() {
            return Err(CoreError::Validation(format!(
                "{} rows cannot be edited inline",
                R::LABEL
            ))
            .into());
        }
        let row = self
            .rows
            .iter()
            .find(|r| R::id(r) == id)
            .ok_or(CoreError::NotFound {
                entity: R::LABEL,
                id,
            })?;
        let current = to_json(row)?;
        let draft = R::INLINE_FIELDS
            .iter()
            .map(|&field| {
                let value = current.get(field).cloned().unwrap_or(Value::Null);
                (field.to_string(), value)
            })
            .collect();
        self.editing = Some(InlineEdit {
            id,
            draft,
            errors: FieldErrors::new(),
        });
        Ok(())
    }

    pub fn set_draft(&mut self, field: &str, value: impl Into<Value>) -> Result<(), ClientError> {
        if !R::INLINE_FIELDS.contains(&field) {
            return Err(CoreError::Validation(format!(
                "'{field}' is not editable on {} rows",
                R::LABEL
            ))
            .into());
        }
        let edit = self
            .editing
            .as_mut()
            .ok_or_else(|| CoreError::Validation("No row is being edited".into()))?;
        edit.draft.insert(field.to_string(), value.into());
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// PUT the draft and fold it into the local row.
    ///
    /// The draft is checked against the row type first; a value the row
    /// cannot hold is reported under its field and nothing is sent. On any
    /// failure the draft stays open and the row is untouched.
    pub async fn commit_edit(&mut self) -> Result<(), ClientError> {
        let edit = self
            .editing
            .clone()
            .ok_or_else(|| CoreError::Validation("No row is being edited".into()))?;
        let index = self
            .rows
            .iter()
            .position(|r| R::id(r) == edit.id)
            .ok_or(CoreError::NotFound {
                entity: R::LABEL,
                id: edit.id,
            })?;

        let current = to_json(&self.rows[index])?;
        let updated = match Self::apply_draft(current, &edit.draft) {
            Ok(updated) => updated,
            Err(errors) => {
                if let Some(open) = self.editing.as_mut() {
                    open.errors = errors.clone();
                }
                return Err(CoreError::InvalidForm(errors).into());
            }
        };

        let body = Value::Object(edit.draft);
        let result: Result<Value, ApiError> = self.api.put(&R::item_path(edit.id), &body).await;
        if let Err(e) = result {
            let err = ClientError::from(e);
            self.api.notices().report(&err).await;
            return Err(err);
        }

        self.rows[index] = updated;
        self.editing = None;
        self.api
            .notices()
            .success(format!("{} updated successfully", R::LABEL))
            .await;
        Ok(())
    }

    /// Rebuild the row with the draft applied. Each field that breaks the
    /// row type gets its own message.
    fn apply_draft(current: Value, draft: &Map<String, Value>) -> Result<R::Record, FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, value) in draft {
            let single = Value::Object(Map::from_iter([(field.clone(), value.clone())]));
            if from_json::<R::Record>(merge_over(current.clone(), single)).is_err() {
                errors.insert(field.clone(), format!("Invalid value for {field}"));
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        from_json(merge_over(current, Value::Object(draft.clone()))).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert("draft", e.user_message());
            errors
        })
    }

    // ---- delete ----

    /// DELETE the row, then drop it locally. A failed delete leaves the
    /// table as it was.
    pub async fn delete(&mut self, id: DbId) -> Result<(), ClientError> {
        if let Err(e) = self.api.delete(&R::item_path(id)).await {
            let err = ClientError::from(e);
            tracing::warn!(resource = R::LABEL, id, error = %err, "Delete failed");
            self.api.notices().report(&err).await;
            return Err(err);
        }
        self.rows.retain(|r| R::id(r) != id);
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
            self.editing = None;
        }
        self.paginator.reclamp(self.rows.len());
        self.api
            .notices()
            .success(format!("{} deleted successfully", R::LABEL))
            .await;
        Ok(())
    }
}
