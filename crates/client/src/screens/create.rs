use std::marker::PhantomData;

use campus_core::resource::Resource;
use campus_core::validation::{validate_form, FieldErrors};
use serde_json::Value;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::navigator::Navigator;

/// Creation form for one resource.
pub struct CreateForm<R: Resource> {
    api: ApiClient,
    navigator: Navigator,
    errors: FieldErrors,
    submitting: bool,
    _resource: PhantomData<R>,
}

impl<R: Resource> CreateForm<R> {
    pub fn new(api: ApiClient, navigator: Navigator) -> Self {
        Self {
            api,
            navigator,
            errors: FieldErrors::new(),
            submitting: false,
            _resource: PhantomData,
        }
    }

    /// Messages to show under each input after the last submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate and POST `dto`, then return to the list.
    ///
    /// Nothing is sent when local validation fails.
    pub async fn submit(&mut self, dto: &R::Create) -> Result<(), ClientError> {
        self.errors = FieldErrors::new();
        if let Err(e) = validate_form(dto) {
            return Err(self.capture(e.into()));
        }

        self.submitting = true;
        let result: Result<Value, _> = self.api.post(R::COLLECTION, dto).await;
        self.submitting = false;

        match result {
            Ok(_) => {
                tracing::info!(resource = R::LABEL, "Created");
                self.api
                    .notices()
                    .success(format!("{} Created!", R::LABEL))
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

    fn capture(&mut self, err: ClientError) -> ClientError {
        if let Some(fields) = err.field_errors() {
            self.errors = fields.clone();
        }
        err
    }
}
