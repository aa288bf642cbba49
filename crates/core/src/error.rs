use crate::types::DbId;
use crate::validation::FieldErrors;

/// Failures raised by the pure domain layer.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// An edit the current form state cannot accept.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Field-level messages for a form, keyed by field name.
    #[error("Invalid form: {0}")]
    InvalidForm(FieldErrors),

    /// A record could not be converted to or from its JSON form.
    #[error("Malformed record: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::InvalidForm(errors) => Some(errors),
            _ => None,
        }
    }
}
