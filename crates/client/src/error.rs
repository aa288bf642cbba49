use campus_core::error::CoreError;
use campus_core::validation::FieldErrors;

use crate::config::ConfigError;
use crate::http::ApiError;

/// Global notice for any 5xx response.
pub const SERVER_ERROR_MESSAGE: &str = "An error occurred. Please try again later.";

/// Notice for transport failures and responses the console cannot interpret.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Notice shown when a session expires mid-request.
pub const UNAUTHORIZED_MESSAGE: &str = "You are not authorized. Please log in again.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token not provided in API response")]
    MissingToken,

    /// The screen was used before its data was loaded.
    #[error("{0} is not loaded")]
    NotLoaded(&'static str),
}

impl ClientError {
    /// Field-level messages, from local validation or a server rejection.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Core(e) => e.field_errors(),
            Self::Api(ApiError::Rejected { errors, .. }) if !errors.is_empty() => Some(errors),
            _ => None,
        }
    }

    /// Text for a transient notice describing this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(ApiError::Server { .. }) => SERVER_ERROR_MESSAGE.to_string(),
            Self::Api(ApiError::Unauthorized) => UNAUTHORIZED_MESSAGE.to_string(),
            Self::Api(ApiError::Rejected {
                message, errors, ..
            }) => message
                .clone()
                .or_else(|| errors.iter().next().map(|(_, m)| m.to_string()))
                .unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string()),
            Self::Api(_) => UNEXPECTED_ERROR_MESSAGE.to_string(),
            Self::Core(CoreError::InvalidForm(errors)) => errors
                .iter()
                .next()
                .map(|(_, m)| m.to_string())
                .unwrap_or_else(|| UNEXPECTED_ERROR_MESSAGE.to_string()),
            other => other.to_string(),
        }
    }

    /// Whether the HTTP client already announced this failure globally.
    pub fn is_reported(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Server { .. }) | Self::Api(ApiError::Unauthorized)
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized))
    }
}
