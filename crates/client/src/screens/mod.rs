//! Screen controllers.
//!
//! Each screen is a plain struct whose async methods are the user events
//! it handles. Views read state through the getters and never talk to the
//! backend directly.

pub mod create;
pub mod detail;
pub mod list;
pub mod marks;
pub mod registration;
pub mod student;

use campus_core::error::CoreError;
use serde_json::Value;

use crate::error::ClientError;

/// Page-level message for a failed initial load.
pub const FETCH_ERROR_MESSAGE: &str = "An error occurred while fetching data.";

/// Overlay `changes` onto `base`. Object keys from `changes` win unless
/// their value is `null`.
pub(crate) fn merge_over(mut base: Value, changes: Value) -> Value {
    match (&mut base, changes) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                if !value.is_null() {
                    target.insert(key, value);
                }
            }
            base
        }
        (_, other) => other,
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| CoreError::Internal(e.to_string()).into())
}

pub(crate) fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| CoreError::Internal(e.to_string()).into())
}
