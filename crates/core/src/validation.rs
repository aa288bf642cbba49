//! Form validation and field-level error mapping.
//!
//! Forms are validated client-side with [`validator`] derives before any
//! request is sent. Server-side rejections (400/404/409) carry a list of
//! `{ field: message }` objects; [`FieldErrors::from_server`] folds both
//! sources into the same ordered `field -> message` map so a view can show
//! one message under each input.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::CoreError;

/// Ordered map of field name to the message displayed under that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message for `field`, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` into `self`; messages from `other` win.
    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// Map the backend's structured error list onto named fields.
    ///
    /// The backend responds with `errors: [{ "email": "already taken" }, ...]`.
    /// Each object may name several fields; later entries overwrite earlier
    /// ones for the same field. Non-string messages are rendered as JSON.
    pub fn from_server(errors: &[serde_json::Map<String, serde_json::Value>]) -> Self {
        let mut out = Self::new();
        for entry in errors {
            for (field, message) in entry {
                let text = match message {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                out.insert(field.clone(), text);
            }
        }
        out
    }

    /// Convert `validator` output, keeping one message per field.
    ///
    /// Fields are sorted by name so the result is deterministic.
    pub fn from_validation(errors: &ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                let field = field.to_string();
                // Presence rules win over format rules, so an empty email
                // reads "required" rather than "invalid".
                errs.iter()
                    .find(|e| e.code == "required" || e.code == "length")
                    .or_else(|| errs.first())
                    .map(|err| {
                        let message = err
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| format!("{field} is invalid"));
                        (field, message)
                    })
            })
            .collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = Self::new();
        for (field, message) in fields {
            out.insert(field, message);
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Run the derived validation rules for a form.
///
/// Returns [`CoreError::InvalidForm`] carrying one message per failing
/// field. A form that fails here must not reach the backend.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), CoreError> {
    form.validate()
        .map_err(|e| CoreError::InvalidForm(FieldErrors::from_validation(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[derive(Validate)]
    struct SignupForm {
        #[validate(
            length(min = 1, message = "Email is required"),
            email(message = "Enter a valid email address")
        )]
        email: String,
        #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
        password: String,
    }

    fn obj(v: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn server_errors_map_onto_fields() {
        let errors = vec![
            obj(json!({"email": "Email already exists"})),
            obj(json!({"phone": "Invalid phone", "first_name": "Too short"})),
        ];
        let mapped = FieldErrors::from_server(&errors);
        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped.get("email"), Some("Email already exists"));
        assert_eq!(mapped.get("phone"), Some("Invalid phone"));
        assert_eq!(mapped.get("first_name"), Some("Too short"));
    }

    #[test]
    fn later_server_error_overwrites_earlier() {
        let errors = vec![
            obj(json!({"email": "first"})),
            obj(json!({"email": "second"})),
        ];
        let mapped = FieldErrors::from_server(&errors);
        assert_eq!(mapped.get("email"), Some("second"));
    }

    #[test]
    fn non_string_server_message_is_rendered() {
        let errors = vec![obj(json!({"code": 42}))];
        assert_eq!(FieldErrors::from_server(&errors).get("code"), Some("42"));
    }

    #[test]
    fn empty_required_field_reports_presence_rule() {
        let form = SignupForm {
            email: String::new(),
            password: "secret-enough".into(),
        };
        let err = validate_form(&form).unwrap_err();
        assert_matches!(err, CoreError::InvalidForm(fields) => {
            assert_eq!(fields.get("email"), Some("Email is required"));
            assert!(!fields.contains("password"));
        });
    }

    #[test]
    fn malformed_email_and_short_password_are_both_reported() {
        let form = SignupForm {
            email: "not-an-email".into(),
            password: "abc".into(),
        };
        let err = validate_form(&form).unwrap_err();
        assert_matches!(err, CoreError::InvalidForm(fields) => {
            assert_eq!(fields.get("email"), Some("Enter a valid email address"));
            assert_eq!(
                fields.get("password"),
                Some("Password must be at least 6 characters long")
            );
        });
    }

    #[test]
    fn valid_form_passes() {
        let form = SignupForm {
            email: "hod@college.edu".into(),
            password: "hunter22".into(),
        };
        assert!(validate_form(&form).is_ok());
    }

    #[test]
    fn display_joins_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required");
        errors.insert("phone", "Phone number is required");
        assert_eq!(
            errors.to_string(),
            "email: Email is required; phone: Phone number is required"
        );
    }
}
