//! REST client for the college backend.
//!
//! Wraps [`reqwest`] with the backend base URL, a JSON content type, the
//! configured timeout and bearer-token injection from the [`AuthSession`].
//! Successful bodies are unwrapped from the `{ "payload": ... }` envelope.
//! Failures are classified into [`ApiError`] in one place:
//!
//! * 401 on an authenticated request expires the session, which the
//!   navigator turns into a redirect to `/login`;
//! * 400/404/409 carry the backend's per-field messages;
//! * 5xx publishes the global "try again later" notice.

use std::sync::Arc;
use std::time::Instant;

use campus_core::validation::FieldErrors;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::auth::AuthSession;
use crate::config::ConsoleConfig;
use crate::error::{SERVER_ERROR_MESSAGE, UNAUTHORIZED_MESSAGE};
use crate::notify::NotificationCenter;

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The bearer token was missing or rejected. The session has been
    /// cleared by the time the caller sees this.
    #[error("Not authorized")]
    Unauthorized,

    /// The backend refused the input (400, 404 or 409).
    #[error("Request rejected ({status}): {errors}")]
    Rejected {
        status: u16,
        message: Option<String>,
        errors: FieldErrors,
    },

    #[error("Server error ({status})")]
    Server { status: u16 },

    /// Any other non-2xx status.
    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The body was not the expected JSON envelope.
    #[error("Malformed response: {0}")]
    Envelope(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Unauthorized => Some(401),
            Self::Rejected { status, .. } | Self::Server { status } | Self::Status { status, .. } => {
                Some(*status)
            }
            Self::Envelope(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Bearer,
    Public,
}

/// HTTP client shared by every screen. Cloning is cheap.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Arc<str>,
    session: AuthSession,
    notices: NotificationCenter,
}

impl ApiClient {
    pub fn new(
        config: &ConsoleConfig,
        session: AuthSession,
        notices: NotificationCenter,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, &config.api_url, session, notices))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        session: AuthSession,
        notices: NotificationCenter,
    ) -> Self {
        Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            session,
            notices,
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn notices(&self) -> &NotificationCenter {
        &self.notices
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None::<&()>, Auth::Bearer).await?;
        Self::parse_payload(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body), Auth::Bearer).await?;
        Self::parse_payload(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::PUT, path, Some(body), Auth::Bearer).await?;
        Self::parse_payload(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, None::<&()>, Auth::Bearer)
            .await?;
        Ok(())
    }

    /// Download a binary body (certificate PDFs).
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.send(Method::GET, path, None::<&()>, Auth::Bearer).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// POST without a bearer token. A 401 here is a rejected credential,
    /// not an expired session.
    pub async fn post_public<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body), Auth::Public).await?;
        Self::parse_payload(response).await
    }

    // ---- private helpers ----

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        auth: Auth,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if auth == Auth::Bearer {
            if let Some(token) = self.session.token().await {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "Request failed");
                return Err(e.into());
            }
        };
        tracing::debug!(
            %method,
            path,
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API request"
        );

        self.classify(response, auth).await
    }

    async fn classify(
        &self,
        response: reqwest::Response,
        auth: Auth,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        match status {
            StatusCode::UNAUTHORIZED if auth == Auth::Bearer => {
                self.session.expire().await;
                self.notices.error(UNAUTHORIZED_MESSAGE).await;
                Err(ApiError::Unauthorized)
            }
            StatusCode::BAD_REQUEST
            | StatusCode::UNAUTHORIZED
            | StatusCode::NOT_FOUND
            | StatusCode::CONFLICT => Err(rejected(status.as_u16(), &body)),
            s if s.is_server_error() => {
                self.notices.error(SERVER_ERROR_MESSAGE).await;
                Err(ApiError::Server {
                    status: s.as_u16(),
                })
            }
            s => Err(ApiError::Status {
                status: s.as_u16(),
                body,
            }),
        }
    }

    /// Unwrap `payload` from a successful body. An empty body or a body
    /// without `payload` reads as JSON `null`.
    async fn parse_payload<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let bytes = response.bytes().await?;
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            let mut body: Value = serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::Envelope(format!("body is not JSON: {e}")))?;
            body.get_mut("payload").map(Value::take).unwrap_or(Value::Null)
        };
        serde_json::from_value(payload).map_err(|e| ApiError::Envelope(e.to_string()))
    }
}

/// Build [`ApiError::Rejected`] from a `{ message?, errors?: [{ field: msg }] }` body.
fn rejected(status: u16, body: &str) -> ApiError {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let entries: Vec<serde_json::Map<String, Value>> = parsed
        .get("errors")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|e| e.as_object().cloned())
                .collect()
        })
        .unwrap_or_default();
    let message = parsed
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    ApiError::Rejected {
        status,
        message,
        errors: FieldErrors::from_server(&entries),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn rejected_reads_field_list_and_message() {
        let body = r#"{"message":"Validation failed","errors":[{"email":"Email already exists"},{"phone":"Invalid"}]}"#;
        assert_matches!(rejected(409, body), ApiError::Rejected { status: 409, message, errors } => {
            assert_eq!(message.as_deref(), Some("Validation failed"));
            assert_eq!(errors.get("email"), Some("Email already exists"));
            assert_eq!(errors.len(), 2);
        });
    }

    #[test]
    fn rejected_tolerates_non_json_body() {
        assert_matches!(rejected(404, "Not Found"), ApiError::Rejected { message: None, errors, .. } => {
            assert!(errors.is_empty());
        });
    }

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
        assert_eq!(ApiError::Server { status: 503 }.status(), Some(503));
        assert_eq!(ApiError::Envelope("x".into()).status(), None);
    }
}
