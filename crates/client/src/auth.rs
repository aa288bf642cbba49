//! Bearer-token session and the login screen.
//!
//! [`AuthSession`] is the only owner of the token. The HTTP client reads it
//! per request, login writes it, and logout or a 401 clears it. Every change
//! is broadcast as an [`AuthEvent`] so the navigator can react.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use campus_core::models::Admin;
use campus_core::navigation::{Role, Route};
use campus_core::validation::{validate_form, FieldErrors};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use validator::Validate;

use crate::config::ConsoleConfig;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::navigator::Navigator;

// ---------------------------------------------------------------------------
// Token storage
// ---------------------------------------------------------------------------

/// Where the bearer token survives between sessions.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Keeps nothing beyond the session itself; a restart logs the user out.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryTokenStore;

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(None)
    }

    fn save(&self, _token: &str) -> io::Result<()> {
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        Ok(())
    }
}

/// Persists the token as a single-line file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn,
    /// The user logged out.
    LoggedOut,
    /// The backend rejected the token.
    Expired,
}

const EVENT_CAPACITY: usize = 16;

struct SessionInner {
    store: Box<dyn TokenStore>,
    token: RwLock<Option<String>>,
    events: broadcast::Sender<AuthEvent>,
}

/// Shared bearer-token session. Cloning yields another handle.
#[derive(Clone)]
pub struct AuthSession {
    inner: Arc<SessionInner>,
}

impl AuthSession {
    /// Open a session, restoring any token the store holds.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        let token = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read stored token");
            None
        });
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(SessionInner {
                store: Box::new(store),
                token: RwLock::new(token),
                events,
            }),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStore)
    }

    /// File-backed when `CAMPUS_TOKEN_PATH` is set, otherwise in memory.
    pub fn from_config(config: &ConsoleConfig) -> Self {
        match &config.token_path {
            Some(path) => Self::new(FileTokenStore::new(path)),
            None => Self::in_memory(),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.token.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    /// Store a fresh token and announce the login.
    pub async fn set_token(&self, token: impl Into<String>) -> io::Result<()> {
        let token = token.into();
        let saved = token.clone();
        self.with_store(move |store| store.save(&saved)).await?;
        *self.inner.token.write().await = Some(token);
        let _ = self.inner.events.send(AuthEvent::LoggedIn);
        tracing::info!("Session started");
        Ok(())
    }

    /// Drop the token after an explicit logout.
    pub async fn clear(&self) {
        self.end(AuthEvent::LoggedOut).await;
    }

    /// Drop the token after the backend rejected it.
    pub async fn expire(&self) {
        self.end(AuthEvent::Expired).await;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.inner.events.subscribe()
    }

    /// Run a store operation on the blocking pool.
    async fn with_store<T, F>(&self, op: F) -> io::Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn TokenStore) -> io::Result<T> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(inner.store.as_ref()))
            .await
            .map_err(io::Error::other)?
    }

    async fn end(&self, event: AuthEvent) {
        *self.inner.token.write().await = None;
        if let Err(e) = self.with_store(|store| store.clear()).await {
            tracing::warn!(error = %e, "Failed to clear stored token");
        }
        // Ignore the SendError; it only means nobody is listening.
        let _ = self.inner.events.send(event);
        tracing::info!(?event, "Session ended");
    }
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct LoginForm {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Enter a valid email address")
    )]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    #[serde(default)]
    access_token: Option<String>,
}

/// Login screen for one role's entry point.
pub struct LoginScreen {
    api: ApiClient,
    navigator: Navigator,
    role: Role,
    errors: FieldErrors,
    submitting: bool,
}

impl LoginScreen {
    pub fn new(api: ApiClient, navigator: Navigator, role: Role) -> Self {
        Self {
            api,
            navigator,
            role,
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate, exchange the credentials for a token and open the role's
    /// home screen.
    pub async fn submit(&mut self, form: &LoginForm) -> Result<Route, ClientError> {
        let form = LoginForm {
            email: form.email.trim().to_string(),
            password: form.password.clone(),
        };
        self.errors = FieldErrors::new();
        validate_form(&form).map_err(|e| self.capture(e.into()))?;

        self.submitting = true;
        let result = self.exchange(&form).await;
        self.submitting = false;

        match result {
            Ok(()) => {
                let home = self.role.home();
                self.navigator.push(home).await;
                Ok(home)
            }
            Err(err) => {
                if err.field_errors().is_none() {
                    self.api.notices().report(&err).await;
                }
                Err(self.capture(err))
            }
        }
    }

    async fn exchange(&self, form: &LoginForm) -> Result<(), ClientError> {
        let payload: LoginPayload = self.api.post_public("/auth/login", form).await?;
        let token = payload
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingToken)?;
        self.api.session().set_token(token).await?;
        tracing::info!(role = ?self.role, "Logged in");
        Ok(())
    }

    fn capture(&mut self, err: ClientError) -> ClientError {
        if let Some(fields) = err.field_errors() {
            self.errors = fields.clone();
        }
        err
    }
}

/// End the session and go to the login screen.
pub async fn logout(api: &ApiClient, navigator: &Navigator) {
    api.session().clear().await;
    navigator.replace(Route::Login).await;
}

/// Fetch the signed-in admin.
pub async fn me(api: &ApiClient) -> Result<Admin, ClientError> {
    Ok(api.get("/auth/me").await?)
}
