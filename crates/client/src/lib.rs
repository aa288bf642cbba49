//! Headless college admin console.
//!
//! Holds the state, validation, request and navigation logic behind each
//! console screen. A view layer drives the screen controllers in
//! [`screens`] and renders their state. Pure domain types live in
//! `campus-core`.

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod navigator;
pub mod notify;
pub mod screens;
pub mod telemetry;

use campus_core::navigation::Route;
use campus_core::resource::Resource;

use crate::auth::AuthSession;
use crate::config::ConsoleConfig;
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::navigator::Navigator;
use crate::notify::NotificationCenter;
use crate::screens::create::CreateForm;
use crate::screens::detail::DetailScreen;
use crate::screens::list::ListScreen;

/// Shared handles for one console session, wired from configuration.
#[derive(Clone)]
pub struct Console {
    pub config: ConsoleConfig,
    pub session: AuthSession,
    pub notices: NotificationCenter,
    pub navigator: Navigator,
    pub api: ApiClient,
}

impl Console {
    pub fn new(config: ConsoleConfig) -> Result<Self, ClientError> {
        let session = AuthSession::from_config(&config);
        let notices = NotificationCenter::new();
        let api = ApiClient::new(&config, session.clone(), notices.clone())?;
        let navigator = Navigator::new(&session, Route::Home);
        Ok(Self {
            config,
            session,
            notices,
            navigator,
            api,
        })
    }

    /// Load configuration from the environment and wire the handles.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ConsoleConfig::from_env()?)
    }

    pub fn list<R: Resource>(&self) -> ListScreen<R> {
        ListScreen::new(self.api.clone(), self.config.page_size)
    }

    pub fn detail<R: Resource>(&self) -> DetailScreen<R> {
        DetailScreen::new(self.api.clone(), self.navigator.clone())
    }

    pub fn create<R: Resource>(&self) -> CreateForm<R> {
        CreateForm::new(self.api.clone(), self.navigator.clone())
    }
}
