//! Current route and history.
//!
//! The navigator subscribes to the [`AuthSession`] and applies pending
//! auth events before every read or move, so a logout or an expired token
//! always lands on `/login` no matter which screen triggered it.

use std::sync::Arc;

use campus_core::navigation::Route;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::sync::{broadcast, Mutex, RwLock};

use crate::auth::{AuthEvent, AuthSession};

#[derive(Debug)]
struct NavState {
    current: Route,
    history: Vec<Route>,
}

/// Shared navigation handle. Cloning yields another handle.
#[derive(Clone)]
pub struct Navigator {
    state: Arc<RwLock<NavState>>,
    events: Arc<Mutex<broadcast::Receiver<AuthEvent>>>,
    session: AuthSession,
}

impl Navigator {
    pub fn new(session: &AuthSession, start: Route) -> Self {
        Self {
            state: Arc::new(RwLock::new(NavState {
                current: start,
                history: Vec::new(),
            })),
            events: Arc::new(Mutex::new(session.subscribe())),
            session: session.clone(),
        }
    }

    pub async fn current(&self) -> Route {
        self.sync().await;
        self.state.read().await.current
    }

    /// Previously visited routes, oldest first.
    pub async fn history(&self) -> Vec<Route> {
        self.sync().await;
        self.state.read().await.history.clone()
    }

    pub async fn push(&self, route: Route) {
        self.sync().await;
        let mut state = self.state.write().await;
        if state.current != route {
            let previous = std::mem::replace(&mut state.current, route);
            state.history.push(previous);
        }
        tracing::debug!(route = %route, "Navigate");
    }

    /// Go to `route` without recording the current page.
    pub async fn replace(&self, route: Route) {
        self.sync().await;
        self.state.write().await.current = route;
        tracing::debug!(route = %route, "Navigate (replace)");
    }

    pub async fn back(&self) -> Option<Route> {
        self.sync().await;
        let mut state = self.state.write().await;
        let previous = state.history.pop()?;
        state.current = previous;
        Some(previous)
    }

    /// Navigate to `route` if the session allows it, otherwise to `/login`.
    /// Returns where the user ended up.
    pub async fn open(&self, route: Route) -> Route {
        if !route.is_public() && !self.session.is_authenticated().await {
            self.replace(Route::Login).await;
            return Route::Login;
        }
        self.push(route).await;
        route
    }

    async fn sync(&self) {
        let mut events = self.events.lock().await;
        loop {
            match events.try_recv() {
                Ok(AuthEvent::Expired | AuthEvent::LoggedOut) => {
                    let mut state = self.state.write().await;
                    state.current = Route::Login;
                    state.history.clear();
                    tracing::info!("Session ended, redirecting to login");
                }
                Ok(AuthEvent::LoggedIn) => {}
                // Skipped events are all session changes; keep draining.
                Err(TryRecvError::Lagged(_)) => {}
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }
}
