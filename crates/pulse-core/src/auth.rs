//! Login / Logout

use std::sync::Arc;

use crate::backend::{Backend, Credentials};
use crate::notify::{Notification, Route, Transition};
use crate::session::{AuthToken, Session};

/// Drives the login form and the logout button
#[derive(Clone)]
pub struct AuthFlow {
    backend: Arc<dyn Backend>,
    session: Arc<Session>,
}

impl AuthFlow {
    pub fn new(backend: Arc<dyn Backend>, session: Arc<Session>) -> Self {
        Self { backend, session }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Submit credentials. A response without a token changes nothing.
    pub async fn login(&self, credentials: &Credentials) -> Transition {
        match self.backend.login(credentials).await {
            Ok(response) => {
                let Some(token) = response.token.filter(|t| !t.is_empty()) else {
                    tracing::warn!("Login response carried no token");
                    return Transition::none();
                };
                if let Err(e) = self.session.login(AuthToken::new(token)) {
                    tracing::error!("Failed to persist session token: {}", e);
                    return Transition::notify(Notification::error("Login failed", e.to_string()));
                }
                tracing::info!(email = %credentials.email, "Logged in");
                Transition::notify(Notification::info(
                    "Login successful!",
                    "Redirecting to dashboard...",
                ))
                .navigate_to(Route::Dashboard)
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                let description = e.backend_message().map_or_else(|| e.to_string(), str::to_string);
                Transition::notify(Notification::error("Login failed", description))
            }
        }
    }

    /// Drop the token and go back to the landing page
    pub fn logout(&self) -> Transition {
        if let Err(e) = self.session.logout() {
            tracing::warn!("Failed to clear stored token: {}", e);
        }
        Transition::none().navigate_to(Route::Landing)
    }
}
