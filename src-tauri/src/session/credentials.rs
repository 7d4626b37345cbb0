use serde::Serialize;
use tracing::{info, warn};

use super::store::SessionStore;
use crate::config::Credentials;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub const SESSION_UNAVAILABLE: &str = "Session storage is unavailable, so the login cannot be kept";

/// Result of a login attempt as shown by the login view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    LoggedIn,
    Rejected { message: String },
}

impl LoginOutcome {
    fn rejected(message: &str) -> Self {
        Self::Rejected {
            message: message.to_string(),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

/// Checks a login attempt against the configured pair and records the outcome.
///
/// Comparison is exact: case-sensitive, no trimming, no lockout.
#[derive(Debug, Clone)]
pub struct CredentialValidator {
    credentials: Option<Credentials>,
    session: SessionStore,
}

impl CredentialValidator {
    pub fn new(credentials: Option<Credentials>, session: SessionStore) -> Self {
        if credentials.is_none() {
            warn!("No credentials configured, all login attempts will be rejected");
        }
        Self {
            credentials,
            session,
        }
    }

    /// Returns `true` and sets the session flag iff both fields match and the
    /// flag can be stored.
    pub fn attempt_login(&self, username: &str, password: &str) -> bool {
        self.login(username, password).is_logged_in()
    }

    /// Like [`attempt_login`](Self::attempt_login), with the reason for a rejection.
    pub fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let Some(expected) = &self.credentials else {
            warn!("Rejected login for '{}': no credentials configured", username);
            return LoginOutcome::rejected(INVALID_CREDENTIALS);
        };

        if username != expected.username || password != expected.password {
            info!("Login rejected for '{}'", username);
            return LoginOutcome::rejected(INVALID_CREDENTIALS);
        }

        if !self.session.is_persistent() {
            warn!("Login for '{}' matched but there is no session storage", username);
            return LoginOutcome::rejected(SESSION_UNAVAILABLE);
        }

        self.session.set_logged_in();
        info!("Login succeeded for '{}'", username);
        LoginOutcome::LoggedIn
    }

    /// Clears the session flag. Idempotent.
    pub fn logout(&self) {
        self.session.clear_logged_in();
        info!("Logged out");
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }
}
