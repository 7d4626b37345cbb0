use serde::Serialize;

use super::store::SessionStore;
use crate::error::HrDocsError;

/// Route of the login view.
pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of a gate check for a protected view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Allow,
    Redirect { to: String },
}

/// Decides reachability of protected views from the session flag.
#[derive(Debug, Clone)]
pub struct SessionGate {
    session: SessionStore,
}

impl SessionGate {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn check(&self) -> GateDecision {
        if self.session.is_logged_in() {
            GateDecision::Allow
        } else {
            GateDecision::Redirect {
                to: LOGIN_ROUTE.to_string(),
            }
        }
    }

    /// Guard for backend operations behind the login.
    pub fn require(&self) -> Result<(), HrDocsError> {
        match self.check() {
            GateDecision::Allow => Ok(()),
            GateDecision::Redirect { .. } => Err(HrDocsError::NotLoggedIn),
        }
    }
}
