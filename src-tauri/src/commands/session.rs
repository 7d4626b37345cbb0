use tauri::State;
use tracing::info;

use crate::session::{GateDecision, LoginOutcome};
use crate::state::AppState;

#[tauri::command]
pub fn is_logged_in(state: State<'_, AppState>) -> bool {
    state.session.is_logged_in()
}

/// Gate check for protected views. The frontend renders nothing until this resolves.
#[tauri::command]
pub fn check_session(state: State<'_, AppState>) -> GateDecision {
    let decision = state.check_session();
    info!("Session gate: {:?}", decision);
    decision
}

/// A rejection carries the message the login view shows.
#[tauri::command]
pub fn login(state: State<'_, AppState>, username: &str, password: &str) -> LoginOutcome {
    state.validator.login(username, password)
}

#[tauri::command]
pub fn logout(state: State<'_, AppState>) {
    state.logout();
}
