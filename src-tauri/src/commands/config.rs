use tauri::State;

use crate::config::ClientSettings;
use crate::state::AppState;

#[tauri::command]
pub fn get_client_settings(state: State<'_, AppState>) -> ClientSettings {
    state.config.client_settings()
}
