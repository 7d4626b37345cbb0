use tauri::State;
use tracing::info;

use crate::generation::GenerationState;
use crate::state::AppState;

/// Generate the selected letter from the current form.
///
/// When a generation is already running the call is a no-op and the
/// in-flight state is returned.
#[tauri::command]
pub async fn generate_document(state: State<'_, AppState>) -> Result<GenerationState, String> {
    match state.generate().await? {
        Some(next) => Ok(next),
        None => {
            info!("Ignored generate request: already in flight");
            Ok(state.orchestrator.state())
        }
    }
}

#[tauri::command]
pub fn get_generation_state(state: State<'_, AppState>) -> GenerationState {
    state.orchestrator.state()
}

/// Save a generated file to the download directory and return its path.
#[tauri::command]
pub async fn download_document(
    state: State<'_, AppState>,
    file_name: String,
) -> Result<String, String> {
    Ok(state.download(&file_name).await?)
}
