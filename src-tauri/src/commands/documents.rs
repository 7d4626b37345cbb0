use tauri::State;

use crate::documents::{DocumentForm, DocumentType, DocumentTypeInfo};
use crate::state::AppState;

#[tauri::command]
pub fn list_document_types() -> Vec<DocumentTypeInfo> {
    DocumentType::ALL.into_iter().map(DocumentType::info).collect()
}

#[tauri::command]
pub fn get_form(state: State<'_, AppState>) -> Result<DocumentForm, String> {
    Ok(state.form()?)
}

#[tauri::command]
pub fn open_form(
    state: State<'_, AppState>,
    document_type: DocumentType,
) -> Result<DocumentForm, String> {
    Ok(state.open_form(document_type)?)
}

#[tauri::command]
pub fn update_field(
    state: State<'_, AppState>,
    field: &str,
    value: &str,
) -> Result<DocumentForm, String> {
    Ok(state.update_field(field, value)?)
}

#[tauri::command]
pub fn reset_form(state: State<'_, AppState>) -> Result<DocumentForm, String> {
    Ok(state.reset_form()?)
}

#[tauri::command]
pub fn select_document_type(
    state: State<'_, AppState>,
    document_type: DocumentType,
) -> Result<DocumentForm, String> {
    Ok(state.select_document_type(document_type)?)
}
