pub mod config;
mod commands;
pub mod documents;
pub mod error;
pub mod generation;
pub mod session;
pub mod state;

use std::sync::Arc;

use tracing::warn;

pub use config::{AppConfig, Credentials, ResponsePolicy};
pub use documents::{DocumentForm, DocumentType, FormState};
pub use error::{FailureKind, GenerationError, HrDocsError};
pub use generation::{GenerationResult, GenerationState, HttpGenerationService, RequestOrchestrator};
pub use session::{CredentialValidator, SessionGate, SessionStore};
pub use state::AppState;

/// Store file holding the login flag.
const SESSION_STORE_FILE: &str = "session.json";

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("{}, falling back to built-in defaults", e);
        AppConfig::defaults()
    });

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::session::is_logged_in,
            commands::session::check_session,
            commands::session::login,
            commands::session::logout,
            commands::documents::list_document_types,
            commands::documents::get_form,
            commands::documents::open_form,
            commands::documents::update_field,
            commands::documents::reset_form,
            commands::documents::select_document_type,
            commands::generation::generate_document,
            commands::generation::get_generation_state,
            commands::generation::download_document,
            commands::config::get_client_settings,
        ])
        .setup(move |app| {
            use tauri::Manager;
            use tauri_plugin_store::StoreExt;

            let session = match app.store(SESSION_STORE_FILE) {
                Ok(store) => SessionStore::new(Arc::new(session::TauriKeyValueStore::new(store))),
                Err(e) => {
                    warn!("Session storage unavailable, logins will not persist: {}", e);
                    SessionStore::detached()
                }
            };
            let service = HttpGenerationService::new(&config)?;
            app.manage(AppState::new(config, session, service));
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
