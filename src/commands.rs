use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

fn no_args() -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(&serde_json::json!({})).map_err(|e| e.to_string())
}

fn invoke_error(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

// -- Types matching backend structs --

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    Offer,
    Appointment,
    Termination,
    Experience,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub label: String,
    pub section_title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DocumentTypeInfo {
    pub kind: DocumentType,
    pub label: String,
    pub fields: Vec<FieldInfo>,
}

/// The form being edited. Holds exactly the fields of `document_type`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DocumentForm {
    pub document_type: DocumentType,
    pub fields: BTreeMap<String, String>,
}

impl DocumentForm {
    pub fn value(&self, field: &str) -> String {
        self.fields.get(field).cloned().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    Allow,
    Redirect { to: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    LoggedIn,
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationResult {
    Artifact {
        file_name: String,
        download_url: String,
        review: Option<String>,
        saved_to: Option<String>,
    },
    NoArtifact {
        review: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationState {
    Idle,
    Submitting {
        document_type: DocumentType,
        started_at: String,
    },
    Succeeded {
        document_type: DocumentType,
        result: GenerationResult,
        completed_at: String,
    },
    Failed {
        document_type: DocumentType,
        kind: String,
        message: String,
        completed_at: String,
    },
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientSettings {
    pub base_url: String,
    pub response_policy: String,
    pub download_dir: String,
    pub credentials_configured: bool,
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct LoginArgs {
    username: String,
    password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentTypeArgs {
    document_type: DocumentType,
}

#[derive(Serialize)]
struct UpdateFieldArgs {
    field: String,
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DownloadArgs {
    file_name: String,
}

// -- Session --

pub async fn check_session() -> Result<GateDecision, String> {
    let result = invoke("check_session", no_args()?).await.map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// A rejected login is an `Ok` outcome carrying the message to show.
pub async fn login(username: &str, password: &str) -> Result<LoginOutcome, String> {
    let args = serde_wasm_bindgen::to_value(&LoginArgs {
        username: username.to_string(),
        password: password.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("login", args).await.map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn logout() -> Result<(), String> {
    invoke("logout", no_args()?)
        .await
        .map(|_| ())
        .map_err(invoke_error)
}

// -- Document forms --

pub async fn list_document_types() -> Result<Vec<DocumentTypeInfo>, String> {
    let result = invoke("list_document_types", no_args()?)
        .await
        .map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn open_form(document_type: DocumentType) -> Result<DocumentForm, String> {
    let args = serde_wasm_bindgen::to_value(&DocumentTypeArgs { document_type })
        .map_err(|e| e.to_string())?;

    let result = invoke("open_form", args).await.map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn update_field(field: &str, value: &str) -> Result<DocumentForm, String> {
    let args = serde_wasm_bindgen::to_value(&UpdateFieldArgs {
        field: field.to_string(),
        value: value.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("update_field", args).await.map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn reset_form() -> Result<DocumentForm, String> {
    let result = invoke("reset_form", no_args()?).await.map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Switch letter type. Fields outside the new schema are dropped by the backend.
pub async fn select_document_type(document_type: DocumentType) -> Result<DocumentForm, String> {
    let args = serde_wasm_bindgen::to_value(&DocumentTypeArgs { document_type })
        .map_err(|e| e.to_string())?;

    let result = invoke("select_document_type", args)
        .await
        .map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// -- Generation --

pub async fn generate_document() -> Result<GenerationState, String> {
    let result = invoke("generate_document", no_args()?)
        .await
        .map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Save a generated file locally. Returns the saved path.
pub async fn download_document(file_name: &str) -> Result<String, String> {
    let args = serde_wasm_bindgen::to_value(&DownloadArgs {
        file_name: file_name.to_string(),
    })
    .map_err(|e| e.to_string())?;

    let result = invoke("download_document", args)
        .await
        .map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn get_client_settings() -> Result<ClientSettings, String> {
    let result = invoke("get_client_settings", no_args()?)
        .await
        .map_err(invoke_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}
