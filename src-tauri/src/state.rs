use tracing::info;

use crate::config::AppConfig;
use crate::documents::{DocumentForm, DocumentType, FormState};
use crate::error::HrDocsError;
use crate::generation::{GenerationService, GenerationState, HttpGenerationService, RequestOrchestrator};
use crate::session::{CredentialValidator, GateDecision, SessionGate, SessionStore};

/// Everything the command handlers share, managed by Tauri.
///
/// Form and generation operations sit behind the session gate.
pub struct AppState<S = HttpGenerationService> {
    pub config: AppConfig,
    pub session: SessionStore,
    pub validator: CredentialValidator,
    pub gate: SessionGate,
    pub form: FormState,
    pub orchestrator: RequestOrchestrator<S>,
}

impl<S: GenerationService> AppState<S> {
    pub fn new(config: AppConfig, session: SessionStore, service: S) -> Self {
        let validator = CredentialValidator::new(config.credentials.clone(), session.clone());
        let gate = SessionGate::new(session.clone());
        let orchestrator = RequestOrchestrator::from_config(service, &config);
        info!(
            "Document service at {} ({:?} policy)",
            config.base_url(),
            orchestrator.policy()
        );
        Self {
            config,
            session,
            validator,
            gate,
            form: FormState::new(),
            orchestrator,
        }
    }

    pub fn check_session(&self) -> GateDecision {
        self.gate.check()
    }

    pub fn login(&self, username: &str, password: &str) -> bool {
        self.validator.attempt_login(username, password)
    }

    pub fn logout(&self) {
        self.validator.logout();
    }

    pub fn form(&self) -> Result<DocumentForm, HrDocsError> {
        self.gate.require()?;
        Ok(self.form.snapshot())
    }

    pub fn open_form(&self, document_type: DocumentType) -> Result<DocumentForm, HrDocsError> {
        self.gate.require()?;
        Ok(self.form.open(document_type))
    }

    pub fn update_field(&self, field: &str, value: &str) -> Result<DocumentForm, HrDocsError> {
        self.gate.require()?;
        self.form.update(field, value)
    }

    pub fn reset_form(&self) -> Result<DocumentForm, HrDocsError> {
        self.gate.require()?;
        Ok(self.form.reset())
    }

    pub fn select_document_type(
        &self,
        document_type: DocumentType,
    ) -> Result<DocumentForm, HrDocsError> {
        self.gate.require()?;
        Ok(self.form.select_type(document_type))
    }

    /// Generate from a snapshot of the current form.
    ///
    /// `Ok(None)` means another generation was already in flight.
    pub async fn generate(&self) -> Result<Option<GenerationState>, HrDocsError> {
        self.gate.require()?;
        let snapshot = self.form.snapshot();
        info!(
            "Dispatching {} letter with {} of {} field(s) filled",
            snapshot.document_type(),
            snapshot.filled_count(),
            snapshot.fields().len()
        );
        Ok(self.orchestrator.generate(snapshot).await)
    }

    pub async fn download(&self, file_name: &str) -> Result<String, HrDocsError> {
        self.gate.require()?;
        let path = self.orchestrator.download(file_name).await?;
        Ok(path.display().to_string())
    }
}
