use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use super::form::DocumentForm;
use super::types::DocumentType;
use crate::error::HrDocsError;

/// The form being edited, shared between commands.
///
/// The selected document type is the type of the held form. Every mutation
/// swaps in a whole new [`DocumentForm`], so a snapshot taken for dispatch is
/// never affected by later edits.
#[derive(Debug, Default)]
pub struct FormState {
    current: Mutex<DocumentForm>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DocumentForm {
        self.lock().clone()
    }

    pub fn document_type(&self) -> DocumentType {
        self.lock().document_type()
    }

    /// Start a fresh, all-empty form for `document_type`.
    pub fn open(&self, document_type: DocumentType) -> DocumentForm {
        let form = DocumentForm::new(document_type);
        *self.lock() = form.clone();
        info!("Opened {} form", document_type);
        form
    }

    pub fn update(&self, field: &str, value: &str) -> Result<DocumentForm, HrDocsError> {
        let mut current = self.lock();
        let next = current.update(field, value)?;
        *current = next.clone();
        Ok(next)
    }

    pub fn reset(&self) -> DocumentForm {
        let mut current = self.lock();
        let next = current.reset();
        *current = next.clone();
        info!("Reset {} form", next.document_type());
        next
    }

    pub fn select_type(&self, document_type: DocumentType) -> DocumentForm {
        let mut current = self.lock();
        let next = current.select_type(document_type);
        *current = next.clone();
        info!("Selected {} letter", document_type);
        next
    }

    fn lock(&self) -> MutexGuard<'_, DocumentForm> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_offer() {
        let state = FormState::new();
        assert_eq!(state.document_type(), DocumentType::Offer);
        assert_eq!(state.snapshot(), DocumentForm::new(DocumentType::Offer));
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_edits() {
        let state = FormState::new();
        state.update("employee_name", "Asha Rao").unwrap();
        let snapshot = state.snapshot();

        state.update("employee_name", "Someone Else").unwrap();

        assert_eq!(snapshot.get("employee_name"), Some("Asha Rao"));
        assert_eq!(state.snapshot().get("employee_name"), Some("Someone Else"));
    }

    #[test]
    fn test_failed_update_keeps_form() {
        let state = FormState::new();
        state.update("ctc", "6 LPA").unwrap();
        let before = state.snapshot();

        assert!(state.update("reason", "x").is_err());
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_select_then_reset_uses_new_type() {
        let state = FormState::new();
        state.update("employee_name", "Asha Rao").unwrap();
        state.select_type(DocumentType::Experience);
        state.update("end_date", "2024-12-31").unwrap();

        let reset = state.reset();
        assert_eq!(reset, DocumentForm::new(DocumentType::Experience));
    }

    #[test]
    fn test_open_discards_previous_values() {
        let state = FormState::new();
        state.update("employee_name", "Asha Rao").unwrap();
        let form = state.open(DocumentType::Appointment);
        assert_eq!(form, DocumentForm::new(DocumentType::Appointment));
        assert_eq!(state.snapshot(), form);
    }
}
