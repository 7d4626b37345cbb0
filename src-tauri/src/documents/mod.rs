//! Letter kinds, their field schemas, and the editable form.

pub mod form;
pub mod state;
pub mod types;

pub use form::DocumentForm;
pub use state::FormState;
pub use types::{field_spec, DocumentType, DocumentTypeInfo, FieldInfo, FieldSpec, Section};
