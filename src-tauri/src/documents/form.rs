use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::DocumentType;
use crate::error::HrDocsError;

/// Field values for one letter, always holding exactly the schema of its type.
///
/// All operations return a new form; a form that has been handed out never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentForm {
    document_type: DocumentType,
    fields: BTreeMap<String, String>,
}

impl Default for DocumentForm {
    fn default() -> Self {
        Self::new(DocumentType::default())
    }
}

impl DocumentForm {
    /// All-empty form for `document_type`.
    pub fn new(document_type: DocumentType) -> Self {
        let fields = document_type
            .schema()
            .iter()
            .map(|name| (name.to_string(), String::new()))
            .collect();
        Self {
            document_type,
            fields,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Replace one field's value. Fields outside the current schema are rejected.
    pub fn update(&self, field: &str, value: &str) -> Result<Self, HrDocsError> {
        if !self.document_type.has_field(field) {
            return Err(HrDocsError::UnknownField {
                document: self.document_type.to_string(),
                field: field.to_string(),
            });
        }
        let mut next = self.clone();
        next.fields.insert(field.to_string(), value.to_string());
        Ok(next)
    }

    pub fn reset(&self) -> Self {
        Self::new(self.document_type)
    }

    /// Switch to another document type.
    ///
    /// Fields shared with the new schema keep their values, fields outside it
    /// are dropped, and new fields start empty.
    pub fn select_type(&self, document_type: DocumentType) -> Self {
        let fields: BTreeMap<String, String> = document_type
            .schema()
            .iter()
            .map(|name| {
                let value = self.fields.get(*name).cloned().unwrap_or_default();
                (name.to_string(), value)
            })
            .collect();

        let dropped = self
            .fields
            .keys()
            .filter(|k| !fields.contains_key(*k))
            .count();
        debug!(
            "Switched form {} -> {}, dropped {} field(s)",
            self.document_type, document_type, dropped
        );

        Self {
            document_type,
            fields,
        }
    }

    /// JSON body for the generation request.
    pub fn payload(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }

    pub fn filled_count(&self) -> usize {
        self.fields.values().filter(|v| !v.is_empty()).count()
    }
}
