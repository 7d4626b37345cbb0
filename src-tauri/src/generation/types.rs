use serde::{Deserialize, Serialize};

use crate::documents::DocumentType;
use crate::error::FailureKind;

/// Success body of a generation endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerationResponse {
    #[serde(default)]
    pub docx_file: Option<String>,
    /// Usually a string, but the service passes model output through untouched.
    #[serde(default)]
    pub ai_review: Option<serde_json::Value>,
}

impl GenerationResponse {
    /// Server-assigned file name. An empty string counts as absent.
    pub fn file_name(&self) -> Option<&str> {
        self.docx_file.as_deref().filter(|name| !name.is_empty())
    }

    /// Review text for display. Non-string values are pretty-printed.
    pub fn review_text(&self) -> Option<String> {
        match &self.ai_review {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(text)) if text.is_empty() => None,
            Some(serde_json::Value::String(text)) => Some(text.clone()),
            Some(other) => serde_json::to_string_pretty(other).ok(),
        }
    }
}

/// What a successful generation produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationResult {
    Artifact {
        file_name: String,
        download_url: String,
        review: Option<String>,
        /// Local path, set when the file was fetched as part of generation.
        saved_to: Option<String>,
    },
    NoArtifact {
        review: Option<String>,
    },
}

impl GenerationResult {
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Artifact { file_name, .. } => Some(file_name),
            Self::NoArtifact { .. } => None,
        }
    }
}

/// Lifecycle of the latest generation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GenerationState {
    #[default]
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
        kind: FailureKind,
        message: String,
        completed_at: String,
    },
}

impl GenerationState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            Self::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> GenerationResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_response_fields() {
        let r = parse(r#"{"docx_file": "offer_123.docx", "ai_review": "looks good"}"#);
        assert_eq!(r.file_name(), Some("offer_123.docx"));
        assert_eq!(r.review_text().as_deref(), Some("looks good"));
    }

    #[test]
    fn test_empty_object_has_nothing() {
        let r = parse("{}");
        assert_eq!(r.file_name(), None);
        assert_eq!(r.review_text(), None);
    }

    #[test]
    fn test_empty_file_name_is_absent() {
        let r = parse(r#"{"docx_file": ""}"#);
        assert_eq!(r.file_name(), None);
    }

    #[test]
    fn test_structured_review_is_pretty_printed() {
        let r = parse(r#"{"docx_file": "a.docx", "ai_review": {"risk_score": 3}}"#);
        let text = r.review_text().unwrap();
        assert!(text.contains("\"risk_score\": 3"));
    }

    #[test]
    fn test_structured_review_keeps_server_key_order() {
        let r = parse(r#"{"ai_review": {"tone": "formal", "clarity": "good", "accuracy": "high"}}"#);
        let text = r.review_text().unwrap();
        let tone = text.find("tone").unwrap();
        let clarity = text.find("clarity").unwrap();
        let accuracy = text.find("accuracy").unwrap();
        assert!(tone < clarity && clarity < accuracy, "order changed: {}", text);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let r = parse(r#"{"docx_file": "a.docx", "pages": 2}"#);
        assert_eq!(r.file_name(), Some("a.docx"));
    }

    #[test]
    fn test_state_wire_shape() {
        let state = GenerationState::Succeeded {
            document_type: DocumentType::Offer,
            result: GenerationResult::NoArtifact { review: None },
            completed_at: "2025-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "succeeded");
        assert_eq!(json["document_type"], "offer");
        assert_eq!(json["result"]["kind"], "no_artifact");
    }
}
