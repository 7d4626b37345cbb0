use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Message shown when a failure carries no usable text of its own.
pub const GENERIC_FAILURE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum HrDocsError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown document type '{0}'")]
    UnknownDocumentType(String),

    #[error("Unknown field '{field}' for {document} letter")]
    UnknownField { document: String, field: String },

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl From<HrDocsError> for String {
    fn from(err: HrDocsError) -> Self {
        match err {
            HrDocsError::Generation(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Failure of a single generation or download attempt.
///
/// Every variant is terminal for the attempt and recoverable by submitting again.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    /// Non-success status. The display form is the server's body, verbatim.
    #[error("{body}")]
    Rejected { status: u16, body: String },

    #[error("{0}")]
    Unreachable(String),

    #[error("Request timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("No file returned")]
    NoFileReturned,

    #[error("{0}")]
    Malformed(String),

    #[error("Download failed: {0}")]
    Download(String),
}

/// Coarse failure classes surfaced to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    ContractViolation,
    Unexpected,
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Rejected { .. } | Self::Unreachable(_) | Self::TimedOut(_) => {
                FailureKind::Transport
            }
            Self::NoFileReturned => FailureKind::ContractViolation,
            Self::Malformed(_) | Self::Download(_) => FailureKind::Unexpected,
        }
    }

    /// Text for the error banner. Empty messages fall back to [`GENERIC_FAILURE`].
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Unreachable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_body_verbatim() {
        let err = GenerationError::Rejected {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.user_message(), "boom");
        assert_eq!(err.kind(), FailureKind::Transport);
    }

    #[test]
    fn test_empty_body_falls_back_to_generic_message() {
        let err = GenerationError::Rejected {
            status: 502,
            body: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_missing_file_is_contract_violation() {
        let err = GenerationError::NoFileReturned;
        assert_eq!(err.user_message(), "No file returned");
        assert_eq!(err.kind(), FailureKind::ContractViolation);
    }

    #[test]
    fn test_command_boundary_uses_user_message() {
        let err: String = HrDocsError::from(GenerationError::Malformed(String::new())).into();
        assert_eq!(err, GENERIC_FAILURE);

        let err: String = HrDocsError::NotLoggedIn.into();
        assert_eq!(err, "Not logged in");
    }
}
