use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::client::GenerationService;
use super::types::{GenerationResult, GenerationState};
use crate::config::{AppConfig, ResponsePolicy};
use crate::documents::{DocumentForm, DocumentType};
use crate::error::{FailureKind, GenerationError, GENERIC_FAILURE};

/// Drives one generation attempt at a time against a [`GenerationService`].
///
/// State machine: `Idle -> Submitting -> Succeeded | Failed`, re-entering
/// `Submitting` on the next call. A call made while `Submitting` is ignored.
pub struct RequestOrchestrator<S> {
    service: S,
    policy: ResponsePolicy,
    timeout: Duration,
    download_dir: PathBuf,
    state: Mutex<GenerationState>,
}

impl<S: GenerationService> RequestOrchestrator<S> {
    pub fn new(
        service: S,
        policy: ResponsePolicy,
        timeout: Duration,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            service,
            policy,
            timeout,
            download_dir,
            state: Mutex::new(GenerationState::Idle),
        }
    }

    pub fn from_config(service: S, config: &AppConfig) -> Self {
        Self::new(
            service,
            config.service.response_policy,
            config.timeout(),
            config.download_dir(),
        )
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn policy(&self) -> ResponsePolicy {
        self.policy
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    pub fn state(&self) -> GenerationState {
        self.lock_state().clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock_state().is_submitting()
    }

    /// Submit `form` and record the outcome.
    ///
    /// `form` is the snapshot taken at dispatch; later edits only affect the
    /// next call. Returns `None` without touching the network when another
    /// submission is still in flight.
    pub async fn generate(&self, form: DocumentForm) -> Option<GenerationState> {
        let document_type = form.document_type();
        {
            let mut state = self.lock_state();
            if state.is_submitting() {
                debug!("Generation already in flight, ignoring {} request", document_type);
                return None;
            }
            *state = GenerationState::Submitting {
                document_type,
                started_at: now(),
            };
        }
        let guard = InFlightGuard {
            state: &self.state,
            document_type,
            armed: true,
        };

        let outcome = match tokio::time::timeout(self.timeout, self.run(&form)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(GenerationError::TimedOut(self.timeout)),
        };

        let next = match outcome {
            Ok(result) => {
                info!(
                    "Generated {} letter: {}",
                    document_type,
                    result.file_name().unwrap_or("<no file>")
                );
                GenerationState::Succeeded {
                    document_type,
                    result,
                    completed_at: now(),
                }
            }
            Err(err) => {
                warn!("Generation of {} letter failed: {}", document_type, err);
                GenerationState::Failed {
                    document_type,
                    kind: err.kind(),
                    message: err.user_message(),
                    completed_at: now(),
                }
            }
        };

        guard.finish(next.clone());
        Some(next)
    }

    async fn run(&self, form: &DocumentForm) -> Result<GenerationResult, GenerationError> {
        let endpoint = form.document_type().endpoint();
        let response = self.service.submit(endpoint, &form.payload()).await?;
        let review = response.review_text();

        match (response.file_name(), self.policy) {
            (Some(name), ResponsePolicy::Inline) => Ok(GenerationResult::Artifact {
                file_name: name.to_string(),
                download_url: self.service.download_url(name),
                review,
                saved_to: None,
            }),
            (Some(name), ResponsePolicy::AutoDownload) => {
                let path = self.service.download(name, &self.download_dir).await?;
                Ok(GenerationResult::Artifact {
                    file_name: name.to_string(),
                    download_url: self.service.download_url(name),
                    review,
                    saved_to: Some(path.display().to_string()),
                })
            }
            (None, ResponsePolicy::Inline) => Ok(GenerationResult::NoArtifact { review }),
            (None, ResponsePolicy::AutoDownload) => Err(GenerationError::NoFileReturned),
        }
    }

    /// Fetch a previously generated file into the download directory.
    pub async fn download(&self, file_name: &str) -> Result<PathBuf, GenerationError> {
        let path = tokio::time::timeout(
            self.timeout,
            self.service.download(file_name, &self.download_dir),
        )
        .await
        .map_err(|_| GenerationError::TimedOut(self.timeout))??;
        info!("Downloaded {} to {:?}", file_name, path);
        Ok(path)
    }

    fn lock_state(&self) -> MutexGuard<'_, GenerationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leaves `Submitting` even when the generate future is dropped mid-flight.
struct InFlightGuard<'a> {
    state: &'a Mutex<GenerationState>,
    document_type: DocumentType,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn finish(mut self, next: GenerationState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("{} generation abandoned before completion", self.document_type);
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = GenerationState::Failed {
            document_type: self.document_type,
            kind: FailureKind::Unexpected,
            message: GENERIC_FAILURE.to_string(),
            completed_at: now(),
        };
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::types::GenerationResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted service: returns `reply` after `delay`, counting calls.
    struct FakeService {
        reply: Result<GenerationResponse, GenerationError>,
        delay: Duration,
        submits: AtomicUsize,
        downloads: AtomicUsize,
        endpoints: Mutex<Vec<String>>,
    }

    impl FakeService {
        fn replying(reply: Result<GenerationResponse, GenerationError>) -> Self {
            Self {
                reply,
                delay: Duration::ZERO,
                submits: AtomicUsize::new(0),
                downloads: AtomicUsize::new(0),
                endpoints: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl GenerationService for FakeService {
        async fn submit(
            &self,
            endpoint: &str,
            _payload: &serde_json::Value,
        ) -> Result<GenerationResponse, GenerationError> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            self.endpoints.lock().unwrap().push(endpoint.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        }

        fn download_url(&self, file_name: &str) -> String {
            format!("http://svc/download/{}", file_name)
        }

        async fn download(
            &self,
            file_name: &str,
            dest_dir: &Path,
        ) -> Result<PathBuf, GenerationError> {
            self.downloads.fetch_add(1, Ordering::SeqCst);
            Ok(dest_dir.join(file_name))
        }
    }

    fn artifact(name: &str, review: Option<&str>) -> GenerationResponse {
        GenerationResponse {
            docx_file: Some(name.to_string()),
            ai_review: review.map(|r| serde_json::json!(r)),
        }
    }

    fn orchestrator(service: FakeService, policy: ResponsePolicy) -> RequestOrchestrator<FakeService> {
        RequestOrchestrator::new(
            service,
            policy,
            Duration::from_secs(5),
            PathBuf::from("/tmp/hrdocs-test"),
        )
    }

    #[tokio::test]
    async fn test_inline_success_exposes_artifact() {
        let orch = orchestrator(
            FakeService::replying(Ok(artifact("offer_123.docx", Some("looks good")))),
            ResponsePolicy::Inline,
        );

        let state = orch.generate(DocumentForm::default()).await.unwrap();

        let result = state.result().unwrap();
        assert_eq!(
            result,
            &GenerationResult::Artifact {
                file_name: "offer_123.docx".to_string(),
                download_url: "http://svc/download/offer_123.docx".to_string(),
                review: Some("looks good".to_string()),
                saved_to: None,
            }
        );
        assert_eq!(orch.service().downloads.load(Ordering::SeqCst), 0);
        assert!(!orch.is_in_flight());
    }

    #[tokio::test]
    async fn test_inline_without_file_is_not_an_error() {
        let orch = orchestrator(
            FakeService::replying(Ok(GenerationResponse::default())),
            ResponsePolicy::Inline,
        );
        let state = orch.generate(DocumentForm::default()).await.unwrap();
        assert_eq!(
            state.result(),
            Some(&GenerationResult::NoArtifact { review: None })
        );
    }

    #[tokio::test]
    async fn test_auto_download_fetches_file() {
        let orch = orchestrator(
            FakeService::replying(Ok(artifact("a.docx", None))),
            ResponsePolicy::AutoDownload,
        );
        let state = orch.generate(DocumentForm::default()).await.unwrap();

        match state.result().unwrap() {
            GenerationResult::Artifact { saved_to, .. } => {
                assert_eq!(saved_to.as_deref(), Some("/tmp/hrdocs-test/a.docx"));
            }
            other => panic!("Expected artifact, got {:?}", other),
        }
        assert_eq!(orch.service().downloads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_auto_download_without_file_fails() {
        let orch = orchestrator(
            FakeService::replying(Ok(GenerationResponse::default())),
            ResponsePolicy::AutoDownload,
        );
        let state = orch.generate(DocumentForm::default()).await.unwrap();
        assert_eq!(state.error_message(), Some("No file returned"));
        assert!(matches!(
            state,
            GenerationState::Failed {
                kind: FailureKind::ContractViolation,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_rejection_surfaces_body() {
        let orch = orchestrator(
            FakeService::replying(Err(GenerationError::Rejected {
                status: 500,
                body: "boom".to_string(),
            })),
            ResponsePolicy::Inline,
        );
        let state = orch.generate(DocumentForm::default()).await.unwrap();
        assert_eq!(state.error_message(), Some("boom"));
        assert!(!orch.is_in_flight());
    }

    #[tokio::test]
    async fn test_endpoint_follows_document_type() {
        let orch = orchestrator(
            FakeService::replying(Ok(artifact("t.docx", None))),
            ResponsePolicy::Inline,
        );
        let form = DocumentForm::default().select_type(DocumentType::Termination);
        orch.generate(form).await.unwrap();
        assert_eq!(
            *orch.service().endpoints.lock().unwrap(),
            vec!["/generate-termination-letter".to_string()]
        );
    }

    #[tokio::test]
    async fn test_second_call_while_in_flight_is_ignored() {
        let orch = Arc::new(orchestrator(
            FakeService::replying(Ok(artifact("a.docx", None)))
                .with_delay(Duration::from_millis(200)),
            ResponsePolicy::Inline,
        ));

        let first = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.generate(DocumentForm::default()).await })
        };
        while !orch.is_in_flight() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        assert_eq!(orch.generate(DocumentForm::default()).await, None);
        assert!(first.await.unwrap().is_some());
        assert_eq!(orch.service().submits.load(Ordering::SeqCst), 1);

        // Re-entrant once the first attempt has finished
        assert!(orch.generate(DocumentForm::default()).await.is_some());
        assert_eq!(orch.service().submits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_timeout_leaves_in_flight_state() {
        let orch = RequestOrchestrator::new(
            FakeService::replying(Ok(artifact("a.docx", None)))
                .with_delay(Duration::from_secs(10)),
            ResponsePolicy::Inline,
            Duration::from_millis(50),
            PathBuf::from("/tmp"),
        );
        let state = orch.generate(DocumentForm::default()).await.unwrap();
        assert!(matches!(
            state,
            GenerationState::Failed {
                kind: FailureKind::Transport,
                ..
            }
        ));
        assert!(!orch.is_in_flight());
    }

    #[tokio::test]
    async fn test_dropped_future_leaves_in_flight_state() {
        let orch = orchestrator(
            FakeService::replying(Ok(artifact("a.docx", None)))
                .with_delay(Duration::from_secs(10)),
            ResponsePolicy::Inline,
        );

        let cancelled =
            tokio::time::timeout(Duration::from_millis(50), orch.generate(DocumentForm::default()))
                .await;
        assert!(cancelled.is_err());

        assert!(!orch.is_in_flight());
        assert_eq!(orch.state().error_message(), Some(GENERIC_FAILURE));
    }

    #[tokio::test]
    async fn test_new_attempt_replaces_previous_result() {
        let orch = orchestrator(
            FakeService::replying(Err(GenerationError::Unreachable(
                "connection refused".to_string(),
            ))),
            ResponsePolicy::Inline,
        );
        orch.generate(DocumentForm::default()).await.unwrap();
        assert_eq!(orch.state().error_message(), Some("connection refused"));

        let again = orch
            .generate(DocumentForm::new(DocumentType::Experience))
            .await
            .unwrap();
        assert!(matches!(
            again,
            GenerationState::Failed {
                document_type: DocumentType::Experience,
                ..
            }
        ));
    }
}
