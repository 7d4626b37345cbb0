//! Local mock of the document service, served by `tiny_http` on a random port.
#![allow(dead_code)]

use std::io::Read;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hrdocs_tauri::{AppConfig, AppState, Credentials, HttpGenerationService, SessionStore};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "admin123";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body should be JSON")
    }
}

pub struct Reply {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Reply {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn file(bytes: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            body: bytes.to_vec(),
        }
    }
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    release: Option<mpsc::Sender<()>>,
}

impl MockBackend {
    /// Answer every request immediately with `handler`.
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Reply + Send + 'static,
    {
        Self::spawn(handler, None)
    }

    /// Record each request, then hold its response until [`MockBackend::release`].
    pub fn start_gated<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Reply + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let mut backend = Self::spawn(handler, Some(rx));
        backend.release = Some(tx);
        backend
    }

    fn spawn<F>(handler: F, gate: Option<mpsc::Receiver<()>>) -> Self
    where
        F: Fn(&RecordedRequest) -> Reply + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("failed to bind mock server");
        let port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .expect("mock server has no IP address");

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded_requests = requests.clone();

        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let recorded = RecordedRequest {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    content_type: request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Content-Type"))
                        .map(|h| h.value.as_str().to_string()),
                    body,
                };
                recorded_requests.lock().unwrap().push(recorded.clone());

                if let Some(rx) = &gate {
                    let _ = rx.recv_timeout(Duration::from_secs(10));
                }

                let reply = handler(&recorded);
                let header =
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes())
                        .expect("valid header");
                let response = tiny_http::Response::from_data(reply.body)
                    .with_status_code(reply.status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
            release: None,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Let one held response through.
    pub fn release(&self) {
        if let Some(tx) = &self.release {
            let _ = tx.send(());
        }
    }

    pub fn config(&self, download_dir: &Path) -> AppConfig {
        test_config(&self.base_url, download_dir)
    }
}

pub fn test_config(base_url: &str, download_dir: &Path) -> AppConfig {
    let mut config = AppConfig::defaults();
    config.service.base_url = base_url.to_string();
    config.service.use_system_proxy = false;
    config.service.timeout_secs = 15;
    config.credentials = Some(Credentials {
        username: USERNAME.to_string(),
        password: PASSWORD.to_string(),
    });
    config.downloads.dir = Some(download_dir.to_path_buf());
    config
}

/// App state wired to `config` with an in-memory session.
pub fn app_state(config: AppConfig) -> AppState {
    let service = HttpGenerationService::new(&config).expect("client should build");
    AppState::new(config, SessionStore::in_memory(), service)
}

/// App state that is already past the login screen.
pub fn logged_in_state(config: AppConfig) -> AppState {
    let state = app_state(config);
    assert!(state.login(USERNAME, PASSWORD));
    state
}
