//! In-process test fixture: the gateway router wired to fake processing
//! backend and oEmbed servers listening on ephemeral ports.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{Method, Request, StatusCode, Uri};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use video_summary_gateway::api::routes::create_router;
use video_summary_gateway::config::Config;
use video_summary_gateway::AppState;

/// A request captured by a fake service.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("recorded body is not JSON")
    }
}

struct FakeState {
    status: StatusCode,
    body: String,
    requests: Vec<RecordedRequest>,
}

/// Fake HTTP collaborator that answers every request with a canned response
/// and records what it received.
#[derive(Clone)]
pub struct FakeService {
    state: Arc<Mutex<FakeState>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                status: StatusCode::OK,
                body: "{}".to_string(),
                requests: Vec::new(),
            })),
        }
    }

    pub fn respond_json(&self, status: u16, body: Value) {
        self.respond_raw(status, &body.to_string());
    }

    pub fn respond_raw(&self, status: u16, body: &str) {
        let mut state = self.state.lock().unwrap();
        state.status = StatusCode::from_u16(status).unwrap();
        state.body = body.to_string();
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn hits(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    async fn spawn(&self) -> SocketAddr {
        let router = Router::new().fallback(record).with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }
}

async fn record(
    State(service): State<FakeService>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, String) {
    let mut state = service.state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        body,
    });
    (state.status, state.body.clone())
}

/// Address nothing listens on.
pub fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct TestFixture {
    pub router: Router,
    pub backend: FakeService,
    pub oembed: FakeService,
}

impl TestFixture {
    /// Gateway with both collaborators up and answering `200 {}`.
    pub async fn new() -> Self {
        let backend = FakeService::new();
        let oembed = FakeService::new();
        let backend_addr = backend.spawn().await;
        let oembed_addr = oembed.spawn().await;

        Self::build(
            format!("http://{}", backend_addr),
            format!("http://{}/oembed", oembed_addr),
            backend,
            oembed,
        )
    }

    /// Gateway whose oEmbed endpoint refuses connections.
    pub async fn with_unreachable_oembed() -> Self {
        let backend = FakeService::new();
        let backend_addr = backend.spawn().await;

        Self::build(
            format!("http://{}", backend_addr),
            format!("http://{}/oembed", unreachable_addr()),
            backend,
            FakeService::new(),
        )
    }

    /// Gateway built with an explicit backend base URL.
    pub async fn with_backend_url(backend_url: &str) -> Self {
        let oembed = FakeService::new();
        let oembed_addr = oembed.spawn().await;

        Self::build(
            backend_url.to_string(),
            format!("http://{}/oembed", oembed_addr),
            FakeService::new(),
            oembed,
        )
    }

    fn build(backend_url: String, oembed_endpoint: String, backend: FakeService, oembed: FakeService) -> Self {
        let config = Config::new("127.0.0.1:0".parse().unwrap(), backend_url, oembed_endpoint);
        let state = AppState::new(&config).unwrap();

        Self {
            router: create_router(state),
            backend,
            oembed,
        }
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.post_raw(path, body.to_string()).await
    }

    pub async fn post_raw(&self, path: &str, body: impl Into<String>) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
