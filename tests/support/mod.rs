//! Purpose: Loopback HTTP mock shared by the client and CLI integration tests.
//! Exports: `MockServer`, `Recorded`, `TestResult`.
//! Invariants: Routes are fixed at start; unknown routes answer 404 with a JSON body.
#![allow(dead_code)]

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::oneshot;
use wavekit::api::Client;

pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct Shared {
    routes: HashMap<(String, String), (u16, String)>,
    seen: Mutex<Vec<Recorded>>,
}

pub struct MockServer {
    pub base_url: String,
    shared: Arc<Shared>,
    shutdown: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl MockServer {
    /// Each route answers `(method, path)` with a fixed status and body; anything else is 404.
    pub fn start(routes: &[(&str, &str, u16, Value)]) -> TestResult<Self> {
        let shared = Arc::new(Shared {
            routes: routes
                .iter()
                .map(|(method, path, status, body)| {
                    let body = if body.is_null() {
                        String::new()
                    } else {
                        body.to_string()
                    };
                    ((method.to_string(), path.to_string()), (*status, body))
                })
                .collect(),
            seen: Mutex::new(Vec::new()),
        });

        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let app = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&shared));
        let (tx, rx) = oneshot::channel::<()>();
        let thread = std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                let _ = axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = rx.await;
                    })
                    .await;
            });
        });

        Ok(Self {
            base_url: format!("http://{addr}/api/v1"),
            shared,
            shutdown: Some(tx),
            thread: Some(thread),
        })
    }

    pub fn client(&self) -> TestResult<Client> {
        Ok(Client::new(&self.base_url)?.with_timeout(Duration::from_secs(5)))
    }

    pub fn seen(&self) -> Vec<Recorded> {
        self.shared
            .seen
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clone()
    }

    pub fn last(&self) -> Recorded {
        self.seen().pop().expect("no request recorded")
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

async fn respond(
    State(shared): State<Arc<Shared>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let path = uri.path().to_string();
    let query = uri
        .query()
        .map(|raw| url::form_urlencoded::parse(raw.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    let header_text = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    shared
        .seen
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
        .push(Recorded {
            method: method.to_string(),
            path: path.clone(),
            query,
            authorization: header_text(header::AUTHORIZATION),
            content_type: header_text(header::CONTENT_TYPE),
            body,
        });

    let content_type = [(header::CONTENT_TYPE, "application/json")];
    match shared.routes.get(&(method.to_string(), path)) {
        Some((status, body)) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            content_type,
            body.clone(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            content_type,
            json!({"msg": "no route"}).to_string(),
        ),
    }
}
