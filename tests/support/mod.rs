//! In-process mock of the care backend: the REST endpoints plus a scripted
//! telemetry websocket. Every request is recorded for assertions.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use care_companion::config::EndpointConfig;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const WAIT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    HealthConnect(Value),
    Clinical(Value),
    ListJournal,
    CreateJournal(Value),
    Symptom {
        description: Option<String>,
        photo: Option<(String, usize)>,
    },
}

/// How the mock behaves.
#[derive(Debug, Clone, Default)]
pub struct MockScript {
    /// Text frames pushed to each websocket client, in order
    pub frames: Vec<String>,
    /// Keep the socket open after the frames until the client closes it
    pub hold_open: bool,
    /// Answer every REST call with this status instead
    pub fail_with: Option<StatusCode>,
    /// Journal entries returned by the list endpoint, newest first
    pub journal: Vec<Value>,
}

struct MockState {
    script: MockScript,
    requests: Mutex<Vec<Recorded>>,
    journal: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    client_closed: AtomicBool,
}

impl MockState {
    fn record(&self, request: Recorded) -> Result<(), StatusCode> {
        self.requests.lock().unwrap().push(request);
        match self.script.fail_with {
            Some(status) => Err(status),
            None => Ok(()),
        }
    }
}

pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Bind on an ephemeral localhost port and serve on the current runtime.
    pub async fn start(script: MockScript) -> Self {
        let next_id = script
            .journal
            .iter()
            .filter_map(|entry| entry["id"].as_i64())
            .max()
            .unwrap_or(0)
            + 1;
        let state = Arc::new(MockState {
            journal: Mutex::new(script.journal.clone()),
            script,
            requests: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(next_id),
            client_closed: AtomicBool::new(false),
        });

        let app = Router::new()
            .route("/api/health-connect-data", post(health_connect))
            .route("/api/clinical-data", post(clinical))
            .route("/api/journal", get(list_journal).post(create_journal))
            .route("/api/symptom-analysis", post(symptom_analysis))
            .route("/api/ws/health-data", get(health_stream))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock");
        let addr = listener.local_addr().expect("mock addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self { addr, state }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn api_base(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_base(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub fn endpoints(&self) -> EndpointConfig {
        EndpointConfig {
            api_base_url: self.api_base(),
            ws_base_url: self.ws_base(),
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    /// Whether a websocket client sent a close frame.
    pub fn client_closed(&self) -> bool {
        self.state.client_closed.load(Ordering::SeqCst)
    }

    /// Poll until the client has closed its websocket or `WAIT` elapses.
    pub async fn wait_for_client_close(&self) -> bool {
        let deadline = tokio::time::Instant::now() + WAIT;
        while tokio::time::Instant::now() < deadline {
            if self.client_closed() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }
}

fn ok() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn health_connect(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record(Recorded::HealthConnect(body))?;
    Ok(ok())
}

async fn clinical(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record(Recorded::Clinical(body))?;
    Ok(ok())
}

async fn list_journal(State(state): State<Arc<MockState>>) -> Result<Json<Value>, StatusCode> {
    state.record(Recorded::ListJournal)?;
    let entries = state.journal.lock().unwrap().clone();
    Ok(Json(Value::Array(entries)))
}

async fn create_journal(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    state.record(Recorded::CreateJournal(body.clone()))?;
    let entry = json!({
        "id": state.next_id.fetch_add(1, Ordering::SeqCst),
        "content": body["content"],
        "timestamp": "2024-05-02T09:15:00",
        "ai_encouragement": "Thank you for sharing.",
        "ai_analysis": null,
    });
    state.journal.lock().unwrap().insert(0, entry.clone());
    Ok(Json(entry))
}

async fn symptom_analysis(
    State(state): State<Arc<MockState>>,
    mut multipart: Multipart,
) -> Result<Json<Value>, StatusCode> {
    let mut description = None;
    let mut photo = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?
    {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
        match name.as_deref() {
            Some("description") => description = Some(String::from_utf8_lossy(&data).into_owned()),
            Some("photo") => photo = Some((file_name.unwrap_or_default(), data.len())),
            _ => {}
        }
    }

    state.record(Recorded::Symptom { description, photo })?;
    Ok(Json(json!({
        "severity": "Moderate",
        "advice": "Keep the area clean and book a routine appointment.",
    })))
}

async fn health_stream(ws: WebSocketUpgrade, State(state): State<Arc<MockState>>) -> Response {
    ws.on_upgrade(move |socket| push_frames(socket, state))
        .into_response()
}

async fn push_frames(mut socket: WebSocket, state: Arc<MockState>) {
    for frame in &state.script.frames {
        if socket.send(Message::Text(frame.clone())).await.is_err() {
            return;
        }
    }

    if !state.script.hold_open {
        let _ = socket.send(Message::Close(None)).await;
        return;
    }

    while let Some(message) = socket.recv().await {
        match message {
            Ok(Message::Close(_)) => {
                state.client_closed.store(true, Ordering::SeqCst);
                return;
            }
            Ok(_) => continue,
            Err(_) => return,
        }
    }
}
