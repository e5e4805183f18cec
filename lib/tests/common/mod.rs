// lib/tests/common/mod.rs

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

/// One request the recording server received.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub body: Value,
}

#[derive(Clone)]
struct Recorder {
    calls: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
    reply: Value,
}

/// An HTTP double that answers every request with the same status and body
/// and remembers what it was sent.
pub struct RecordingServer {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingServer {
    pub async fn start(status: StatusCode, reply: Value) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder { calls: calls.clone(), status, reply };
        let app = Router::new().fallback(record).with_state(recorder);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        RecordingServer { addr, calls }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().unwrap().clone()
    }
}

async fn record(State(recorder): State<Recorder>, uri: Uri, body: Bytes) -> (StatusCode, Json<Value>) {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    recorder.calls.lock().unwrap().push(Recorded { path: uri.path().to_string(), body });
    (recorder.status, Json(recorder.reply.clone()))
}

/// A base URL nothing listens on.
pub fn unreachable_base_url() -> String {
    "http://127.0.0.1:9/api".to_string()
}
