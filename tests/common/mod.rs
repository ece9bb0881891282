// Local stand-in for the chat and shipping backends. Every request is
// recorded and answered with the same canned status and JSON body.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use logistics_assistant::config::Config;
use reqwest::Url;
use serde_json::Value;
use tokio::sync::Mutex;

#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

struct MockState {
    status: StatusCode,
    body: Value,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockBackend {
    pub base_url: Url,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start(status: StatusCode, body: Value) -> Self {
        let state = Arc::new(MockState {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(record).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}")).unwrap(),
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        self.base_url.join(path).unwrap().to_string()
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().await.clone()
    }

    pub async fn hits(&self) -> usize {
        self.state.requests.lock().await.len()
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let recorded = RecordedRequest {
        method,
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().await.push(recorded);
    (state.status, Json(state.body.clone()))
}

/// Configuration built from explicit key/value pairs only.
pub fn config(pairs: &[(&str, String)]) -> Config {
    let pairs: Vec<(String, String)> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Config::from_lookup(move |key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .unwrap()
}
