//! Common test utilities and helpers
//!
//! Provides an in-memory transport that records every request it is handed,
//! so tests can assert on the exact wire shape without a server.

#![allow(dead_code)]

use async_trait::async_trait;
use ntfy_publish::{AppResult, ClientArgs, NtfyClient, PublishRequest, Transport};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<PublishRequest>>,
}

impl RecordingTransport {
    pub fn requests(&self) -> Vec<PublishRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> PublishRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was recorded")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: PublishRequest) -> AppResult<Value> {
        let topic = request.url.path().trim_start_matches('/').to_string();
        self.requests.lock().unwrap().push(request);
        Ok(json!({ "id": "recorded", "event": "message", "topic": topic }))
    }
}

/// Build a client over a fresh recording transport
pub fn recording_client(args: impl Into<ClientArgs>) -> (NtfyClient, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let client =
        NtfyClient::with_transport(args, transport.clone()).expect("Failed to create client");
    (client, transport)
}

/// Header names of a request, in order
pub fn header_names(request: &PublishRequest) -> Vec<&str> {
    request.headers.iter().map(|(name, _)| name.as_str()).collect()
}
