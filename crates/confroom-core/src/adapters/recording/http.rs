//! reqwest-based [`RecordingApi`] adapter.
//!
//! `GET {base}/api/startRecording?roomId=…` and
//! `GET {base}/api/stopRecording?roomId=…`, each answering with a JSON body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::application::ports::{RecordingApi, RecordingResponse};
use crate::config::RecordingConfig;
use crate::domain::identity::RoomId;
use crate::error::RecordingError;

const START_PATH: &str = "/api/startRecording";
const STOP_PATH: &str = "/api/stopRecording";

/// Talks to the recording endpoints over HTTP.
pub struct HttpRecordingClient {
    client: Client,
    base_url: String,
}

impl HttpRecordingClient {
    pub fn new(config: &RecordingConfig) -> Result<Self, RecordingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| RecordingError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn call(&self, path: &str, room_id: &RoomId) -> Result<RecordingResponse, RecordingError> {
        let url = self.url(path);
        debug!(%url, %room_id, "Calling recording endpoint");

        let response = self
            .client
            .get(&url)
            .query(&[("roomId", room_id.as_str())])
            .send()
            .await
            .map_err(|e| RecordingError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RecordingError::Body {
                status,
                message: e.to_string(),
            })?;

        Ok(RecordingResponse { status, body })
    }
}

#[async_trait]
impl RecordingApi for HttpRecordingClient {
    async fn start_recording(&self, room_id: &RoomId) -> Result<RecordingResponse, RecordingError> {
        self.call(START_PATH, room_id).await
    }

    async fn stop_recording(&self, room_id: &RoomId) -> Result<RecordingResponse, RecordingError> {
        self.call(STOP_PATH, room_id).await
    }
}
