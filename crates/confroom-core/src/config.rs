//! Client-side configuration, built once at startup and handed to the
//! application context.

use serde::{Deserialize, Serialize};

/// Default number of active speakers the SDK tracks.
pub const DEFAULT_ACTIVE_SPEAKERS: usize = 8;

/// Room SDK client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    pub project_id: String,
    #[serde(default = "default_active_speakers")]
    pub active_speakers_size: usize,
}

fn default_active_speakers() -> usize {
    DEFAULT_ACTIVE_SPEAKERS
}

impl ClientConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            active_speakers_size: DEFAULT_ACTIVE_SPEAKERS,
        }
    }
}

/// When the local recording flag is flipped after a start/stop call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordingFlipPolicy {
    /// Flip after any HTTP response that carried a JSON body, whatever its status.
    #[default]
    Unconditional,
    /// Flip only when the endpoint answered with a 2xx status.
    ConfirmedOnly,
}

/// Where the recording endpoints live and how their answers are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingConfig {
    /// Origin the `/api/startRecording` and `/api/stopRecording` paths hang off.
    pub base_url: String,
    #[serde(default)]
    pub flip_policy: RecordingFlipPolicy,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    10
}

impl RecordingConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            flip_policy: RecordingFlipPolicy::default(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    pub fn with_flip_policy(mut self, policy: RecordingFlipPolicy) -> Self {
        self.flip_policy = policy;
        self
    }
}
