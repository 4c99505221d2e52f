//! ToggleMedia use case — camera, microphone and screen share.
//!
//! Each toggle reads the SDK-owned flag at call time and issues exactly one of
//! the two opposite calls. Nothing is flipped locally: the returned value is
//! re-read from the SDK after the call resolves.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::SessionError;

use super::ports::RoomSdk;

pub struct ToggleMediaUseCase {
    sdk: Arc<dyn RoomSdk>,
}

impl ToggleMediaUseCase {
    pub fn new(sdk: Arc<dyn RoomSdk>) -> Self {
        Self { sdk }
    }

    /// Turn the camera off if on, else on. Returns the SDK's flag afterwards.
    pub async fn toggle_video(&self) -> Result<bool, SessionError> {
        self.ensure_connected()?;
        let result = if self.sdk.is_video_on() {
            self.sdk.disable_video().await
        } else {
            self.sdk.enable_video().await
        };
        self.settle("video", result, self.sdk.is_video_on())
    }

    /// Mute if unmuted, else unmute. Returns the SDK's flag afterwards.
    pub async fn toggle_audio(&self) -> Result<bool, SessionError> {
        self.ensure_connected()?;
        let result = if self.sdk.is_audio_on() {
            self.sdk.disable_audio().await
        } else {
            self.sdk.enable_audio().await
        };
        self.settle("audio", result, self.sdk.is_audio_on())
    }

    /// Stop sharing if a share stream exists, else start. Returns whether a
    /// share stream exists afterwards.
    pub async fn toggle_screen_share(&self) -> Result<bool, SessionError> {
        self.ensure_connected()?;
        let result = if self.sdk.share_stream().is_some() {
            self.sdk.stop_screen_share().await
        } else {
            self.sdk.start_screen_share().await
        };
        self.settle("screen", result, self.sdk.share_stream().is_some())
    }

    fn ensure_connected(&self) -> Result<(), SessionError> {
        let state = self.sdk.state();
        if state.is_connected() {
            Ok(())
        } else {
            Err(SessionError::NotConnected(state))
        }
    }

    fn settle(&self, what: &str, result: anyhow::Result<()>, now_on: bool) -> Result<bool, SessionError> {
        match result {
            Ok(()) => {
                info!(media = what, on = now_on, "Media toggled");
                Ok(now_on)
            }
            Err(e) => {
                warn!(media = what, "Media toggle failed: {e:#}");
                Err(SessionError::Sdk(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sdk::loopback::{LoopbackRoomSdk, SdkCall};
    use crate::domain::identity::RoomId;
    use crate::domain::session::ConnectionState;

    async fn connected() -> (Arc<LoopbackRoomSdk>, ToggleMediaUseCase) {
        let sdk = Arc::new(LoopbackRoomSdk::new());
        sdk.join_room(&RoomId::new("r"), "tok").await.unwrap();
        let uc = ToggleMediaUseCase::new(sdk.clone());
        (sdk, uc)
    }

    fn media_calls(sdk: &LoopbackRoomSdk) -> Vec<SdkCall> {
        sdk.calls()
            .into_iter()
            .filter(|c| !matches!(c, SdkCall::Join(_)))
            .collect()
    }

    #[tokio::test]
    async fn video_toggle_alternates_enable_and_disable() {
        let (sdk, uc) = connected().await;

        assert!(uc.toggle_video().await.unwrap());
        assert!(!uc.toggle_video().await.unwrap());
        assert_eq!(media_calls(&sdk), vec![SdkCall::EnableVideo, SdkCall::DisableVideo]);
    }

    #[tokio::test]
    async fn audio_toggle_issues_one_call_per_invocation() {
        let (sdk, uc) = connected().await;

        assert!(uc.toggle_audio().await.unwrap());
        assert_eq!(media_calls(&sdk), vec![SdkCall::EnableAudio]);
        assert!(!uc.toggle_audio().await.unwrap());
        assert_eq!(media_calls(&sdk), vec![SdkCall::EnableAudio, SdkCall::DisableAudio]);
    }

    #[tokio::test]
    async fn screen_share_follows_stream_presence() {
        let (sdk, uc) = connected().await;

        assert!(uc.toggle_screen_share().await.unwrap());
        assert!(sdk.share_stream().is_some());
        assert!(!uc.toggle_screen_share().await.unwrap());
        assert_eq!(
            media_calls(&sdk),
            vec![SdkCall::StartScreenShare, SdkCall::StopScreenShare]
        );
    }

    #[tokio::test]
    async fn failed_call_leaves_flag_as_sdk_reports() {
        let (sdk, uc) = connected().await;
        sdk.set_media_failure(true);

        assert!(matches!(uc.toggle_video().await, Err(SessionError::Sdk(_))));
        assert!(!sdk.is_video_on());
        assert_eq!(media_calls(&sdk), vec![SdkCall::EnableVideo]);
    }

    #[tokio::test]
    async fn toggles_require_connection() {
        let sdk = Arc::new(LoopbackRoomSdk::new());
        let uc = ToggleMediaUseCase::new(sdk.clone());

        let err = uc.toggle_audio().await.unwrap_err();
        assert!(matches!(err, SessionError::NotConnected(ConnectionState::Idle)));
        assert!(sdk.calls().is_empty());
    }
}
