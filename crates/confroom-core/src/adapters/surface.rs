//! In-memory [`MediaSurface`] adapter.

use std::sync::Mutex;

use crate::application::ports::MediaSurface;
use crate::domain::media::StreamHandle;

/// A playback surface that remembers what it is showing.
///
/// Stands in for a `<video>` element: hosts without a real renderer (and the
/// tests) use it to observe attachment.
#[derive(Default)]
pub struct VideoSurface {
    source: Mutex<Option<StreamHandle>>,
    binds: Mutex<usize>,
}

impl VideoSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stream currently set as playback source.
    pub fn source(&self) -> Option<StreamHandle> {
        self.source.lock().unwrap().clone()
    }

    /// How many times a source has been assigned.
    pub fn bind_count(&self) -> usize {
        *self.binds.lock().unwrap()
    }
}

impl MediaSurface for VideoSurface {
    fn set_source(&self, handle: &StreamHandle) {
        *self.source.lock().unwrap() = Some(handle.clone());
        *self.binds.lock().unwrap() += 1;
    }
}
