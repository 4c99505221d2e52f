//! StreamBinding — keeps one rendering surface in sync with one stream handle.
//!
//! Both inputs are observed: whenever the handle or the surface changes and
//! both are present, the handle is (re)assigned as the surface's source.
//! View construction never touches surfaces; only this step does.

use std::sync::Arc;

use tracing::debug;

use crate::domain::media::{StreamHandle, SurfaceSlot};

use super::ports::MediaSurface;

pub struct StreamBinding {
    slot: SurfaceSlot,
    surface: Option<Arc<dyn MediaSurface>>,
    handle: Option<StreamHandle>,
    /// Handle last assigned to the current surface.
    bound: Option<StreamHandle>,
}

impl StreamBinding {
    pub fn new(slot: SurfaceSlot) -> Self {
        Self {
            slot,
            surface: None,
            handle: None,
            bound: None,
        }
    }

    /// A surface was mounted (or unmounted with `None`). Returns true if the
    /// current handle was attached to it.
    pub fn set_surface(&mut self, surface: Option<Arc<dyn MediaSurface>>) -> bool {
        self.surface = surface;
        self.bound = None;
        self.sync()
    }

    /// The SDK reported a new handle for this slot. Returns true if it was
    /// attached.
    pub fn set_handle(&mut self, handle: Option<StreamHandle>) -> bool {
        if self.handle == handle {
            return false;
        }
        self.handle = handle;
        if self.handle.is_none() {
            self.bound = None;
        }
        self.sync()
    }

    fn sync(&mut self) -> bool {
        let (Some(surface), Some(handle)) = (&self.surface, &self.handle) else {
            return false;
        };
        if self.bound.as_ref() == Some(handle) {
            return false;
        }
        surface.set_source(handle);
        debug!(slot = ?self.slot, stream_id = handle.id, "Attached stream to surface");
        self.bound = Some(handle.clone());
        true
    }
}
