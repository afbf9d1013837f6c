//! Renderer seam
//!
//! The physics core never owns renderables. A [`Matter`](crate::matter::Matter)
//! only holds a [`GraphicHandle`] naming one, and the
//! [`Universe`](crate::world::Universe) forwards each body's pose to a
//! [`RenderSink`] once per tick.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Opaque handle to a renderable owned by an external renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphicHandle(pub u64);

/// Receiver of per-tick pose updates
pub trait RenderSink {
    /// Called once per tick for every body that has a graphic attached
    fn update_pose(&mut self, graphic: GraphicHandle, position: Vec3);
}

/// Sink that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn update_pose(&mut self, _graphic: GraphicHandle, _position: Vec3) {}
}

/// Sink that records every update in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Updates received so far
    pub updates: Vec<(GraphicHandle, Vec3)>,
}

impl RecordingSink {
    /// Most recent position sent for `graphic`
    pub fn last_position(&self, graphic: GraphicHandle) -> Option<Vec3> {
        self.updates
            .iter()
            .rev()
            .find(|(handle, _)| *handle == graphic)
            .map(|(_, position)| *position)
    }

    /// Drop all recorded updates
    pub fn clear(&mut self) {
        self.updates.clear();
    }
}

impl RenderSink for RecordingSink {
    fn update_pose(&mut self, graphic: GraphicHandle, position: Vec3) {
        self.updates.push((graphic, position));
    }
}
