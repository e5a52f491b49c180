// SPDX-License-Identifier: MPL-2.0
//! Revocable preview handles.
//!
//! Every renderable preview is registered when created and must be released
//! explicitly once superseded. The registry only counts live handles; the
//! decoded texture itself is freed by Iced when the last clone of the
//! [`Handle`] is dropped.

use iced::widget::image::Handle;
use std::collections::HashSet;
use std::io::Cursor;

/// Identifier of a registered preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewId(u64);

/// A renderable preview of encoded image bytes.
#[derive(Debug, Clone)]
pub struct PreviewHandle {
    id: PreviewId,
    handle: Handle,
    dimensions: Option<(u32, u32)>,
}

impl PreviewHandle {
    pub fn id(&self) -> PreviewId {
        self.id
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Pixel size read from the image header, if recognizable.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// Whether both values refer to the same registered preview.
    pub fn same_preview(&self, other: &PreviewHandle) -> bool {
        self.id == other.id
    }
}

fn header_dimensions(encoded: &[u8]) -> Option<(u32, u32)> {
    image_rs::ImageReader::new(Cursor::new(encoded))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Tracks which previews are still alive.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    next_id: u64,
    live: HashSet<PreviewId>,
}

impl PreviewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new preview for the given encoded bytes.
    pub fn create(&mut self, encoded: &[u8]) -> PreviewHandle {
        let id = PreviewId(self.next_id);
        self.next_id += 1;
        self.live.insert(id);
        PreviewHandle {
            id,
            handle: Handle::from_bytes(encoded.to_vec()),
            dimensions: header_dimensions(encoded),
        }
    }

    /// Releases a preview. Returns `false` if it was already released.
    pub fn release(&mut self, preview: &PreviewHandle) -> bool {
        let released = self.live.remove(&preview.id);
        if !released {
            tracing::debug!(id = preview.id.0, "preview already released");
        }
        released
    }

    pub fn is_live(&self, preview: &PreviewHandle) -> bool {
        self.live.contains(&preview.id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
