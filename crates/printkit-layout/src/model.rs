//! Scene element model

use image::RgbaImage;
use printkit_core::Rect;
use std::path::PathBuf;

/// A raster image placed on the page.
///
/// Position and size live in page-pixel space (794x1123 for A4 at the
/// 96 DPI baseline). The decoded bitmap is owned by the element; the
/// rect is clamped to the page after every mutation, so `width` and
/// `height` stay positive and the bounding box stays on the page.
#[derive(Debug, Clone)]
pub struct PlacedImage {
    /// Stable session-unique identifier.
    pub id: u64,
    /// Display name, usually the source file name.
    pub name: String,
    /// Path the bitmap was loaded from, when it came from a file.
    pub source: Option<PathBuf>,
    /// Owned decoded bitmap.
    pub buffer: RgbaImage,
    /// Placement on the page in page pixels.
    pub rect: Rect,
    /// Rotation about the rect center, degrees clockwise.
    pub rotation_degrees: f64,
    /// Whether this element is the current selection.
    pub selected: bool,
}

impl PlacedImage {
    pub fn new(id: u64, name: impl Into<String>, buffer: RgbaImage, rect: Rect) -> Self {
        Self {
            id,
            name: name.into(),
            source: None,
            buffer,
            rect,
            rotation_degrees: 0.0,
            selected: false,
        }
    }

    /// Source bitmap width in pixels.
    pub fn source_width(&self) -> u32 {
        self.buffer.width()
    }

    /// Source bitmap height in pixels.
    pub fn source_height(&self) -> u32 {
        self.buffer.height()
    }

    /// Whether a page point lies inside the placed bounding box.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        self.rect.contains(px, py)
    }
}
