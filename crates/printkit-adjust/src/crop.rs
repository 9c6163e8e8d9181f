//! Crop selection and the bake step that commits it.

use image::imageops;
use tracing::debug;

use printkit_core::Rect;

use crate::document::AdjustmentDocument;
use crate::render::render;

/// Fraction of each canvas dimension covered by the initial crop selection.
pub const DEFAULT_CROP_FRACTION: f64 = 0.8;

/// The initial crop selection: 80% of the canvas, centered.
pub fn default_crop_rect(canvas_width: u32, canvas_height: u32) -> Rect {
    let width = canvas_width as f64 * DEFAULT_CROP_FRACTION;
    let height = canvas_height as f64 * DEFAULT_CROP_FRACTION;
    Rect {
        x: (canvas_width as f64 - width) / 2.0,
        y: (canvas_height as f64 - height) / 2.0,
        width,
        height,
    }
}

impl AdjustmentDocument {
    /// Commits the crop selection.
    ///
    /// The document is rendered in full, the crop rectangle is cut out of
    /// that render, and the cut becomes the new working buffer and canvas.
    /// Rotation, flips and sliders return to neutral afterwards so the next
    /// render reproduces the baked pixels exactly; the color mode stays,
    /// which is safe because both remaps are idempotent. The original
    /// buffer is not touched, so [`reset`](Self::reset) still recovers the
    /// image as first loaded.
    pub fn apply_crop(&mut self) {
        let rendered = render(self);
        let (canvas_width, canvas_height) = self.canvas_size();
        let rect = clamp_crop(self.crop_rect(), canvas_width, canvas_height);

        let cropped = imageops::crop_imm(
            &rendered,
            rect.x as u32,
            rect.y as u32,
            rect.width as u32,
            rect.height as u32,
        )
        .to_image();

        debug!(
            width = cropped.width(),
            height = cropped.height(),
            "Applied crop"
        );

        self.replace_working(cropped);
        self.neutralize_baked_state();
    }
}

/// Clamps a crop selection into the canvas and rounds it to whole pixels.
/// Degenerate selections collapse to a 1x1 pixel rather than failing.
fn clamp_crop(rect: Rect, canvas_width: u32, canvas_height: u32) -> Rect {
    let max_x = (canvas_width.saturating_sub(1)) as f64;
    let max_y = (canvas_height.saturating_sub(1)) as f64;
    let x = rect.x.round().clamp(0.0, max_x);
    let y = rect.y.round().clamp(0.0, max_y);
    let width = rect.width.round().clamp(1.0, canvas_width as f64 - x);
    let height = rect.height.round().clamp(1.0, canvas_height as f64 - y);
    Rect {
        x,
        y,
        width,
        height,
    }
}
