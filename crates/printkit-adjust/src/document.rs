//! The adjustment document: the full editing state for one image.
//!
//! The document keeps two pixel buffers. `original` is the image as it was
//! first loaded and is never written to after that, so a reset is always
//! possible. `working` is the buffer the geometry pass draws; cropping
//! replaces it with baked pixels. Everything else is parameter state that
//! the renderer interprets on demand.

use image::RgbaImage;
use tracing::debug;

use printkit_core::{ImageError, LoadedImage, Rect, Result};

use crate::color::{ColorAdjustments, ColorMode};
use crate::crop::default_crop_rect;

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;
/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplicative step for a single zoom-in.
pub const ZOOM_IN_STEP: f64 = 1.2;
/// Multiplicative step for a single zoom-out.
pub const ZOOM_OUT_STEP: f64 = 0.8;

/// Editing state for a single image.
#[derive(Debug, Clone)]
pub struct AdjustmentDocument {
    name: String,
    source_byte_size: Option<u64>,
    original: RgbaImage,
    working: RgbaImage,
    canvas_width: u32,
    canvas_height: u32,
    rotation_degrees: f64,
    flip_horizontal: f64,
    flip_vertical: f64,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    adjustments: ColorAdjustments,
    color_mode: ColorMode,
    crop_rect: Rect,
}

impl AdjustmentDocument {
    /// Creates a document around a decoded buffer. The canvas starts at the
    /// buffer's own dimensions and the crop rectangle at its default 80%
    /// centered position.
    pub fn new(name: impl Into<String>, buffer: RgbaImage) -> Result<Self> {
        let name = name.into();
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(ImageError::EmptyImage { name }.into());
        }
        let width = buffer.width();
        let height = buffer.height();
        Ok(AdjustmentDocument {
            name,
            source_byte_size: None,
            original: buffer.clone(),
            working: buffer,
            canvas_width: width,
            canvas_height: height,
            rotation_degrees: 0.0,
            flip_horizontal: 1.0,
            flip_vertical: 1.0,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            adjustments: ColorAdjustments::default(),
            color_mode: ColorMode::default(),
            crop_rect: default_crop_rect(width, height),
        })
    }

    /// Creates a document from a loaded image, keeping its name and on-disk
    /// size for reporting.
    pub fn from_loaded(loaded: LoadedImage) -> Result<Self> {
        let mut doc = AdjustmentDocument::new(loaded.name, loaded.buffer)?;
        doc.source_byte_size = loaded.byte_size;
        Ok(doc)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The buffer the geometry pass draws from.
    pub fn working(&self) -> &RgbaImage {
        &self.working
    }

    /// The untouched first-loaded buffer.
    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    /// Output surface dimensions in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    /// Current rotation, always normalized to `[0, 360)`.
    pub fn rotation_degrees(&self) -> f64 {
        self.rotation_degrees
    }

    /// Horizontal mirror factor, `1.0` or `-1.0`.
    pub fn flip_horizontal(&self) -> f64 {
        self.flip_horizontal
    }

    /// Vertical mirror factor, `1.0` or `-1.0`.
    pub fn flip_vertical(&self) -> f64 {
        self.flip_vertical
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    pub fn adjustments(&self) -> &ColorAdjustments {
        &self.adjustments
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn crop_rect(&self) -> Rect {
        self.crop_rect
    }

    /// Adds `delta` degrees to the rotation. The stored value wraps into
    /// `[0, 360)`, so `rotate_by(-90.0)` on a fresh document yields 270.
    pub fn rotate_by(&mut self, delta: f64) {
        self.rotation_degrees = (self.rotation_degrees + delta).rem_euclid(360.0);
        debug!(rotation = self.rotation_degrees, "Rotated image");
    }

    /// Mirrors the image across the vertical axis. Calling twice restores
    /// the previous state.
    pub fn flip_horizontally(&mut self) {
        self.flip_horizontal *= -1.0;
    }

    /// Mirrors the image across the horizontal axis.
    pub fn flip_vertically(&mut self) {
        self.flip_vertical *= -1.0;
    }

    /// Multiplies the zoom by one zoom-in step, clamped to the zoom range.
    pub fn zoom_in(&mut self) {
        self.zoom_by(ZOOM_IN_STEP);
    }

    /// Multiplies the zoom by one zoom-out step, clamped to the zoom range.
    pub fn zoom_out(&mut self) {
        self.zoom_by(ZOOM_OUT_STEP);
    }

    /// Multiplies the zoom by `factor`, clamping into `[MIN_ZOOM, MAX_ZOOM]`.
    /// Zoom is view state only and never changes rendered pixels.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Offsets the view pan. Like zoom, pan never changes rendered pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Resets the view to zoom 1 with no pan.
    pub fn fit_to_screen(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }

    /// Resets the view to the image's natural size. Same effect as
    /// [`fit_to_screen`](Self::fit_to_screen).
    pub fn actual_size(&mut self) {
        self.fit_to_screen();
    }

    pub fn set_brightness(&mut self, value: i32) {
        self.adjustments.brightness = value;
    }

    pub fn set_contrast(&mut self, value: i32) {
        self.adjustments.contrast = value;
    }

    pub fn set_saturation(&mut self, value: i32) {
        self.adjustments.saturation = value;
    }

    pub fn set_hue(&mut self, value: i32) {
        self.adjustments.hue = value;
    }

    pub fn set_sharpness(&mut self, value: i32) {
        self.adjustments.sharpness = value;
    }

    pub fn set_adjustments(&mut self, adjustments: ColorAdjustments) {
        self.adjustments = adjustments;
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    /// Applies the fixed one-click enhancement preset.
    pub fn auto_enhance(&mut self) {
        self.adjustments = ColorAdjustments::auto_enhance();
        debug!("Applied auto enhance preset");
    }

    /// Returns every slider to neutral. The color mode is left alone.
    pub fn reset_adjustments(&mut self) {
        self.adjustments = ColorAdjustments::default();
    }

    /// Stores a new crop rectangle in canvas pixel space. The rectangle is
    /// clamped against the canvas when the crop is applied.
    pub fn set_crop_rect(&mut self, rect: Rect) {
        self.crop_rect = rect;
    }

    /// Restores the document to its first-loaded state: the working buffer
    /// and canvas return to the original image, geometry and view state
    /// return to neutral, and the sliders are zeroed. The color mode is the
    /// one piece of state that survives.
    pub fn reset(&mut self) {
        self.working = self.original.clone();
        self.canvas_width = self.original.width();
        self.canvas_height = self.original.height();
        self.rotation_degrees = 0.0;
        self.flip_horizontal = 1.0;
        self.flip_vertical = 1.0;
        self.fit_to_screen();
        self.reset_adjustments();
        self.crop_rect = default_crop_rect(self.canvas_width, self.canvas_height);
        debug!(name = %self.name, "Reset document to original image");
    }

    /// Reporting snapshot of the document.
    pub fn info(&self) -> DocumentInfo {
        DocumentInfo {
            name: self.name.clone(),
            width: self.canvas_width,
            height: self.canvas_height,
            byte_size: self.source_byte_size,
        }
    }

    pub(crate) fn replace_working(&mut self, buffer: RgbaImage) {
        self.canvas_width = buffer.width();
        self.canvas_height = buffer.height();
        self.working = buffer;
    }

    /// Returns rotation, flips and sliders to neutral after a bake, so a
    /// render of the new working buffer reproduces it unchanged.
    pub(crate) fn neutralize_baked_state(&mut self) {
        self.rotation_degrees = 0.0;
        self.flip_horizontal = 1.0;
        self.flip_vertical = 1.0;
        self.adjustments = ColorAdjustments::default();
        self.crop_rect = default_crop_rect(self.canvas_width, self.canvas_height);
    }
}

/// Name and dimensions of the current canvas, for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// On-disk size of the source file, when the document came from one.
    pub byte_size: Option<u64>,
}

impl std::fmt::Display for DocumentInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} x {} px", self.name, self.width, self.height)?;
        if let Some(bytes) = self.byte_size {
            write!(f, " ({:.2} MB)", bytes as f64 / (1024.0 * 1024.0))?;
        }
        Ok(())
    }
}
