//! # PrintKit Adjust
//!
//! This crate provides the single-image print adjustment pipeline: an
//! editing document with non-destructive geometry and color state, a
//! deterministic renderer, crop baking, and export/print preparation.
//!
//! ## Core Components
//!
//! ### Document
//! - **AdjustmentDocument**: Original and working pixel buffers plus
//!   rotation, mirror, zoom/pan view state, slider values and the crop
//!   selection
//! - **Reset**: The original buffer is never written after load, so the
//!   first-loaded image is always recoverable
//!
//! ### Pipeline
//! - **Renderer**: Geometry pass (rotate about the center, mirror,
//!   corners clip) followed by the color pass
//! - **Color pass**: Brightness offset, contrast scaling around 128,
//!   then grayscale or black-and-white remap; alpha untouched
//! - **Crop**: Bakes the rendered selection into a new working buffer
//!   and returns the parameters to neutral
//!
//! ### Output
//! - **Export**: Rendered canvas encoded to PNG / JPEG / WebP
//! - **Print**: The render fitted and centered on an A4 sheet in
//!   millimeter coordinates, rendered to self-contained HTML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use printkit_adjust::{export_document, AdjustmentDocument, ColorMode};
//! use printkit_core::OutputFormat;
//!
//! let mut doc = AdjustmentDocument::new("photo.jpg", buffer)?;
//! doc.rotate_by(90.0);
//! doc.set_brightness(10);
//! doc.set_color_mode(ColorMode::Grayscale);
//! doc.apply_crop();
//!
//! let bytes = export_document(&doc, OutputFormat::Jpg, 90)?;
//! ```

pub mod color;
pub mod crop;
pub mod document;
pub mod export;
pub mod render;

pub use color::{apply_adjustments, ColorAdjustments, ColorMode};
pub use crop::{default_crop_rect, DEFAULT_CROP_FRACTION};
pub use document::{
    AdjustmentDocument, DocumentInfo, MAX_ZOOM, MIN_ZOOM, ZOOM_IN_STEP, ZOOM_OUT_STEP,
};
pub use export::{
    default_artifact_name, export_document, export_document_to_file, print_html, print_info,
    PrintInfo,
};
pub use render::render;
