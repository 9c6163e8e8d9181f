//! # PrintKit Core
//!
//! Core types and utilities for PrintKit.
//! Provides the error taxonomy, geometry math, physical page units,
//! raster input/output, and the layout constants shared by the
//! higher-level crates.

pub mod constants;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod units;

pub use error::{ConfigError, Error, ExportError, ImageError, Result};
pub use geometry::{clamp_position, clamp_to_bounds, distance, fit_within, Rect, Size};
pub use raster::{
    encode_image, is_image_path, load_image, load_image_bytes, timestamped_artifact_name,
    LoadedImage, OutputFormat,
};
pub use units::{
    dpi_scale, mm_to_px, page_x_to_mm, page_y_to_mm, px_to_mm, Orientation, PrintQuality,
    BASELINE_DPI, PAGE_HEIGHT_MM, PAGE_HEIGHT_PX, PAGE_WIDTH_MM, PAGE_WIDTH_PX,
};
