//! # PrintKit
//!
//! A Rust toolkit for preparing images for paper:
//! - A4 page composition with multiple images, pointer-driven layout,
//!   and high-DPI export
//! - Single-image print adjustment: rotate, mirror, brightness/contrast,
//!   grayscale and black-and-white remaps, crop
//! - Print document generation in physical millimeter coordinates
//!
//! ## Architecture
//!
//! PrintKit is organized as a workspace with multiple crates:
//!
//! 1. **printkit-core** - Error taxonomy, geometry math, page units,
//!    raster input/output
//! 2. **printkit-layout** - Scene model, manipulation state machine,
//!    page renderer, export and print documents
//! 3. **printkit-adjust** - Adjustment document, color pipeline, crop,
//!    image export
//! 4. **printkit-settings** - Configuration files and defaults
//! 5. **printkit** - Main binary that integrates all crates

pub use printkit_adjust as adjust;
pub use printkit_layout as layout;
pub use printkit_settings as settings;

pub use printkit_core::{
    clamp_position, clamp_to_bounds, distance, dpi_scale, fit_within, load_image,
    load_image_bytes, page_x_to_mm, page_y_to_mm, Error, LoadedImage, Orientation, OutputFormat,
    PrintQuality, Rect, Result, Size, BASELINE_DPI, PAGE_HEIGHT_MM, PAGE_HEIGHT_PX, PAGE_WIDTH_MM,
    PAGE_WIDTH_PX,
};

pub use printkit_layout::{
    render_scene, CursorHint, ExportOptions, Handle, ManipulationState, PlacedImage,
    PointerController, PointerEvent, PrintDocument, Scene, SceneSummary,
};

pub use printkit_adjust::{AdjustmentDocument, ColorAdjustments, ColorMode, DocumentInfo};

pub use printkit_settings::{Config, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
/// - UTC timestamps
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
