//! Page export: high-DPI re-rasterization and encoding.
//!
//! Export never reuses the on-screen surface. A fresh surface is sized
//! by the DPI scale factor, the scene is drawn at scaled positions and
//! sizes without selection decoration, and the result is encoded.

use crate::render::render_page_at_scale;
use crate::scene::Scene;
use printkit_core::error::ExportError;
use printkit_core::{
    dpi_scale, encode_image, timestamped_artifact_name, OutputFormat, Result, PAGE_HEIGHT_PX,
    PAGE_WIDTH_PX,
};
use std::path::Path;
use tracing::info;

/// Page export parameters.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Output resolution; 96 is the on-screen baseline.
    pub dpi: u32,
    pub format: OutputFormat,
    /// JPEG quality, 0-100. Ignored by the lossless formats.
    pub quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dpi: 300,
            format: OutputFormat::Png,
            quality: 90,
        }
    }
}

/// Rasterize and encode the page at the requested DPI.
///
/// An empty scene is an error; there is nothing meaningful to export.
pub fn export_page(scene: &Scene, options: &ExportOptions) -> Result<Vec<u8>> {
    if scene.is_empty() {
        return Err(ExportError::NothingToExport {
            reason: "the page has no images".to_string(),
        }
        .into());
    }

    let scale = dpi_scale(options.dpi);
    let width = (PAGE_WIDTH_PX * scale).round() as u32;
    let height = (PAGE_HEIGHT_PX * scale).round() as u32;
    let raster = render_page_at_scale(scene, scale)
        .ok_or(ExportError::SurfaceTooLarge { width, height })?;

    encode_image(&raster, options.format, options.quality)
}

/// Export the page directly to a file.
pub fn export_page_to_file(scene: &Scene, options: &ExportOptions, path: &Path) -> Result<()> {
    let bytes = export_page(scene, options)?;
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), dpi = options.dpi, "page exported");
    Ok(())
}

/// Timestamped default name for a page artifact.
pub fn default_artifact_name(format: OutputFormat) -> String {
    timestamped_artifact_name("A4-Layout", format)
}
