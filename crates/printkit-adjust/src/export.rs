//! Adjusted-image export and print preparation.
//!
//! Export encodes the rendered document at its natural canvas size.
//! The print path describes the rendered image in millimeters, fitted
//! and centered on the physical sheet, with the bitmap embedded as a
//! data URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use printkit_core::{
    encode_image, fit_within, timestamped_artifact_name, Orientation, OutputFormat, PrintQuality,
    Result,
};
use std::fmt;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::document::AdjustmentDocument;
use crate::render::render;

/// Render and encode the document.
///
/// `quality` applies to JPEG only; the lossless formats ignore it.
pub fn export_document(
    doc: &AdjustmentDocument,
    format: OutputFormat,
    quality: u8,
) -> Result<Vec<u8>> {
    let raster = render(doc);
    encode_image(&raster, format, quality)
}

/// Export the document directly to a file.
pub fn export_document_to_file(
    doc: &AdjustmentDocument,
    format: OutputFormat,
    quality: u8,
    path: &Path,
) -> Result<()> {
    let bytes = export_document(doc, format, quality)?;
    std::fs::write(path, &bytes)?;
    info!(path = %path.display(), format = %format, "image exported");
    Ok(())
}

/// Timestamped default name for an adjusted-image artifact.
pub fn default_artifact_name(format: OutputFormat) -> String {
    timestamped_artifact_name("print-optimized", format)
}

/// Print settings summary shown before printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintInfo {
    pub orientation: Orientation,
    pub dpi: u32,
    pub quality: PrintQuality,
    /// Rendered canvas size in pixels.
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for PrintInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A4 {} at {} DPI ({} quality), {} x {} px",
            self.orientation, self.dpi, self.quality, self.width, self.height
        )
    }
}

/// Summarize how the document would print.
pub fn print_info(doc: &AdjustmentDocument, orientation: Orientation, dpi: u32) -> PrintInfo {
    let (width, height) = doc.canvas_size();
    PrintInfo {
        orientation,
        dpi,
        quality: PrintQuality::from_dpi(dpi),
        width,
        height,
    }
}

/// Render the document as a printable HTML page.
///
/// The image is scaled to fit the oriented sheet without changing its
/// aspect ratio, centered, and positioned in millimeters (2 decimals)
/// inside an A4 `@page` with zero margins.
pub fn print_html(doc: &AdjustmentDocument, orientation: Orientation) -> Result<String> {
    let raster = render(doc);
    let png = encode_image(&raster, OutputFormat::Png, 100)?;
    let data_uri = format!("data:image/png;base64,{}", STANDARD.encode(&png));

    let (page_width_mm, page_height_mm) = orientation.page_size_mm();
    let fitted = fit_within(
        raster.width() as f64,
        raster.height() as f64,
        page_width_mm,
        page_height_mm,
    );
    let left_mm = (page_width_mm - fitted.width) / 2.0;
    let top_mm = (page_height_mm - fitted.height) / 2.0;

    Ok(single_image_html(
        &data_uri,
        orientation,
        page_width_mm,
        page_height_mm,
        left_mm,
        top_mm,
        fitted.width,
        fitted.height,
    ))
}

#[allow(clippy::too_many_arguments)]
fn single_image_html(
    data_uri: &str,
    orientation: Orientation,
    page_width_mm: f64,
    page_height_mm: f64,
    left_mm: f64,
    top_mm: f64,
    width_mm: f64,
    height_mm: f64,
) -> String {
    let page_size = match orientation {
        Orientation::Portrait => "A4",
        Orientation::Landscape => "A4 landscape",
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Print Image</title>\n<style>\n");
    let _ = writeln!(html, "    @page {{ size: {}; margin: 0; }}", page_size);
    html.push_str("    body { margin: 0; padding: 0; }\n");
    let _ = writeln!(
        html,
        "    .print-container {{ width: {:.0}mm; height: {:.0}mm; position: relative; background: white; }}",
        page_width_mm, page_height_mm
    );
    html.push_str("    img { position: absolute; }\n");
    html.push_str("</style>\n</head>\n<body>\n<div class=\"print-container\">\n");
    let _ = writeln!(
        html,
        "    <img src=\"{}\" style=\"left: {:.2}mm; top: {:.2}mm; width: {:.2}mm; height: {:.2}mm;\">",
        data_uri, left_mm, top_mm, width_mm, height_mm
    );
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn document(width: u32, height: u32) -> AdjustmentDocument {
        let buffer = RgbaImage::from_pixel(width, height, Rgba([120, 60, 30, 255]));
        AdjustmentDocument::new("test.png", buffer).unwrap()
    }

    #[test]
    fn test_export_produces_decodable_png() {
        let doc = document(20, 10);
        let bytes = export_document(&doc, OutputFormat::Png, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 20);
        assert_eq!(decoded.height(), 10);
    }

    #[test]
    fn test_default_artifact_name_prefix_and_extension() {
        let name = default_artifact_name(OutputFormat::Jpg);
        assert!(name.starts_with("print-optimized-"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_print_info_grades_resolution() {
        let doc = document(10, 10);
        let info = print_info(&doc, Orientation::Portrait, 300);
        assert_eq!(info.quality, PrintQuality::Excellent);
        assert_eq!(info.width, 10);
        let low = print_info(&doc, Orientation::Portrait, 100);
        assert_eq!(low.quality, PrintQuality::Poor);
    }

    #[test]
    fn test_print_html_fits_wide_image_to_page_width() {
        // Twice as wide as tall: on portrait A4 the width binds.
        let doc = document(200, 100);
        let html = print_html(&doc, Orientation::Portrait).unwrap();
        assert!(html.contains("@page { size: A4; margin: 0; }"));
        assert!(html.contains("width: 210.00mm; height: 105.00mm;"));
        assert!(html.contains("left: 0.00mm;"));
        assert!(html.contains("top: 96.00mm;"), "Image should center vertically");
        assert!(html.contains("data:image/png;base64,"));
    }

    #[test]
    fn test_print_html_landscape_page_rule() {
        let doc = document(100, 100);
        let html = print_html(&doc, Orientation::Landscape).unwrap();
        assert!(html.contains("@page { size: A4 landscape; margin: 0; }"));
        // Square image on landscape: the 210mm height binds.
        assert!(html.contains("width: 210.00mm; height: 210.00mm;"));
    }
}
