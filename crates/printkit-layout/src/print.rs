//! Print document generation.
//!
//! The print path does not rasterize. It describes each placed image in
//! millimeters anchored to the physical 210mm x 297mm sheet and leaves
//! layout and pagination to an external print engine; the HTML
//! rendering is self-contained, with sources embedded as data URIs.

use crate::scene::Scene;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use printkit_core::error::ExportError;
use printkit_core::{
    encode_image, page_x_to_mm, page_y_to_mm, OutputFormat, Result, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
use std::fmt::Write as _;
use std::path::PathBuf;

/// One placed image expressed in physical page coordinates.
#[derive(Debug, Clone)]
pub struct PrintImage {
    pub name: String,
    /// Original file path, when the image came from a file.
    pub source: Option<PathBuf>,
    pub left_mm: f64,
    pub top_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Self-contained PNG data URI of the source bitmap.
    pub data_uri: String,
}

/// Millimeter-space description of the whole page.
#[derive(Debug, Clone)]
pub struct PrintDocument {
    pub images: Vec<PrintImage>,
}

/// Build the print document for the current scene.
///
/// Positions and sizes convert per axis (794px over 210mm horizontally,
/// 1123px over 297mm vertically). An empty scene is an error.
pub fn print_document(scene: &Scene) -> Result<PrintDocument> {
    if scene.is_empty() {
        return Err(ExportError::NothingToExport {
            reason: "the page has no images".to_string(),
        }
        .into());
    }

    let mut images = Vec::with_capacity(scene.len());
    for img in scene.images() {
        let png = encode_image(&img.buffer, OutputFormat::Png, 100)?;
        images.push(PrintImage {
            name: img.name.clone(),
            source: img.source.clone(),
            left_mm: page_x_to_mm(img.rect.x),
            top_mm: page_y_to_mm(img.rect.y),
            width_mm: page_x_to_mm(img.rect.width),
            height_mm: page_y_to_mm(img.rect.height),
            data_uri: format!("data:image/png;base64,{}", STANDARD.encode(&png)),
        });
    }

    Ok(PrintDocument { images })
}

impl PrintDocument {
    /// Render the document as a printable HTML page.
    ///
    /// Images are absolutely positioned in millimeters (2 decimals)
    /// inside an A4 `@page` with zero margins.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Print A4 Layout</title>\n<style>\n");
        html.push_str("    @page { size: A4; margin: 0; }\n");
        html.push_str("    body { margin: 0; padding: 0; }\n");
        let _ = writeln!(
            html,
            "    .print-container {{ width: {:.0}mm; height: {:.0}mm; position: relative; background: white; }}",
            PAGE_WIDTH_MM, PAGE_HEIGHT_MM
        );
        html.push_str("    img { position: absolute; }\n");
        html.push_str("</style>\n</head>\n<body>\n<div class=\"print-container\">\n");

        for img in &self.images {
            let _ = writeln!(
                html,
                "    <img src=\"{}\" style=\"left: {:.2}mm; top: {:.2}mm; width: {:.2}mm; height: {:.2}mm;\">",
                img.data_uri, img.left_mm, img.top_mm, img.width_mm, img.height_mm
            );
        }

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }
}
