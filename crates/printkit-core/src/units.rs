//! Physical page units and DPI conversion
//!
//! The page is a virtual A4 sheet held at a 96 DPI screen baseline:
//! 794x1123 pixel units for 210mm x 297mm. The horizontal and vertical
//! pixel-per-millimeter ratios differ slightly, so conversions are always
//! per axis; a single scalar must never serve both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A4 page width in pixel units (210mm at 96 DPI)
pub const PAGE_WIDTH_PX: f64 = 794.0;
/// A4 page height in pixel units (297mm at 96 DPI)
pub const PAGE_HEIGHT_PX: f64 = 1123.0;
/// A4 page width in millimeters
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 page height in millimeters
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// Screen baseline resolution
pub const BASELINE_DPI: f64 = 96.0;

/// Convert a pixel measure to millimeters along one axis
///
/// Linear conversion: px / axis_px_extent * axis_mm_extent.
pub fn px_to_mm(px: f64, axis_px_extent: f64, axis_mm_extent: f64) -> f64 {
    px / axis_px_extent * axis_mm_extent
}

/// Convert a millimeter measure to pixels along one axis
pub fn mm_to_px(mm: f64, axis_mm_extent: f64, axis_px_extent: f64) -> f64 {
    mm / axis_mm_extent * axis_px_extent
}

/// Horizontal page-pixel measure to millimeters (794px over 210mm)
pub fn page_x_to_mm(px: f64) -> f64 {
    px_to_mm(px, PAGE_WIDTH_PX, PAGE_WIDTH_MM)
}

/// Vertical page-pixel measure to millimeters (1123px over 297mm)
pub fn page_y_to_mm(px: f64) -> f64 {
    px_to_mm(px, PAGE_HEIGHT_PX, PAGE_HEIGHT_MM)
}

/// Scale factor that re-rasterizes the 96 DPI baseline at a target DPI
pub fn dpi_scale(target_dpi: u32) -> f64 {
    target_dpi as f64 / BASELINE_DPI
}

/// Page orientation for print output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Short edge horizontal (210mm x 297mm)
    Portrait,
    /// Long edge horizontal (297mm x 210mm)
    Landscape,
}

impl Orientation {
    /// Page extent in millimeters for this orientation, (width, height)
    pub fn page_size_mm(&self) -> (f64, f64) {
        match self {
            Self::Portrait => (PAGE_WIDTH_MM, PAGE_HEIGHT_MM),
            Self::Landscape => (PAGE_HEIGHT_MM, PAGE_WIDTH_MM),
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Portrait
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "Portrait"),
            Self::Landscape => write!(f, "Landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => Err(format!("Unknown orientation: {}", s)),
        }
    }
}

/// Expected print quality at a given output resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintQuality {
    /// Below 150 DPI
    Poor,
    /// 150 to 199 DPI
    Fair,
    /// 200 to 299 DPI
    Good,
    /// 300 DPI and above
    Excellent,
}

impl PrintQuality {
    /// Classify an output resolution
    pub fn from_dpi(dpi: u32) -> Self {
        if dpi < 150 {
            Self::Poor
        } else if dpi < 200 {
            Self::Fair
        } else if dpi < 300 {
            Self::Good
        } else {
            Self::Excellent
        }
    }
}

impl fmt::Display for PrintQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poor => write!(f, "Poor"),
            Self::Fair => write!(f, "Fair"),
            Self::Good => write!(f, "Good"),
            Self::Excellent => write!(f, "Excellent"),
        }
    }
}
