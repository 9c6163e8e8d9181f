//! Per-pixel color adjustment pass.
//!
//! Brightness is an additive offset per channel, contrast a scaling around
//! the mid-point 128, and the color mode a final remap. Saturation, hue and
//! sharpness are carried as document state for presets and reporting but do
//! not participate in the pixel pass.

use std::fmt;
use std::str::FromStr;

use image::RgbaImage;

/// Slider state for the adjustment pipeline. All values default to 0,
/// which renders the image unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorAdjustments {
    /// Additive channel offset, -100..=100.
    pub brightness: i32,
    /// Contrast amount, -100..=100. Scales channels around 128.
    pub contrast: i32,
    /// Stored for presets and reporting, not applied per pixel.
    pub saturation: i32,
    /// Stored for presets and reporting, not applied per pixel.
    pub hue: i32,
    /// Stored for presets and reporting, not applied per pixel.
    pub sharpness: i32,
}

impl ColorAdjustments {
    /// True when every slider sits at its neutral position.
    pub fn is_neutral(&self) -> bool {
        self.brightness == 0
            && self.contrast == 0
            && self.saturation == 0
            && self.hue == 0
            && self.sharpness == 0
    }

    /// Fixed preset applied by the one-click enhance operation.
    pub fn auto_enhance() -> Self {
        ColorAdjustments {
            brightness: 10,
            contrast: 15,
            saturation: 10,
            hue: 0,
            sharpness: 20,
        }
    }
}

/// Final color remap applied after brightness and contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Channels pass through unchanged.
    #[default]
    Normal,
    /// Luminance-weighted grayscale (0.299 R + 0.587 G + 0.114 B).
    Grayscale,
    /// Hard threshold: luminance above 128 becomes white, otherwise black.
    BlackAndWhite,
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Normal => write!(f, "normal"),
            ColorMode::Grayscale => write!(f, "grayscale"),
            ColorMode::BlackAndWhite => write!(f, "bw"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "color" => Ok(ColorMode::Normal),
            "grayscale" | "gray" | "greyscale" => Ok(ColorMode::Grayscale),
            "bw" | "blackandwhite" | "black-and-white" => Ok(ColorMode::BlackAndWhite),
            _ => Err(format!("Unknown color mode: {}", s)),
        }
    }
}

/// Runs the adjustment pass over `src` and returns the adjusted copy.
///
/// Each RGB channel gets the brightness offset, then the contrast scale
/// `factor * (value - 128) + 128` with `factor = 259(c + 255) / 255(259 - c)`,
/// and is clamped to 0..=255. The color mode remap runs last. Alpha is
/// never touched.
pub fn apply_adjustments(
    src: &RgbaImage,
    adjustments: &ColorAdjustments,
    mode: ColorMode,
) -> RgbaImage {
    let mut out = src.clone();
    let brightness = adjustments.brightness as f64;
    let contrast = adjustments.contrast as f64;
    let factor = (259.0 * (contrast + 255.0)) / (255.0 * (259.0 - contrast));

    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut().take(3) {
            let mut value = *channel as f64 + brightness;
            value = factor * (value - 128.0) + 128.0;
            *channel = value.clamp(0.0, 255.0).round() as u8;
        }

        match mode {
            ColorMode::Normal => {}
            ColorMode::Grayscale => {
                let gray = luminance(pixel.0[0], pixel.0[1], pixel.0[2]);
                let level = gray.clamp(0.0, 255.0).round() as u8;
                pixel.0[0] = level;
                pixel.0[1] = level;
                pixel.0[2] = level;
            }
            ColorMode::BlackAndWhite => {
                let gray = luminance(pixel.0[0], pixel.0[1], pixel.0[2]);
                let level = if gray > 128.0 { 255 } else { 0 };
                pixel.0[0] = level;
                pixel.0[1] = level;
                pixel.0[2] = level;
            }
        }
    }

    out
}

fn luminance(r: u8, g: u8, b: u8) -> f64 {
    r as f64 * 0.299 + g as f64 * 0.587 + b as f64 * 0.114
}
