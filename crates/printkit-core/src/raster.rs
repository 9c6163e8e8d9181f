//! Raster input gate, decoding, and encoding.
//!
//! Shared by the page layout engine and the single-image adjustment
//! pipeline. Input is rejected before any decoding when it does not
//! look like an image (wrong extension for paths, unrecognizable magic
//! bytes for raw buffers), so a refused file never creates partial
//! scene or document state.

use crate::error::{ExportError, ImageError};
use crate::Result;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat, ImageReader, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Extensions accepted as image input.
const IMAGE_EXTENSIONS: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("gif", ImageFormat::Gif),
    ("bmp", ImageFormat::Bmp),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

/// Whether a path carries a recognized image extension.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|(known, _)| known.eq_ignore_ascii_case(ext))
        })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string()
}

/// A decoded image ready for placement or adjustment.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub name: String,
    pub source: Option<PathBuf>,
    pub buffer: RgbaImage,
    /// Source file size in bytes, when loaded from a file.
    pub byte_size: Option<u64>,
}

/// Loads and decodes an image file.
///
/// Paths without an image extension are rejected up front with
/// `InvalidInput`; files that fail to decode report `DecodeFailure`.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let name = display_name(path);
    if !is_image_path(path) {
        return Err(ImageError::InvalidInput { name }.into());
    }

    let byte_size = std::fs::metadata(path).ok().map(|m| m.len());
    let reader = ImageReader::open(path)?;
    let decoded = reader.decode().map_err(|e| ImageError::DecodeFailure {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    let buffer = decoded.to_rgba8();
    debug!(name, width = buffer.width(), height = buffer.height(), "decoded image");
    Ok(LoadedImage {
        name,
        source: Some(path.to_path_buf()),
        buffer,
        byte_size,
    })
}

/// Decodes an in-memory byte buffer.
///
/// The format is sniffed from magic bytes; unrecognizable input is
/// rejected as `InvalidInput` without attempting a decode.
pub fn load_image_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<LoadedImage> {
    let name = name.into();
    let format = image::guess_format(bytes).map_err(|_| ImageError::InvalidInput {
        name: name.clone(),
    })?;

    let decoded = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| ImageError::DecodeFailure {
            name: name.clone(),
            reason: e.to_string(),
        })?;

    let buffer = decoded.to_rgba8();
    debug!(name, width = buffer.width(), height = buffer.height(), "decoded image bytes");
    Ok(LoadedImage {
        name,
        source: None,
        buffer,
        byte_size: Some(bytes.len() as u64),
    })
}

/// Output encoding for exported artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG with a 0-100 quality setting
    Jpg,
    /// Lossless PNG
    Png,
    /// Lossless WebP
    WebP,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Jpg
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Encode an RGBA buffer into the chosen format.
///
/// `quality` applies to JPEG only; PNG and WebP encode losslessly.
/// JPEG has no alpha channel, so the buffer is flattened to RGB first.
pub fn encode_image(buffer: &RgbaImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        OutputFormat::Jpg => {
            let rgb = DynamicImage::ImageRgba8(buffer.clone()).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut out, quality.min(100));
            encoder
                .write_image(
                    rgb.as_raw(),
                    rgb.width(),
                    rgb.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| ExportError::EncodeFailed {
                    format: format.to_string(),
                    reason: e.to_string(),
                })?;
        }
        OutputFormat::Png => {
            let encoder = PngEncoder::new(&mut out);
            encoder
                .write_image(
                    buffer.as_raw(),
                    buffer.width(),
                    buffer.height(),
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| ExportError::EncodeFailed {
                    format: format.to_string(),
                    reason: e.to_string(),
                })?;
        }
        OutputFormat::WebP => {
            let encoder = WebPEncoder::new_lossless(&mut out);
            encoder
                .encode(
                    buffer.as_raw(),
                    buffer.width(),
                    buffer.height(),
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| ExportError::EncodeFailed {
                    format: format.to_string(),
                    reason: e.to_string(),
                })?;
        }
    }
    Ok(out)
}

/// Timestamped artifact name, e.g. `A4-Layout-1755776400000.png`.
pub fn timestamped_artifact_name(prefix: &str, format: OutputFormat) -> String {
    format!(
        "{}-{}.{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_image_extension() {
        let err = load_image(Path::new("notes.txt")).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rejects_garbage_bytes() {
        let err = load_image_bytes("garbage.bin", b"this is not an image").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_decodes_png_bytes() {
        let img = RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
        let png = encode_image(&img, OutputFormat::Png, 100).unwrap();

        let loaded = load_image_bytes("red.png", &png).unwrap();
        assert_eq!(loaded.buffer.width(), 4);
        assert_eq!(loaded.buffer.height(), 4);
        assert_eq!(loaded.buffer.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(loaded.byte_size, Some(png.len() as u64));
    }

    #[test]
    fn test_truncated_png_is_decode_failure() {
        // Valid PNG magic, nothing else
        let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];
        let err = load_image_bytes("broken.png", &bytes).unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[test]
    fn test_encode_jpeg_and_webp() {
        let img = RgbaImage::from_pixel(8, 8, image::Rgba([0, 128, 255, 255]));
        let jpg = encode_image(&img, OutputFormat::Jpg, 85).unwrap();
        assert_eq!(image::guess_format(&jpg).unwrap(), ImageFormat::Jpeg);
        let webp = encode_image(&img, OutputFormat::WebP, 85).unwrap();
        assert_eq!(image::guess_format(&webp).unwrap(), ImageFormat::WebP);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jpeg".parse::<OutputFormat>(), Ok(OutputFormat::Jpg));
        assert_eq!("PNG".parse::<OutputFormat>(), Ok(OutputFormat::Png));
        assert!("bmp".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_artifact_name_shape() {
        let name = timestamped_artifact_name("A4-Layout", OutputFormat::Png);
        assert!(name.starts_with("A4-Layout-"));
        assert!(name.ends_with(".png"));
    }
}
