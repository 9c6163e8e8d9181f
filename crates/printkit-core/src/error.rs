//! Error handling for PrintKit
//!
//! Provides error types for all layers of the toolkit:
//! - Image errors (input gating and decoding)
//! - Export errors (encoding and artifact writing)
//! - Config errors (settings files)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Layout constraints (minimum element size, page containment) are
//! deliberately absent from this taxonomy: violating them clamps the
//! geometry instead of failing the operation.

use thiserror::Error;

/// Image input error type
///
/// Represents failures while bringing raster data into the toolkit.
/// Input is gated before decoding, so a rejected file never creates
/// partial scene or document state.
#[derive(Error, Debug, Clone)]
pub enum ImageError {
    /// Input was rejected before decoding because it is not an image
    #[error("Not an image file: {name}")]
    InvalidInput {
        /// The offending file name or label.
        name: String,
    },

    /// Input claimed to be an image but its data could not be decoded
    #[error("Failed to decode image {name}: {reason}")]
    DecodeFailure {
        /// The offending file name or label.
        name: String,
        /// The decoder's failure message.
        reason: String,
    },

    /// Image dimensions are unusable (zero width or height)
    #[error("Image {name} has empty dimensions")]
    EmptyImage {
        /// The offending file name or label.
        name: String,
    },
}

/// Export error type
///
/// Represents failures while producing output artifacts
/// (page rasters, adjusted images, print documents).
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    /// The requested output format is not supported
    #[error("Unsupported output format: {format}")]
    UnsupportedFormat {
        /// The requested format name.
        format: String,
    },

    /// Encoding the output buffer failed
    #[error("Failed to encode {format} output: {reason}")]
    EncodeFailed {
        /// The target format name.
        format: String,
        /// The encoder's failure message.
        reason: String,
    },

    /// Nothing to export (empty scene or missing image)
    #[error("Nothing to export: {reason}")]
    NothingToExport {
        /// Why no artifact could be produced.
        reason: String,
    },

    /// The output rasterization surface could not be allocated
    #[error("Cannot allocate a {width}x{height} output surface")]
    SurfaceTooLarge {
        /// Requested surface width in pixels.
        width: u32,
        /// Requested surface height in pixels.
        height: u32,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file: {reason}")]
    ReadFailed {
        /// The underlying I/O failure message.
        reason: String,
    },

    /// Config file contents could not be parsed
    #[error("Invalid config file: {reason}")]
    ParseFailed {
        /// The parser's failure message.
        reason: String,
    },

    /// A config value is out of its allowed range
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue {
        /// The offending field name.
        field: String,
        /// Why the value is unacceptable.
        reason: String,
    },
}

/// Main error type for PrintKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Image input error
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this input was rejected before decoding
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::Image(ImageError::InvalidInput { .. }))
    }

    /// Check if this is an image decode failure
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Error::Image(ImageError::DecodeFailure { .. }))
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
