//! Shared layout constants

/// Circular hit radius around a resize handle, in page pixels
pub const HANDLE_HIT_RADIUS: f64 = 10.0;

/// Minimum element dimension enforced while resizing
pub const MIN_IMAGE_SIZE: f64 = 50.0;

/// Positional stagger between successively added images
pub const CASCADE_STEP: f64 = 20.0;

/// Newly added images are fitted within this fraction of each page axis
pub const INITIAL_FIT_FRACTION: f64 = 1.0 / 3.0;
