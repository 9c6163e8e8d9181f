//! Geometry primitives and transform math
//!
//! Pure math shared by the layout engine and the adjustment pipeline:
//! aspect-preserving fitting, ratio-preserving bounds clamping, and the
//! rectangle/size types everything else is built on. All coordinates are
//! f64 page pixels.

use serde::{Deserialize, Serialize};

/// A width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (x + width)
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (y + height)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rectangle
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Whether a point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Euclidean distance between two points
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Scale a source size to fit inside a maximum extent
///
/// Uniform scale factor = min(max_w/src_w, max_h/src_h), so the aspect
/// ratio is preserved. The factor is unconstrained above 1: sources
/// smaller than the extent are scaled up.
pub fn fit_within(src_w: f64, src_h: f64, max_w: f64, max_h: f64) -> Size {
    let ratio = (max_w / src_w).min(max_h / src_h);
    Size::new(src_w * ratio, src_h * ratio)
}

/// Clamp a rectangle into a container, preserving its aspect ratio
///
/// Each out-of-bound edge is pulled back into the container and the
/// opposite dimension is recomputed from the aspect ratio the rectangle
/// had on entry, so clamping never distorts the rectangle. Applying the
/// clamp twice yields the same result as applying it once.
pub fn clamp_to_bounds(rect: Rect, container_w: f64, container_h: f64) -> Rect {
    let aspect = rect.aspect_ratio();
    let mut r = rect;

    if r.x < 0.0 {
        r.width += r.x;
        r.height = r.width / aspect;
        r.x = 0.0;
    }
    if r.y < 0.0 {
        r.height += r.y;
        r.width = r.height * aspect;
        r.y = 0.0;
    }
    if r.right() > container_w {
        r.width = container_w - r.x;
        r.height = r.width / aspect;
    }
    if r.bottom() > container_h {
        r.height = container_h - r.y;
        r.width = r.height * aspect;
    }

    r
}

/// Clamp a rectangle's position into a container without resizing it
///
/// Used while dragging: the size is untouched and the origin is limited
/// to [0, container - size] on each axis.
pub fn clamp_position(rect: Rect, container_w: f64, container_h: f64) -> Rect {
    Rect {
        x: rect.x.max(0.0).min(container_w - rect.width),
        y: rect.y.max(0.0).min(container_h - rect.height),
        width: rect.width,
        height: rect.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_within_downscales_preserving_aspect() {
        let size = fit_within(800.0, 600.0, 264.0, 374.0);
        assert!((size.width - 264.0).abs() < 1e-9);
        assert!((size.height - 198.0).abs() < 1e-9);
        assert!((size.width / size.height - 800.0 / 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_within_upscales_small_sources() {
        let size = fit_within(10.0, 10.0, 100.0, 50.0);
        assert!((size.width - 50.0).abs() < 1e-9);
        assert!((size.height - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_to_bounds_negative_origin() {
        let clamped = clamp_to_bounds(Rect::new(-20.0, 0.0, 100.0, 50.0), 794.0, 1123.0);
        assert_eq!(clamped.x, 0.0);
        assert!((clamped.width - 80.0).abs() < 1e-9);
        assert!((clamped.height - 40.0).abs() < 1e-9, "height should follow the 2:1 aspect");
    }

    #[test]
    fn test_clamp_to_bounds_overflow_right() {
        let clamped = clamp_to_bounds(Rect::new(700.0, 0.0, 200.0, 100.0), 794.0, 1123.0);
        assert!((clamped.right() - 794.0).abs() < 1e-9);
        assert!((clamped.width / clamped.height - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_to_bounds_is_idempotent() {
        let rect = Rect::new(-30.0, 1100.0, 300.0, 200.0);
        let once = clamp_to_bounds(rect, 794.0, 1123.0);
        let twice = clamp_to_bounds(once, 794.0, 1123.0);
        assert!((once.x - twice.x).abs() < 1e-9);
        assert!((once.y - twice.y).abs() < 1e-9);
        assert!((once.width - twice.width).abs() < 1e-9);
        assert!((once.height - twice.height).abs() < 1e-9);
    }

    #[test]
    fn test_clamp_position_pins_to_origin() {
        let clamped = clamp_position(Rect::new(-50.0, -50.0, 100.0, 100.0), 794.0, 1123.0);
        assert_eq!(clamped.x, 0.0);
        assert_eq!(clamped.y, 0.0);
        assert_eq!(clamped.width, 100.0);
    }

    #[test]
    fn test_clamp_position_pins_to_far_edge() {
        let clamped = clamp_position(Rect::new(900.0, 1200.0, 100.0, 100.0), 794.0, 1123.0);
        assert!((clamped.x - 694.0).abs() < 1e-9);
        assert!((clamped.y - 1023.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 10.0, 100.0, 100.0);
        assert!(rect.contains(10.0, 10.0));
        assert!(rect.contains(110.0, 110.0));
        assert!(!rect.contains(110.1, 50.0));
    }

    #[test]
    fn test_distance() {
        assert!((distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < 1e-9);
    }
}
