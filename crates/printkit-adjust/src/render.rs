//! Renderer for an adjustment document.
//!
//! A pure function of the document state: a transparent surface at the
//! canvas size, the working buffer drawn centered through the rotation
//! and mirror transform, then the color pass. The surface never grows
//! for a rotation, so corners that leave it are clipped. Zoom and pan
//! are view state and play no part here.

use image::RgbaImage;
use tiny_skia::{ColorU8, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::color::apply_adjustments;
use crate::document::AdjustmentDocument;

/// Render the document to a straight-alpha RGBA buffer.
pub fn render(doc: &AdjustmentDocument) -> RgbaImage {
    let geometry = render_geometry(doc);
    apply_adjustments(&geometry, doc.adjustments(), doc.color_mode())
}

/// The geometry pass alone: rotation and mirroring, no color work.
fn render_geometry(doc: &AdjustmentDocument) -> RgbaImage {
    let working = doc.working();
    if doc.rotation_degrees() == 0.0 && doc.flip_horizontal() == 1.0 && doc.flip_vertical() == 1.0
    {
        // An untransformed draw is a pixel-exact copy.
        return working.clone();
    }

    let (canvas_width, canvas_height) = doc.canvas_size();
    let Some(mut pixmap) = Pixmap::new(canvas_width, canvas_height) else {
        return RgbaImage::new(canvas_width, canvas_height);
    };
    let Some(src) = pixmap_from_rgba(working) else {
        return rgba_from_pixmap(&pixmap);
    };

    let image_width = working.width() as f32;
    let image_height = working.height() as f32;
    let transform = Transform::from_translate(-image_width / 2.0, -image_height / 2.0)
        .post_scale(doc.flip_horizontal() as f32, doc.flip_vertical() as f32)
        .post_concat(Transform::from_rotate(doc.rotation_degrees() as f32))
        .post_translate(canvas_width as f32 / 2.0, canvas_height as f32 / 2.0);

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);

    rgba_from_pixmap(&pixmap)
}

/// Copy an RGBA buffer into a premultiplied tiny-skia pixmap.
fn pixmap_from_rgba(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (src, dst) in img.pixels().zip(pixmap.pixels_mut()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Convert a pixmap back to a straight-alpha RGBA buffer.
fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();
    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let p = pixels[(y * width + x) as usize].demultiply();
        image::Rgba([p.red(), p.green(), p.blue(), p.alpha()])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn marker_image(width: u32, height: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img
    }

    #[test]
    fn test_neutral_render_is_identity() {
        let buffer = RgbaImage::from_fn(8, 6, |x, y| Rgba([x as u8 * 30, y as u8 * 40, 7, 255]));
        let doc = AdjustmentDocument::new("test.png", buffer.clone()).unwrap();
        assert_eq!(render(&doc), buffer, "Neutral document must render unchanged");
    }

    #[test]
    fn test_horizontal_flip_mirrors_pixels() {
        let mut doc = AdjustmentDocument::new("test.png", marker_image(4, 4)).unwrap();
        doc.flip_horizontally();
        let out = render(&doc);
        let mirrored = out.get_pixel(3, 0);
        assert!(
            mirrored.0[0] > 200 && mirrored.0[3] > 200,
            "Marker should move to the mirrored column, got {:?}",
            mirrored
        );
        assert_eq!(out.get_pixel(0, 0).0[3], 0, "Origin should now be empty");
    }

    #[test]
    fn test_quarter_rotation_moves_marker_clockwise() {
        let mut doc = AdjustmentDocument::new("test.png", marker_image(4, 4)).unwrap();
        doc.rotate_by(90.0);
        let out = render(&doc);
        let corner = out.get_pixel(3, 0);
        assert!(
            corner.0[0] > 200 && corner.0[3] > 200,
            "Top-left marker should land top-right after 90 degrees, got {:?}",
            corner
        );
    }

    #[test]
    fn test_rotation_keeps_canvas_size_and_clips_corners() {
        let buffer = RgbaImage::from_pixel(100, 40, Rgba([10, 20, 30, 255]));
        let mut doc = AdjustmentDocument::new("test.png", buffer).unwrap();
        doc.rotate_by(90.0);
        let out = render(&doc);
        assert_eq!(out.width(), 100);
        assert_eq!(out.height(), 40);
        // A 100-wide image turned upright cannot cover the left edge.
        assert_eq!(out.get_pixel(1, 20).0[3], 0, "Side pixels should be empty");
        let center = out.get_pixel(50, 20);
        assert!(center.0[3] > 200, "Center should stay covered");
    }

    #[test]
    fn test_zoom_and_pan_do_not_change_pixels() {
        let buffer = RgbaImage::from_fn(8, 8, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        let mut doc = AdjustmentDocument::new("test.png", buffer).unwrap();
        let before = render(&doc);
        doc.zoom_in();
        doc.pan_by(25.0, -10.0);
        assert_eq!(render(&doc), before, "Zoom and pan are view-only state");
    }

    #[test]
    fn test_render_applies_color_pass() {
        let buffer = RgbaImage::from_pixel(2, 2, Rgba([100, 100, 100, 255]));
        let mut doc = AdjustmentDocument::new("test.png", buffer).unwrap();
        doc.set_brightness(50);
        let out = render(&doc);
        assert_eq!(out.get_pixel(0, 0).0, [150, 150, 150, 255]);
    }
}
