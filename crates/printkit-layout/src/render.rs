//! Page renderer.
//!
//! Deterministic, stateless redraw of the whole scene using tiny-skia:
//! white page, static border, caption label, every image in ascending
//! z-order, then the selection outline and handle markers on top. There
//! is no partial invalidation; every mutation is followed by a full
//! redraw, which is fine at user-manageable image counts.

use crate::font;
use crate::interaction::Handle;
use crate::model::PlacedImage;
use crate::scene::Scene;
use image::RgbaImage;
use printkit_core::{Rect as PageRect, PAGE_HEIGHT_PX, PAGE_WIDTH_PX};
use rusttype::{point as rt_point, Scale};
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

/// Side length of the filled handle markers drawn on the selection.
pub const HANDLE_MARKER_SIZE: f32 = 8.0;

const PAGE_BORDER_WIDTH: f32 = 2.0;
const SELECTION_STROKE_WIDTH: f32 = 2.0;
const CAPTION_FONT_SIZE: f32 = 16.0;
const CAPTION_BASELINE_Y: f32 = 30.0;
const PAGE_CAPTION: &str = "A4 Size (210mm × 297mm)";

fn page_color() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}
fn border_color() -> Color {
    Color::from_rgba8(229, 231, 235, 255)
}
fn caption_color() -> ColorU8 {
    ColorU8::from_rgba(156, 163, 175, 255)
}
fn selection_color() -> Color {
    Color::from_rgba8(99, 102, 241, 255)
}

/// Render the scene at screen resolution with page decoration and,
/// when a selection exists, its outline and handle markers.
pub fn render_scene(scene: &Scene) -> RgbaImage {
    let width = PAGE_WIDTH_PX as u32;
    let height = PAGE_HEIGHT_PX as u32;
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbaImage::new(width, height);
    };
    pixmap.fill(page_color());

    draw_page_border(&mut pixmap);
    draw_caption(&mut pixmap, PAGE_CAPTION, width as f32 / 2.0, CAPTION_BASELINE_Y);

    for img in scene.images() {
        draw_placed_image(&mut pixmap, img, 1.0);
    }

    if let Some(selected) = scene.selected() {
        draw_selection(&mut pixmap, &selected.rect);
    }

    rgba_from_pixmap(&pixmap)
}

/// Render the scene for export: a fresh surface scaled by `scale`,
/// white fill, images only. Selection decoration, border, and caption
/// are omitted.
pub fn render_page_at_scale(scene: &Scene, scale: f64) -> Option<RgbaImage> {
    let width = (PAGE_WIDTH_PX * scale).round() as u32;
    let height = (PAGE_HEIGHT_PX * scale).round() as u32;
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(page_color());

    for img in scene.images() {
        draw_placed_image(&mut pixmap, img, scale);
    }

    Some(rgba_from_pixmap(&pixmap))
}

fn draw_page_border(pixmap: &mut Pixmap) {
    let Some(rect) = tiny_skia::Rect::from_xywh(
        0.0,
        0.0,
        pixmap.width() as f32,
        pixmap.height() as f32,
    ) else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    let stroke = Stroke {
        width: PAGE_BORDER_WIDTH,
        ..Default::default()
    };
    let mut paint = Paint::default();
    paint.set_color(border_color());
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Draw one placed image scaled into its page rect, rotated about the
/// rect center when a rotation is set.
fn draw_placed_image(pixmap: &mut Pixmap, img: &PlacedImage, scale: f64) {
    let Some(src) = pixmap_from_rgba(&img.buffer) else {
        return;
    };

    let sx = (img.rect.width * scale / img.buffer.width() as f64) as f32;
    let sy = (img.rect.height * scale / img.buffer.height() as f64) as f32;
    let mut transform = Transform::from_scale(sx, sy)
        .post_translate((img.rect.x * scale) as f32, (img.rect.y * scale) as f32);

    if img.rotation_degrees != 0.0 {
        let (cx, cy) = img.rect.center();
        transform = transform.post_concat(Transform::from_rotate_at(
            img.rotation_degrees as f32,
            (cx * scale) as f32,
            (cy * scale) as f32,
        ));
    }

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
}

fn draw_selection(pixmap: &mut Pixmap, rect: &PageRect) {
    let mut paint = Paint::default();
    paint.set_color(selection_color());
    paint.anti_alias = true;

    if let Some(outline) = tiny_skia::Rect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    ) {
        let path = PathBuilder::from_rect(outline);
        let stroke = Stroke {
            width: SELECTION_STROKE_WIDTH,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    for handle in Handle::ALL {
        let (hx, hy) = handle.position(rect);
        let Some(marker) = tiny_skia::Rect::from_xywh(
            hx as f32 - HANDLE_MARKER_SIZE / 2.0,
            hy as f32 - HANDLE_MARKER_SIZE / 2.0,
            HANDLE_MARKER_SIZE,
            HANDLE_MARKER_SIZE,
        ) else {
            continue;
        };
        let path = PathBuilder::from_rect(marker);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Draw the caption centered on `center_x`, baseline at `baseline_y`.
/// Skipped silently when the host has no usable font.
fn draw_caption(pixmap: &mut Pixmap, text: &str, center_x: f32, baseline_y: f32) {
    let Some(font) = font::caption_font() else {
        return;
    };
    let scale = Scale::uniform(CAPTION_FONT_SIZE);

    let advance: f32 = font
        .layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);
    let start = rt_point(center_x - advance / 2.0, baseline_y);

    let width = pixmap.width();
    let height = pixmap.height();
    let color = caption_color();

    for glyph in font.layout(text, scale, start) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let px = gx as i32 + bb.min.x;
            let py = gy as i32 + bb.min.y;
            if px < 0 || px >= width as i32 || py < 0 || py >= height as i32 {
                return;
            }
            let a = (v * 255.0) as u32;
            if a == 0 {
                return;
            }
            // Source-over onto the opaque page
            let idx = ((py as u32 * width + px as u32) * 4) as usize;
            let pixel = &mut pixmap.data_mut()[idx..idx + 4];
            pixel[0] = ((color.red() as u32 * a + pixel[0] as u32 * (255 - a)) / 255) as u8;
            pixel[1] = ((color.green() as u32 * a + pixel[1] as u32 * (255 - a)) / 255) as u8;
            pixel[2] = ((color.blue() as u32 * a + pixel[2] as u32 * (255 - a)) / 255) as u8;
            pixel[3] = 255;
        });
    }
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
