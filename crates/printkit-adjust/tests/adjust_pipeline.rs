//! Integration tests for the adjustment document pipeline: crop baking,
//! transform and color passes through the document, export artifacts,
//! and the print path.

use image::{GenericImageView, Rgba, RgbaImage};
use printkit_adjust::{
    default_crop_rect, export_document, export_document_to_file, print_html, render,
    AdjustmentDocument, ColorAdjustments, ColorMode,
};
use printkit_core::{load_image, OutputFormat, Orientation, Rect};

/// 200x200 ramp where each pixel encodes its own coordinates.
fn coordinate_ramp() -> RgbaImage {
    RgbaImage::from_fn(200, 200, |x, y| Rgba([x as u8, y as u8, 0, 255]))
}

#[test]
fn test_crop_bakes_the_selected_region() {
    let mut doc = AdjustmentDocument::new("ramp.png", coordinate_ramp()).unwrap();
    doc.set_crop_rect(Rect::new(10.0, 10.0, 100.0, 100.0));
    doc.apply_crop();

    assert_eq!(doc.canvas_size(), (100, 100));
    assert_eq!(doc.working().dimensions(), (100, 100));
    assert_eq!(
        doc.working().get_pixel(0, 0).0,
        [10, 10, 0, 255],
        "The crop origin becomes the new top-left"
    );
    assert_eq!(doc.working().get_pixel(99, 99).0, [109, 109, 0, 255]);

    // The pristine source is untouched
    assert_eq!(doc.original().dimensions(), (200, 200));
    assert_eq!(doc.original().get_pixel(0, 0).0, [0, 0, 0, 255]);

    assert_eq!(doc.rotation_degrees(), 0.0);
    assert_eq!(
        doc.crop_rect(),
        default_crop_rect(100, 100),
        "The crop region resets for the next round"
    );
    assert!(
        render(&doc) == *doc.working(),
        "A freshly cropped document renders as its working buffer"
    );
}

#[test]
fn test_crop_then_reset_recovers_the_original() {
    let mut doc = AdjustmentDocument::new("ramp.png", coordinate_ramp()).unwrap();
    doc.set_crop_rect(Rect::new(50.0, 50.0, 80.0, 60.0));
    doc.apply_crop();
    assert_eq!(doc.canvas_size(), (80, 60));

    doc.reset();
    assert_eq!(doc.canvas_size(), (200, 200));
    assert!(doc.working() == doc.original());
    assert_eq!(doc.crop_rect(), default_crop_rect(200, 200));
}

#[test]
fn test_crop_preserves_color_mode() {
    let mut doc = AdjustmentDocument::new("ramp.png", coordinate_ramp()).unwrap();
    doc.set_color_mode(ColorMode::Grayscale);
    doc.set_crop_rect(Rect::new(10.0, 10.0, 100.0, 100.0));
    doc.apply_crop();

    assert_eq!(doc.color_mode(), ColorMode::Grayscale);
    let px = doc.working().get_pixel(0, 0).0;
    assert_eq!(px[0], px[1], "Baked pixels are already gray");
    assert_eq!(px[1], px[2]);
    // Re-running the remap over gray pixels changes nothing
    assert!(render(&doc) == *doc.working());
}

#[test]
fn test_rotation_bakes_into_the_crop() {
    // Horizontal strip, left half red, right half blue
    let strip = RgbaImage::from_fn(100, 40, |x, _| {
        if x < 50 {
            Rgba([220, 30, 30, 255])
        } else {
            Rgba([30, 30, 220, 255])
        }
    });
    let mut doc = AdjustmentDocument::new("strip.png", strip).unwrap();

    // A quarter turn leaves the canvas 100x40; only the middle band of
    // the upright strip stays visible
    doc.rotate_by(90.0);
    doc.set_crop_rect(Rect::new(30.0, 0.0, 40.0, 40.0));
    doc.apply_crop();

    assert_eq!(doc.canvas_size(), (40, 40));
    assert_eq!(doc.rotation_degrees(), 0.0, "The turn is baked in");

    // Clockwise: the red half ends up on top
    let top = doc.working().get_pixel(20, 5).0;
    let bottom = doc.working().get_pixel(20, 35).0;
    assert!(top[0] > 180 && top[2] < 80, "expected red on top, got {:?}", top);
    assert!(bottom[2] > 180 && bottom[0] < 80, "expected blue below, got {:?}", bottom);
    assert_eq!(top[3], 255);
}

#[test]
fn test_brightness_and_grayscale_through_the_document() {
    let src = RgbaImage::from_pixel(4, 4, Rgba([100, 150, 250, 200]));
    let mut doc = AdjustmentDocument::new("swatch.png", src).unwrap();
    doc.set_brightness(20);
    doc.set_color_mode(ColorMode::Grayscale);

    let out = render(&doc);
    // (120, 170, 255) weighs to 164.74, rounded up
    assert_eq!(out.get_pixel(2, 2).0, [165, 165, 165, 200]);
}

#[test]
fn test_auto_enhance_applies_and_clears() {
    let src = RgbaImage::from_pixel(4, 4, Rgba([100, 100, 100, 255]));
    let mut doc = AdjustmentDocument::new("swatch.png", src).unwrap();

    doc.auto_enhance();
    assert_eq!(*doc.adjustments(), ColorAdjustments::auto_enhance());
    let enhanced = render(&doc);
    // +10 brightness then 15% contrast scaling around 128
    assert_eq!(enhanced.get_pixel(0, 0).0, [108, 108, 108, 255]);

    doc.reset_adjustments();
    assert!(doc.adjustments().is_neutral());
    assert!(render(&doc) == *doc.working());
}

#[test]
fn test_export_document_encodes_the_cropped_canvas() {
    let mut doc = AdjustmentDocument::new("ramp.png", coordinate_ramp()).unwrap();
    doc.set_crop_rect(Rect::new(10.0, 10.0, 100.0, 100.0));
    doc.apply_crop();

    let png = export_document(&doc, OutputFormat::Png, 90).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!(decoded.dimensions(), (100, 100));

    let jpg = export_document(&doc, OutputFormat::Jpg, 80).unwrap();
    assert_eq!(&jpg[..2], &[0xFF, 0xD8], "JPEG magic");
}

#[test]
fn test_export_document_to_file_writes_a_decodable_artifact() {
    let doc = AdjustmentDocument::new("ramp.png", coordinate_ramp()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adjusted.png");

    export_document_to_file(&doc, OutputFormat::Png, 90, &path).unwrap();
    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.dimensions(), (200, 200));
}

#[test]
fn test_print_html_fits_the_cropped_image() {
    let mut doc = AdjustmentDocument::new("ramp.png", coordinate_ramp()).unwrap();
    doc.set_crop_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    doc.apply_crop();

    let html = print_html(&doc, Orientation::Portrait).unwrap();
    assert!(html.contains("@page { size: A4; margin: 0; }"));
    // A 100x100 canvas scales to the full 210mm width, centered vertically
    assert!(html.contains("width: 210.00mm; height: 210.00mm;"));
    assert!(html.contains("left: 0.00mm; top: 43.50mm;"));
    assert!(html.contains("data:image/png;base64,"));
}

#[test]
fn test_from_loaded_carries_source_metadata() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    RgbaImage::from_pixel(64, 48, Rgba([10, 20, 30, 255]))
        .save(&path)
        .unwrap();

    let loaded = load_image(&path).unwrap();
    let doc = AdjustmentDocument::from_loaded(loaded).unwrap();

    let info = doc.info();
    assert_eq!(info.name, "photo.png");
    assert_eq!((info.width, info.height), (64, 48));
    assert!(info.byte_size.is_some_and(|size| size > 0));
    assert!(format!("{}", info).starts_with("photo.png: 64 x 48 px"));
}
