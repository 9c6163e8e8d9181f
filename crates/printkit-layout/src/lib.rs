//! # PrintKit Layout
//!
//! This crate provides the A4 page layout engine: an in-memory scene of
//! placed raster images, the pointer-driven manipulation state machine,
//! and the deterministic render/export pipeline.
//!
//! ## Core Components
//!
//! ### Scene
//! - **PlacedImage**: A decoded bitmap with a page rect and stable id
//! - **Scene**: Ordered element store; list order is z-order; at most
//!   one element is selected, tracked by id
//!
//! ### Manipulation
//! - **PointerController**: Idle / Dragging / Resizing state machine
//! - **Hit-testing**: Selection handles first (circular radius), then
//!   the element stack front to back
//! - **Resize**: Aspect-preserving, opposite edge fixed, 50px floor,
//!   ratio-preserving page clamp afterwards
//!
//! ### Output
//! - **Renderer**: Full-scene redraw with page decoration and selection
//!   markers
//! - **Export**: Fresh high-DPI surface, decoration-free, encoded to
//!   PNG / JPEG / WebP
//! - **Print**: Millimeter-space document rendered to self-contained HTML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use printkit_layout::{PointerController, PointerEvent, Scene};
//!
//! let mut scene = Scene::new();
//! let id = scene.add_image(buffer, "photo.jpg")?;
//!
//! let mut pointer = PointerController::new();
//! pointer.dispatch(&mut scene, PointerEvent::Down { x: 400.0, y: 560.0 });
//! pointer.dispatch(&mut scene, PointerEvent::Move { x: 420.0, y: 580.0 });
//! pointer.dispatch(&mut scene, PointerEvent::Up);
//!
//! let frame = printkit_layout::render_scene(&scene);
//! ```

pub mod export;
pub mod font;
pub mod interaction;
pub mod model;
pub mod print;
pub mod render;
pub mod scene;

pub use export::{default_artifact_name, export_page, export_page_to_file, ExportOptions};
pub use interaction::{
    hit_test_handle, hit_test_image, CursorHint, Handle, ManipulationState, PointerController,
    PointerEvent,
};
pub use model::PlacedImage;
pub use print::{print_document, PrintDocument, PrintImage};
pub use render::{render_page_at_scale, render_scene, HANDLE_MARKER_SIZE};
pub use scene::{Scene, SceneSummary, SelectedInfo};
