//! Page scene: the ordered collection of placed images and the selection.
//!
//! Element order is z-order, back to front; there is no separate z field.
//! The scene is the only writer of its elements. Mutations are synchronous
//! and never trigger rendering themselves; callers redraw afterwards.

use crate::model::PlacedImage;
use image::RgbaImage;
use printkit_core::constants::{CASCADE_STEP, INITIAL_FIT_FRACTION};
use printkit_core::error::ImageError;
use printkit_core::{
    clamp_position, fit_within, page_x_to_mm, page_y_to_mm, LoadedImage, Rect, Result,
    PAGE_HEIGHT_PX, PAGE_WIDTH_PX,
};
use std::fmt;

/// Human-readable scene state, mirrored to callers after every mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub image_count: usize,
    /// Name and printed size of the selection, when one exists.
    pub selected: Option<SelectedInfo>,
}

/// Printed size of the selected element.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedInfo {
    pub name: String,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.image_count == 1 { "" } else { "s" };
        write!(f, "{} image{} on canvas", self.image_count, plural)?;
        match &self.selected {
            Some(info) => write!(
                f,
                "; selected: {} ({:.1}x{:.1}mm)",
                info.name, info.width_mm, info.height_mm
            ),
            None => write!(f, "; no image selected"),
        }
    }
}

/// The A4 page scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    images: Vec<PlacedImage>,
    selected_id: Option<u64>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a decoded bitmap onto the page and selects it.
    ///
    /// Initial size fits the source within one third of each page axis.
    /// The position is the page center staggered by a constant cascade
    /// offset per already-present image, so successive additions do not
    /// overlap exactly; the final rect is clamped onto the page.
    pub fn add_image(&mut self, buffer: RgbaImage, name: impl Into<String>) -> Result<u64> {
        let name = name.into();
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(ImageError::EmptyImage { name }.into());
        }

        let size = fit_within(
            buffer.width() as f64,
            buffer.height() as f64,
            PAGE_WIDTH_PX * INITIAL_FIT_FRACTION,
            PAGE_HEIGHT_PX * INITIAL_FIT_FRACTION,
        );

        let offset = self.images.len() as f64 * CASCADE_STEP;
        let rect = Rect::new(
            (PAGE_WIDTH_PX - size.width) / 2.0 + offset,
            (PAGE_HEIGHT_PX - size.height) / 2.0 + offset,
            size.width,
            size.height,
        );
        let rect = clamp_position(rect, PAGE_WIDTH_PX, PAGE_HEIGHT_PX);

        let id = self.generate_id();
        self.images.push(PlacedImage::new(id, name, buffer, rect));
        self.select(id);
        Ok(id)
    }

    /// Places a loaded file onto the page, keeping its source path for
    /// print documents.
    pub fn add_loaded(&mut self, loaded: LoadedImage) -> Result<u64> {
        let id = self.add_image(loaded.buffer, loaded.name)?;
        if let Some(img) = self.images.iter_mut().find(|img| img.id == id) {
            img.source = loaded.source;
        }
        Ok(id)
    }

    fn generate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Selects an element by id, clearing any prior selection.
    pub fn select(&mut self, id: u64) -> bool {
        if !self.images.iter().any(|img| img.id == id) {
            return false;
        }
        for img in &mut self.images {
            img.selected = img.id == id;
        }
        self.selected_id = Some(id);
        true
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        for img in &mut self.images {
            img.selected = false;
        }
        self.selected_id = None;
    }

    /// Removes an element by id. Selection becomes none if it pointed
    /// at the removed element.
    pub fn remove(&mut self, id: u64) -> bool {
        let Some(index) = self.images.iter().position(|img| img.id == id) else {
            return false;
        };
        self.images.remove(index);
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
        true
    }

    /// Moves an element to the end of the sequence (drawn last, on top).
    pub fn bring_to_front(&mut self, id: u64) -> bool {
        let Some(index) = self.images.iter().position(|img| img.id == id) else {
            return false;
        };
        let img = self.images.remove(index);
        self.images.push(img);
        true
    }

    /// Moves an element to the start of the sequence (drawn first, behind).
    pub fn send_to_back(&mut self, id: u64) -> bool {
        let Some(index) = self.images.iter().position(|img| img.id == id) else {
            return false;
        };
        let img = self.images.remove(index);
        self.images.insert(0, img);
        true
    }

    /// Removes every element and clears the selection.
    pub fn clear(&mut self) {
        self.images.clear();
        self.selected_id = None;
    }

    /// Elements in draw order, back to front.
    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    /// Element ids in draw order.
    pub fn image_ids(&self) -> Vec<u64> {
        self.images.iter().map(|img| img.id).collect()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// The selected element, when one exists.
    pub fn selected(&self) -> Option<&PlacedImage> {
        let id = self.selected_id?;
        self.images.iter().find(|img| img.id == id)
    }

    pub(crate) fn selected_mut(&mut self) -> Option<&mut PlacedImage> {
        let id = self.selected_id?;
        self.images.iter_mut().find(|img| img.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&PlacedImage> {
        self.images.iter().find(|img| img.id == id)
    }

    /// Image count plus the selection's printed size in millimeters.
    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            image_count: self.images.len(),
            selected: self.selected().map(|img| SelectedInfo {
                name: img.name.clone(),
                width_mm: page_x_to_mm(img.rect.width),
                height_mm: page_y_to_mm(img.rect.height),
            }),
        }
    }
}
