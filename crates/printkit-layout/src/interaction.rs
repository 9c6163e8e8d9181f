//! Pointer hit-testing and the drag/resize state machine.
//!
//! A gesture is interpreted against the scene in a fixed order: the
//! selected element's resize handles first, then the element stack from
//! front to back. The transient gesture state lives in
//! [`PointerController`] and is torn down on every exit path, including
//! the pointer leaving the page.

use crate::scene::Scene;
use printkit_core::constants::{HANDLE_HIT_RADIUS, MIN_IMAGE_SIZE};
use printkit_core::{
    clamp_position, clamp_to_bounds, distance, Rect, PAGE_HEIGHT_PX, PAGE_WIDTH_PX,
};
use std::fmt;

/// One of the eight resize handles on the selected element's boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
    North,
    South,
    West,
    East,
}

impl Handle {
    /// All handles in probe order. The first handle within the hit
    /// radius wins, which keeps overlapping probes deterministic.
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::NorthEast,
        Handle::SouthWest,
        Handle::SouthEast,
        Handle::North,
        Handle::South,
        Handle::West,
        Handle::East,
    ];

    /// Hit-test position of this handle on a rect boundary.
    pub fn position(&self, rect: &Rect) -> (f64, f64) {
        match self {
            Handle::NorthWest => (rect.x, rect.y),
            Handle::NorthEast => (rect.right(), rect.y),
            Handle::SouthWest => (rect.x, rect.bottom()),
            Handle::SouthEast => (rect.right(), rect.bottom()),
            Handle::North => (rect.x + rect.width / 2.0, rect.y),
            Handle::South => (rect.x + rect.width / 2.0, rect.bottom()),
            Handle::West => (rect.x, rect.y + rect.height / 2.0),
            Handle::East => (rect.right(), rect.y + rect.height / 2.0),
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Handle::NorthWest => "nw",
            Handle::NorthEast => "ne",
            Handle::SouthWest => "sw",
            Handle::SouthEast => "se",
            Handle::North => "n",
            Handle::South => "s",
            Handle::West => "w",
            Handle::East => "e",
        };
        write!(f, "{}", name)
    }
}

/// Current gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ManipulationState {
    #[default]
    Idle,
    /// Moving the selected element; the offset is pointer minus element
    /// origin, captured at gesture start.
    Dragging { offset_x: f64, offset_y: f64 },
    /// Resizing the selected element via one handle.
    Resizing { handle: Handle },
}

/// Discrete pointer input driving the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
}

/// Non-authoritative hover feedback, derived from the same hit-test the
/// state machine uses. Purely observational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Move,
    Resize(Handle),
}

impl fmt::Display for CursorHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorHint::Default => write!(f, "default"),
            CursorHint::Move => write!(f, "move"),
            CursorHint::Resize(handle) => write!(f, "{}-resize", handle),
        }
    }
}

/// Interprets pointer events against a scene.
///
/// Holds only the transient gesture session. Both `Dragging` and
/// `Resizing` return to `Idle` on pointer-up or pointer-leave,
/// unconditionally; there is no failure state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerController {
    state: ManipulationState,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ManipulationState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ManipulationState::Idle
    }

    /// Single dispatch entry point mapping pointer input to a state
    /// transition. Input binding stays decoupled from the machine.
    pub fn dispatch(&mut self, scene: &mut Scene, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => self.pointer_down(scene, x, y),
            PointerEvent::Move { x, y } => self.pointer_move(scene, x, y),
            PointerEvent::Up => self.pointer_up(),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    /// Begins a gesture: resize when a handle of the selected element is
    /// hit, drag when an element body is hit (selecting it), otherwise
    /// clears the selection.
    pub fn pointer_down(&mut self, scene: &mut Scene, x: f64, y: f64) {
        if let Some(handle) = hit_test_handle(scene, x, y) {
            self.state = ManipulationState::Resizing { handle };
            return;
        }

        if let Some(id) = hit_test_image(scene, x, y) {
            scene.select(id);
            // select() guarantees the element exists
            if let Some(img) = scene.selected() {
                self.state = ManipulationState::Dragging {
                    offset_x: x - img.rect.x,
                    offset_y: y - img.rect.y,
                };
            }
        } else {
            scene.deselect_all();
            self.state = ManipulationState::Idle;
        }
    }

    /// Advances the active gesture. Does nothing when idle.
    pub fn pointer_move(&mut self, scene: &mut Scene, x: f64, y: f64) {
        match self.state {
            ManipulationState::Resizing { handle } => {
                resize_selected(scene, handle, x, y);
            }
            ManipulationState::Dragging { offset_x, offset_y } => {
                drag_selected(scene, x - offset_x, y - offset_y);
            }
            ManipulationState::Idle => {}
        }
    }

    /// Ends the gesture.
    pub fn pointer_up(&mut self) {
        self.state = ManipulationState::Idle;
    }

    /// Ends the gesture when the pointer leaves the page surface.
    /// Identical to pointer-up; a gesture never survives its pointer.
    pub fn pointer_leave(&mut self) {
        self.state = ManipulationState::Idle;
    }

    /// Hover feedback for the given position.
    pub fn cursor_hint(&self, scene: &Scene, x: f64, y: f64) -> CursorHint {
        if let Some(handle) = hit_test_handle(scene, x, y) {
            CursorHint::Resize(handle)
        } else if hit_test_image(scene, x, y).is_some() {
            CursorHint::Move
        } else {
            CursorHint::Default
        }
    }
}

/// Tests the selected element's handles, circular radius of
/// `HANDLE_HIT_RADIUS` around each probe point. Only a hit literally
/// within the radius counts; there is no nearest-overall fallback.
pub fn hit_test_handle(scene: &Scene, x: f64, y: f64) -> Option<Handle> {
    let selected = scene.selected()?;
    Handle::ALL.into_iter().find(|handle| {
        let (hx, hy) = handle.position(&selected.rect);
        distance(x, y, hx, hy) <= HANDLE_HIT_RADIUS
    })
}

/// Tests the element stack front to back (reverse draw order); the
/// first bounding box containing the point wins. Overlaps resolve by
/// z-order alone.
pub fn hit_test_image(scene: &Scene, x: f64, y: f64) -> Option<u64> {
    scene
        .images()
        .iter()
        .rev()
        .find(|img| img.contains(x, y))
        .map(|img| img.id)
}

/// Moves the selected element so its origin tracks the pointer, then
/// clamps the position onto the page.
fn drag_selected(scene: &mut Scene, new_x: f64, new_y: f64) {
    let Some(img) = scene.selected_mut() else {
        return;
    };
    img.rect.x = new_x;
    img.rect.y = new_y;
    img.rect = clamp_position(img.rect, PAGE_WIDTH_PX, PAGE_HEIGHT_PX);
}

/// Resizes the selected element toward the pointer.
///
/// The handle decides which edges move; the opposite edges stay fixed.
/// The driven dimension is floored at `MIN_IMAGE_SIZE` and the other
/// dimension follows from the aspect ratio. Any page overflow is then
/// corrected with the same ratio-preserving clamp used everywhere else,
/// which may shrink the element further.
fn resize_selected(scene: &mut Scene, handle: Handle, x: f64, y: f64) {
    let Some(img) = scene.selected_mut() else {
        return;
    };

    let aspect = img.rect.aspect_ratio();
    let right = img.rect.right();
    let bottom = img.rect.bottom();
    let r = &mut img.rect;

    match handle {
        Handle::SouthEast => {
            r.width = (x - r.x).max(MIN_IMAGE_SIZE);
            r.height = r.width / aspect;
        }
        Handle::SouthWest => {
            let width = (right - x).max(MIN_IMAGE_SIZE);
            r.x = right - width;
            r.width = width;
            r.height = width / aspect;
        }
        Handle::NorthEast => {
            let width = (x - r.x).max(MIN_IMAGE_SIZE);
            let height = width / aspect;
            r.y = bottom - height;
            r.width = width;
            r.height = height;
        }
        Handle::NorthWest => {
            let width = (right - x).max(MIN_IMAGE_SIZE);
            let height = width / aspect;
            r.x = right - width;
            r.y = bottom - height;
            r.width = width;
            r.height = height;
        }
        Handle::North => {
            let height = (bottom - y).max(MIN_IMAGE_SIZE);
            r.y = bottom - height;
            r.height = height;
            r.width = height * aspect;
        }
        Handle::South => {
            r.height = (y - r.y).max(MIN_IMAGE_SIZE);
            r.width = r.height * aspect;
        }
        Handle::West => {
            let width = (right - x).max(MIN_IMAGE_SIZE);
            r.x = right - width;
            r.width = width;
            r.height = width / aspect;
        }
        Handle::East => {
            r.width = (x - r.x).max(MIN_IMAGE_SIZE);
            r.height = r.width / aspect;
        }
    }

    img.rect = clamp_to_bounds(img.rect, PAGE_WIDTH_PX, PAGE_HEIGHT_PX);
}
