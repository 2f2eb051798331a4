//! Cell-grid geometry used across the runtime.
//!
//! Coordinates are terminal cells, kept as `f32` because animated elements
//! move through fractional positions between frames. Rendering snaps to
//! whole cells; collision does not.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on the cell grid.
///
/// `x`/`y` is the top-left corner; `width`/`height` extend right and down
/// (screen coordinates, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Rect {
    /// Left edge, in cells.
    pub x: f32,
    /// Top edge, in cells.
    pub y: f32,
    /// Width, in cells.
    pub width: f32,
    /// Height, in cells.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Checks whether two rectangles overlap.
    ///
    /// Edges that merely touch do not count as overlap: two boxes sitting
    /// side by side in adjacent cells are not colliding.
    #[inline]
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Checks whether a point lies inside the rectangle.
    #[inline]
    #[must_use]
    pub fn contains(self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
