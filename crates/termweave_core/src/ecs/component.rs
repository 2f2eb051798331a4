//! # Component Types
//!
//! Components are pure data, one fixed-size record per entity slot.
//! Widget crates define their own component types against the same trait;
//! the core owns only the types its built-in systems read.

use bytemuck::{Pod, Zeroable};
use termweave_shared::geometry::Rect;

/// Marker trait for component types.
///
/// Components must be:
/// - `Copy` + `Pod` + `Zeroable`: bitwise-copyable plain data, so storages
///   can be pre-allocated as boxed slices
/// - `Default`: the value a freshly attached component is initialized to
///
/// # Component ids
///
/// `ID` indexes the per-entity presence bitmask and the world's storage
/// table, so it must be unique across all component types used with one
/// world and below 64. The core reserves ids 0-7; widget crates allocate
/// upward from 8.
pub trait Component: Copy + Pod + Zeroable + Default + 'static {
    /// Unique identifier for this component type (0-63).
    const ID: u8;
}

/// Number of component type slots a world can register.
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Position of an element on the cell grid.
///
/// Kept fractional: animated elements glide between cells and only the
/// renderer snaps to whole cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    /// Column, in cells.
    pub x: f32,
    /// Row, in cells.
    pub y: f32,
}

impl Component for Position {
    const ID: u8 = 0;
}

impl Position {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Movement speed of an element, in cells per second.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// Horizontal speed.
    pub x: f32,
    /// Vertical speed.
    pub y: f32,
}

impl Component for Velocity {
    const ID: u8 = 1;
}

impl Velocity {
    /// Creates a new velocity.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Collision volume of an element.
///
/// The volume is a rectangle of `width` x `height` cells, offset from the
/// entity's [`Position`] by `offset_x`/`offset_y`. Layer and mask gate
/// which pairs may interact at all: two colliders interact only if each
/// one's layer intersects the other's mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Collider {
    /// Volume width, in cells.
    pub width: f32,
    /// Volume height, in cells.
    pub height: f32,
    /// Horizontal offset from the entity position.
    pub offset_x: f32,
    /// Vertical offset from the entity position.
    pub offset_y: f32,
    /// Which layers this collider lives on (bitmask).
    pub layer: u32,
    /// Which layers this collider interacts with (bitmask).
    pub mask: u32,
    /// Behavior flags, see [`Collider::TRIGGER`].
    pub flags: u32,
}

impl Component for Collider {
    const ID: u8 = 2;
}

impl Collider {
    /// Flag bit: this collider is a trigger zone. Pairs involving a
    /// trigger report enter/exit instead of collision start/end.
    pub const TRIGGER: u32 = 1;

    /// Creates a solid collider on layer 1 interacting with everything.
    #[inline]
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset_x: 0.0,
            offset_y: 0.0,
            layer: 1,
            mask: u32::MAX,
            flags: 0,
        }
    }

    /// Returns a copy marked as a trigger zone.
    #[inline]
    #[must_use]
    pub const fn trigger(mut self) -> Self {
        self.flags |= Self::TRIGGER;
        self
    }

    /// Returns a copy placed on the given layer bitmask.
    #[inline]
    #[must_use]
    pub const fn on_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// Returns a copy interacting only with the given layer bitmask.
    #[inline]
    #[must_use]
    pub const fn with_mask(mut self, mask: u32) -> Self {
        self.mask = mask;
        self
    }

    /// Checks the trigger flag.
    #[inline]
    #[must_use]
    pub const fn is_trigger(self) -> bool {
        (self.flags & Self::TRIGGER) != 0
    }

    /// Checks whether layer/mask rules allow this collider and another
    /// to interact. The filter is symmetric by construction.
    #[inline]
    #[must_use]
    pub const fn can_interact(self, other: Self) -> bool {
        (self.layer & other.mask) != 0 && (other.layer & self.mask) != 0
    }

    /// Returns the world-space bounds for an entity at `position`.
    #[inline]
    #[must_use]
    pub fn bounds(self, position: Position) -> Rect {
        Rect::new(
            position.x + self.offset_x,
            position.y + self.offset_y,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_component_ids_are_distinct() {
        assert_ne!(Position::ID, Velocity::ID);
        assert_ne!(Velocity::ID, Collider::ID);
        assert_ne!(Position::ID, Collider::ID);
    }

    #[test]
    fn test_collider_bounds_applies_offset() {
        let collider = Collider {
            offset_x: 1.0,
            offset_y: 2.0,
            ..Collider::new(4.0, 3.0)
        };
        let bounds = collider.bounds(Position::new(10.0, 20.0));
        assert_eq!(bounds, Rect::new(11.0, 22.0, 4.0, 3.0));
    }

    #[test]
    fn test_collider_layer_filter() {
        let a = Collider::new(1.0, 1.0).on_layer(0b01).with_mask(0b10);
        let b = Collider::new(1.0, 1.0).on_layer(0b10).with_mask(0b01);
        assert!(a.can_interact(b));

        let c = Collider::new(1.0, 1.0).on_layer(0b100).with_mask(0b100);
        assert!(!a.can_interact(c));
        assert!(!c.can_interact(a));
    }

    #[test]
    fn test_collider_trigger_flag() {
        assert!(!Collider::new(1.0, 1.0).is_trigger());
        assert!(Collider::new(1.0, 1.0).trigger().is_trigger());
    }
}
