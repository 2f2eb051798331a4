//! # Component Storage
//!
//! One pre-allocated parallel array per component type, one slot per
//! entity index. Presence lives in the entity's bitmask, not here: a slot
//! always exists, it just may not mean anything until the bit is set.

use std::any::Any;

use super::component::Component;

/// Pre-allocated storage for a single component type.
///
/// Guarantees:
/// - Zero allocations after construction
/// - O(1) access by entity index
/// - Contiguous memory for cache-friendly system iteration
pub struct ComponentStorage<C: Component> {
    /// The dense array of component slots.
    data: Box<[C]>,
}

impl<C: Component> ComponentStorage<C> {
    /// Creates storage with one default-initialized slot per entity index.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        Self {
            data: vec![C::default(); capacity].into_boxed_slice(),
        }
    }

    /// Returns the number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Gets the slot for an entity index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&C> {
        self.data.get(index)
    }

    /// Gets the slot for an entity index, mutably.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C> {
        self.data.get_mut(index)
    }

    /// Overwrites the slot at `index`.
    ///
    /// Returns `false` if the index is out of bounds.
    #[inline]
    pub fn set(&mut self, index: usize, component: C) -> bool {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = component;
            true
        } else {
            false
        }
    }

    /// Returns the whole array as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Returns the whole array as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.data
    }
}

/// Object-safe view of a storage, for the world's per-type storage table.
///
/// The world cannot name every component type (widget crates add their
/// own), so it holds storages behind this trait and downcasts on typed
/// access.
pub trait AnyStorage {
    /// Resets one slot to the component's default value.
    fn reset_slot(&mut self, index: usize);

    /// Resets every slot to the component's default value.
    fn clear(&mut self);

    /// Upcast for downcasting to the concrete `ComponentStorage<C>`.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Component> AnyStorage for ComponentStorage<C> {
    fn reset_slot(&mut self, index: usize) {
        if let Some(slot) = self.data.get_mut(index) {
            *slot = C::default();
        }
    }

    fn clear(&mut self) {
        for slot in self.data.iter_mut() {
            *slot = C::default();
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
