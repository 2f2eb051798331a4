//! # Entity Identifiers
//!
//! Every screen element (box, panel, list row, sprite) is an entity: an
//! index into the component storages plus a generation counter that detects
//! stale references after the slot has been recycled.

/// Unique identifier for an entity.
///
/// The id packs two values:
/// - Lower 32 bits: slot index into the component storages
/// - Upper 32 bits: generation counter, bumped on every reuse of the slot
///
/// A widget holding an id to a destroyed element can never accidentally
/// address whatever element was allocated into the same slot afterwards:
/// the generations differ and every lookup checks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates an entity id from slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the slot index portion of the id.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the id.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid entity id.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this id is the null id.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

/// One entity slot in the world.
///
/// Tracks liveness and which component types are attached via a bitmask
/// (one bit per component type, up to 64 types).
#[derive(Clone, Copy, Debug)]
pub struct Entity {
    /// The id currently occupying this slot.
    pub id: EntityId,
    /// Bitmask of attached component types.
    pub component_mask: u64,
    /// Whether the slot is currently alive.
    pub alive: bool,
}

impl Entity {
    /// Creates a live entity slot.
    #[inline]
    #[must_use]
    pub const fn new(id: EntityId) -> Self {
        Self {
            id,
            component_mask: 0,
            alive: true,
        }
    }

    /// Creates a dead/empty slot.
    #[inline]
    #[must_use]
    pub const fn dead() -> Self {
        Self {
            id: EntityId::NULL,
            component_mask: 0,
            alive: false,
        }
    }

    /// Checks if a component bit is set.
    #[inline]
    #[must_use]
    pub const fn has_component(self, component_id: u8) -> bool {
        (self.component_mask & (1 << component_id)) != 0
    }

    /// Sets a component bit.
    #[inline]
    pub fn add_component(&mut self, component_id: u8) {
        self.component_mask |= 1 << component_id;
    }

    /// Clears a component bit.
    #[inline]
    pub fn remove_component(&mut self, component_id: u8) {
        self.component_mask &= !(1 << component_id);
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::dead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_roundtrip() {
        let id = EntityId::new(4096, 77);
        assert_eq!(id.index(), 4096);
        assert_eq!(id.generation(), 77);
    }

    #[test]
    fn test_null_id() {
        assert!(EntityId::NULL.is_null());
        assert!(!EntityId::new(0, 0).is_null());
        assert!(EntityId::default().is_null());
    }

    #[test]
    fn test_component_mask() {
        let mut entity = Entity::new(EntityId::new(0, 1));
        assert!(!entity.has_component(12));

        entity.add_component(12);
        assert!(entity.has_component(12));

        entity.remove_component(12);
        assert!(!entity.has_component(12));
    }
}
