//! Interaction events emitted by the collision system.
//!
//! Events identify entities by their slot index, which is also what the
//! pair bookkeeping is keyed on. Listeners that hold on to an event across
//! frames must tolerate the slot having been recycled since.

use serde::{Deserialize, Serialize};

/// Event type discriminator.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Two solid colliders started overlapping.
    CollisionStart = 0,
    /// Two solid colliders stopped overlapping.
    CollisionEnd = 1,
    /// A collider entered a trigger zone.
    TriggerEnter = 2,
    /// A collider left a trigger zone.
    TriggerExit = 3,
}

impl EventKind {
    /// Number of event kinds (for per-kind listener tables).
    pub const COUNT: usize = 4;

    /// Returns the kind's table slot.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> usize {
        self as usize
    }
}

/// One interaction transition between two entities.
///
/// `entity_a` and `entity_b` are normalized so that `entity_a < entity_b`;
/// an unordered pair always reports the same way around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// What happened.
    pub kind: EventKind,
    /// Lower entity index of the pair.
    pub entity_a: u32,
    /// Higher entity index of the pair.
    pub entity_b: u32,
}

impl InteractionEvent {
    /// Creates a new event, normalizing the pair order.
    #[inline]
    #[must_use]
    pub fn new(kind: EventKind, a: u32, b: u32) -> Self {
        Self {
            kind,
            entity_a: a.min(b),
            entity_b: a.max(b),
        }
    }

    /// Checks whether the given entity index participates in this event.
    #[inline]
    #[must_use]
    pub const fn involves(self, index: u32) -> bool {
        self.entity_a == index || self.entity_b == index
    }
}
