//! # Collision / Interaction System
//!
//! Tracks which pairs of collidable entities currently overlap and emits
//! exactly one event at each transition: start/end for solid pairs,
//! enter/exit for pairs involving a trigger zone.
//!
//! All state is owned by the [`InteractionSystem`] value - two packed
//! stores of active pairs plus their key maps and the event bus. Separate
//! worlds get separate instances; nothing is process-global.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use termweave_shared::constants::PAIR_KEY_BOUND;
use termweave_shared::events::{EventKind, InteractionEvent};
use termweave_shared::geometry::Rect;

use crate::ecs::{Collider, EntityId, Position, Query, World};
use crate::error::CoreError;
use crate::packed::{PackedStore, StoreHandle};

use super::bus::EventBus;

/// Geometric overlap predicate, pluggable per system instance.
///
/// The default tests rectangle intersection; widgets with exotic shapes
/// (ragged text regions, circular gauges) substitute their own.
pub type CollisionTest = fn(Rect, Rect) -> bool;

/// A currently overlapping pair, normalized so `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivePair {
    /// Lower entity index.
    pub a: u32,
    /// Higher entity index.
    pub b: u32,
}

impl ActivePair {
    /// Checks whether an entity index participates in the pair.
    #[inline]
    #[must_use]
    pub const fn involves(self, index: u32) -> bool {
        self.a == index || self.b == index
    }

    /// The other participant, if `index` is one of the two.
    #[inline]
    #[must_use]
    pub const fn partner_of(self, index: u32) -> Option<u32> {
        if self.a == index {
            Some(self.b)
        } else if self.b == index {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Encodes an unordered entity pair into one collision-free u64 key.
///
/// The pair is normalized (`min * 2^26 + max`), so both orders of the
/// same two indices produce the same key.
///
/// # Errors
///
/// [`CoreError::PairKeyOverflow`] if either index is at or above 2^26 -
/// the encoding stops being unique there, and silent key collisions would
/// corrupt pair tracking.
pub fn pair_key(a: u32, b: u32) -> Result<u64, CoreError> {
    let (lo, hi) = (a.min(b), a.max(b));
    if u64::from(hi) >= PAIR_KEY_BOUND {
        return Err(CoreError::PairKeyOverflow { index: hi });
    }
    Ok(u64::from(lo) * PAIR_KEY_BOUND + u64::from(hi))
}

/// Stateful pair tracker over a world's Position + Collider entities.
///
/// # Per-tick algorithm
///
/// 1. Query entities carrying both components.
/// 2. Broad phase: every ordered pair `i < j`, filtered by layer/mask,
///    then by the geometric predicate. Intentionally O(n²) - terminal
///    UIs put hundreds of colliders on screen, not millions, and the
///    constant factor of anything cleverer costs more than it saves at
///    that scale.
/// 3. Newly overlapping pairs go into the matching packed store and fire
///    their start/enter event; pairs seen again fire nothing.
/// 4. Previously active pairs not detected this tick are removed
///    (backward scan over the dense array, swap-and-pop safe) and fire
///    their end/exit event.
///
/// A despawned entity drops out of the query, so its active pairs end on
/// the next tick through the ordinary exit path.
pub struct InteractionSystem {
    /// Active solid pairs.
    solid: PackedStore<ActivePair>,
    /// Active trigger pairs.
    triggers: PackedStore<ActivePair>,
    /// Pair key -> handle into `solid`.
    solid_handles: HashMap<u64, StoreHandle>,
    /// Pair key -> handle into `triggers`.
    trigger_handles: HashMap<u64, StoreHandle>,
    /// Scratch: solid keys detected this tick. Reused across ticks.
    detected_solid: HashSet<u64>,
    /// Scratch: trigger keys detected this tick.
    detected_trigger: HashSet<u64>,
    /// The geometric overlap predicate.
    test: CollisionTest,
    /// Listener dispatch.
    bus: EventBus,
}

impl InteractionSystem {
    /// Creates a system with the default rectangle-overlap predicate.
    #[must_use]
    pub fn new() -> Self {
        Self::with_test(Rect::intersects)
    }

    /// Creates a system with a custom overlap predicate.
    #[must_use]
    pub fn with_test(test: CollisionTest) -> Self {
        Self {
            solid: PackedStore::new(),
            triggers: PackedStore::new(),
            solid_handles: HashMap::new(),
            trigger_handles: HashMap::new(),
            detected_solid: HashSet::new(),
            detected_trigger: HashSet::new(),
            test,
            bus: EventBus::new(),
        }
    }

    /// Subscribes a listener to one event kind.
    pub fn subscribe<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&InteractionEvent) + 'static,
    {
        self.bus.subscribe(kind, listener);
    }

    /// Direct access to the event bus.
    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    /// Runs one detection pass over the world.
    ///
    /// # Errors
    ///
    /// [`CoreError::PairKeyOverflow`] if a participating entity index is
    /// at or above 2^26.
    pub fn tick(&mut self, world: &mut World) -> Result<(), CoreError> {
        self.detected_solid.clear();
        self.detected_trigger.clear();

        let query = Query::new().with::<Position>().with::<Collider>();
        let ids = world.query(&query);

        // Broad phase: ordered pairs over the stable query sequence.
        for (i, &id_a) in ids.iter().enumerate() {
            let Some(&pos_a) = world.get::<Position>(id_a) else {
                continue;
            };
            let Some(&col_a) = world.get::<Collider>(id_a) else {
                continue;
            };
            let bounds_a = col_a.bounds(pos_a);

            for &id_b in &ids[i + 1..] {
                let Some(&pos_b) = world.get::<Position>(id_b) else {
                    continue;
                };
                let Some(&col_b) = world.get::<Collider>(id_b) else {
                    continue;
                };

                if !col_a.can_interact(col_b) {
                    continue;
                }
                if !(self.test)(bounds_a, col_b.bounds(pos_b)) {
                    continue;
                }

                let trigger = col_a.is_trigger() || col_b.is_trigger();
                let key = pair_key(id_a.index(), id_b.index())?;
                let pair = ActivePair {
                    a: id_a.index().min(id_b.index()),
                    b: id_a.index().max(id_b.index()),
                };

                if trigger {
                    self.detected_trigger.insert(key);
                    if !self.trigger_handles.contains_key(&key) {
                        let handle = self.triggers.add(pair);
                        self.trigger_handles.insert(key, handle);
                        trace!(a = pair.a, b = pair.b, "trigger enter");
                        self.bus.emit(&InteractionEvent::new(
                            EventKind::TriggerEnter,
                            pair.a,
                            pair.b,
                        ));
                    }
                } else {
                    self.detected_solid.insert(key);
                    if !self.solid_handles.contains_key(&key) {
                        let handle = self.solid.add(pair);
                        self.solid_handles.insert(key, handle);
                        trace!(a = pair.a, b = pair.b, "collision start");
                        self.bus.emit(&InteractionEvent::new(
                            EventKind::CollisionStart,
                            pair.a,
                            pair.b,
                        ));
                    }
                }
            }
        }

        // Exit pass: drop active pairs that were not detected this tick.
        // Backward over the dense arrays - removal swap-and-pops.
        for dense in (0..self.solid.len()).rev() {
            let pair = self.solid.data()[dense];
            let key = u64::from(pair.a) * PAIR_KEY_BOUND + u64::from(pair.b);
            if self.detected_solid.contains(&key) {
                continue;
            }
            let handle = self
                .solid
                .handle_at(dense)
                .ok_or(CoreError::InvalidHandle)?;
            self.solid.remove(handle)?;
            self.solid_handles.remove(&key);
            trace!(a = pair.a, b = pair.b, "collision end");
            self.bus
                .emit(&InteractionEvent::new(EventKind::CollisionEnd, pair.a, pair.b));
        }

        for dense in (0..self.triggers.len()).rev() {
            let pair = self.triggers.data()[dense];
            let key = u64::from(pair.a) * PAIR_KEY_BOUND + u64::from(pair.b);
            if self.detected_trigger.contains(&key) {
                continue;
            }
            let handle = self
                .triggers
                .handle_at(dense)
                .ok_or(CoreError::InvalidHandle)?;
            self.triggers.remove(handle)?;
            self.trigger_handles.remove(&key);
            trace!(a = pair.a, b = pair.b, "trigger exit");
            self.bus
                .emit(&InteractionEvent::new(EventKind::TriggerExit, pair.a, pair.b));
        }

        Ok(())
    }

    // =========================================================================
    // Queries over the active pair sets
    // =========================================================================

    /// Checks whether an entity is in any active solid collision.
    #[must_use]
    pub fn is_colliding(&self, id: EntityId) -> bool {
        self.solid
            .data()
            .iter()
            .any(|pair| pair.involves(id.index()))
    }

    /// Checks whether an entity is inside any active trigger pair.
    #[must_use]
    pub fn is_in_trigger(&self, id: EntityId) -> bool {
        self.triggers
            .data()
            .iter()
            .any(|pair| pair.involves(id.index()))
    }

    /// Entity indices currently in solid collision with `id`.
    #[must_use]
    pub fn colliding_entities(&self, id: EntityId) -> Vec<u32> {
        self.solid
            .data()
            .iter()
            .filter_map(|pair| pair.partner_of(id.index()))
            .collect()
    }

    /// Entity indices currently in a trigger pair with `id`.
    #[must_use]
    pub fn trigger_zones(&self, id: EntityId) -> Vec<u32> {
        self.triggers
            .data()
            .iter()
            .filter_map(|pair| pair.partner_of(id.index()))
            .collect()
    }

    /// Checks whether two entities are in active solid collision with
    /// each other.
    #[must_use]
    pub fn are_colliding(&self, a: EntityId, b: EntityId) -> bool {
        pair_key(a.index(), b.index())
            .is_ok_and(|key| self.solid_handles.contains_key(&key))
    }

    /// Number of active solid pairs.
    #[must_use]
    pub fn solid_pair_count(&self) -> usize {
        self.solid.len()
    }

    /// Number of active trigger pairs.
    #[must_use]
    pub fn trigger_pair_count(&self) -> usize {
        self.triggers.len()
    }

    /// Drops all active pairs without emitting events. Listeners stay
    /// subscribed. Intended for test isolation and world resets.
    pub fn reset(&mut self) {
        self.solid.clear();
        self.triggers.clear();
        self.solid_handles.clear();
        self.trigger_handles.clear();
        self.detected_solid.clear();
        self.detected_trigger.clear();
    }
}

impl Default for InteractionSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_is_order_independent() {
        assert_eq!(pair_key(3, 9).unwrap(), pair_key(9, 3).unwrap());
    }

    #[test]
    fn test_pair_key_distinct_for_distinct_pairs() {
        let keys = [
            pair_key(0, 1).unwrap(),
            pair_key(0, 2).unwrap(),
            pair_key(1, 2).unwrap(),
            pair_key(1, 3).unwrap(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_pair_key_adjacent_encodings_do_not_collide() {
        // (a, max) and (a + 1, 0) sit next to each other in key space.
        let max = (PAIR_KEY_BOUND - 1) as u32;
        assert_ne!(pair_key(1, max).unwrap(), pair_key(2, 2).unwrap());
        assert!(pair_key(1, max).unwrap() < pair_key(2, 2).unwrap());
    }

    #[test]
    fn test_pair_key_rejects_out_of_range_index() {
        let bound = PAIR_KEY_BOUND as u32;
        assert_eq!(
            pair_key(bound, 1),
            Err(CoreError::PairKeyOverflow { index: bound })
        );
        assert_eq!(
            pair_key(1, bound + 5),
            Err(CoreError::PairKeyOverflow { index: bound + 5 })
        );
        assert!(pair_key(bound - 1, 0).is_ok());
    }

    #[test]
    fn test_active_pair_partner() {
        let pair = ActivePair { a: 2, b: 7 };
        assert_eq!(pair.partner_of(2), Some(7));
        assert_eq!(pair.partner_of(7), Some(2));
        assert_eq!(pair.partner_of(4), None);
    }
}
