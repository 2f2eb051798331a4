//! # ECS World
//!
//! The composition root for one simulation: entity slots, the free list,
//! the per-type storage table and the frame clock. All memory is allocated
//! at creation (storages lazily on first registration of a type, which
//! widget factories do during setup, never per tick).

use tracing::debug;

use termweave_shared::constants::MAX_ENTITIES;

use super::component::{Component, MAX_COMPONENT_TYPES};
use super::entity::{Entity, EntityId};
use super::query::Query;
use super::storage::{AnyStorage, ComponentStorage};
use crate::error::CoreError;

/// Per-tick timing, stamped by the scheduler before any system runs.
///
/// Systems read this through [`World::delta_time`] instead of taking the
/// delta as a parameter, so helper functions composed inside a system all
/// see the same per-run value.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Monotonic tick counter, starts at 0 before the first run.
    pub tick: u64,
}

/// The ECS world - container for all runtime state of one simulation.
///
/// # Capacity
///
/// Fixed at creation; exceeding it is a hard error, not backpressure.
///
/// # Threading
///
/// Single-threaded by contract. Nothing here is locked; driving one world
/// from two threads is a precondition violation, not a checked error.
pub struct World {
    /// All entity slots (pre-allocated).
    entities: Box<[Entity]>,
    /// Free slot indices. Pre-filled in reverse so low indices issue first
    /// and recycled indices drain before fresh ones.
    free_indices: Vec<u32>,
    /// Number of currently alive entities.
    alive_count: usize,
    /// Fixed capacity.
    capacity: usize,
    /// Storage table, indexed by `Component::ID`.
    storages: Vec<Option<Box<dyn AnyStorage>>>,
    /// Timing for the tick currently executing.
    frame: FrameClock,
}

impl World {
    /// Creates a world with the given entity capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "capacity cannot exceed u32::MAX"
        );

        let entities = (0..capacity)
            .map(|_| Entity::dead())
            .collect::<Vec<_>>()
            .into_boxed_slice();
        let free_indices: Vec<u32> = (0..capacity as u32).rev().collect();

        let mut storages = Vec::with_capacity(MAX_COMPONENT_TYPES);
        storages.resize_with(MAX_COMPONENT_TYPES, || None);

        Self {
            entities,
            free_indices,
            alive_count: 0,
            capacity,
            storages,
            frame: FrameClock::default(),
        }
    }

    /// Returns the fixed capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of currently alive entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> usize {
        self.alive_count
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Spawns a new entity.
    ///
    /// Recycled slots are reused with a bumped generation, so ids handed
    /// out earlier for the same slot are permanently dead.
    ///
    /// # Errors
    ///
    /// [`CoreError::CapacityExhausted`] when no slot is free.
    pub fn spawn(&mut self) -> Result<EntityId, CoreError> {
        let Some(index) = self.free_indices.pop() else {
            return Err(CoreError::CapacityExhausted {
                capacity: self.capacity,
            });
        };

        let idx = index as usize;
        let slot = &mut self.entities[idx];
        let generation = slot.id.generation().wrapping_add(1);
        let id = EntityId::new(index, generation);

        *slot = Entity::new(id);
        self.alive_count += 1;
        Ok(id)
    }

    /// Despawns an entity, recycling its slot.
    ///
    /// Clears the presence mask and resets every registered storage slot
    /// to its default. Returns `false` for null, stale or already dead
    /// ids; despawning twice is harmless.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(idx) = self.live_index(id) else {
            return false;
        };

        let slot = &mut self.entities[idx];
        slot.alive = false;
        slot.component_mask = 0;
        self.alive_count -= 1;
        self.free_indices.push(id.index());

        for storage in self.storages.iter_mut().flatten() {
            storage.reset_slot(idx);
        }
        true
    }

    /// Checks whether an id refers to a live entity (generation included).
    #[inline]
    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.live_index(id).is_some()
    }

    /// Returns the entity slot for a live id.
    #[inline]
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.live_index(id).map(|idx| &self.entities[idx])
    }

    /// Resolves an id to its slot index, validating liveness + generation.
    fn live_index(&self, id: EntityId) -> Option<usize> {
        if id.is_null() {
            return None;
        }
        let idx = id.index() as usize;
        if idx >= self.capacity {
            return None;
        }
        let slot = &self.entities[idx];
        (slot.alive && slot.id.generation() == id.generation()).then_some(idx)
    }

    // =========================================================================
    // Component presence & data
    // =========================================================================

    /// Registers storage for component type `C`.
    ///
    /// Idempotent. Called implicitly by [`World::add_component`], so
    /// explicit registration is only needed for up-front allocation.
    ///
    /// # Panics
    ///
    /// Panics if a different component type was already registered under
    /// `C::ID` - ids must be unique per world.
    pub fn register<C: Component>(&mut self) {
        let _ = self.storage_entry::<C>();
    }

    /// Storage for `C`, registering it on first use.
    fn storage_entry<C: Component>(&mut self) -> &mut ComponentStorage<C> {
        let capacity = self.capacity;
        self.storages[C::ID as usize]
            .get_or_insert_with(|| Box::new(ComponentStorage::<C>::new(capacity)))
            .as_any_mut()
            .downcast_mut()
            .expect("two component types registered under the same id")
    }

    /// Attaches component `C` to an entity.
    ///
    /// Idempotent: if the component is already present the stored data is
    /// left untouched. On a fresh attach the slot is reset to
    /// `C::default()`, discarding whatever a previous occupant left there.
    ///
    /// # Errors
    ///
    /// [`CoreError::DeadEntity`] if the id is dead or stale.
    pub fn add_component<C: Component>(&mut self, id: EntityId) -> Result<(), CoreError> {
        let idx = self.live_index(id).ok_or(CoreError::DeadEntity { id })?;
        if self.entities[idx].has_component(C::ID) {
            return Ok(());
        }

        self.storage_entry::<C>().set(idx, C::default());
        self.entities[idx].add_component(C::ID);
        Ok(())
    }

    /// Attaches component `C` initialized to `value`, only if absent.
    ///
    /// The centralized "ensure" helper: widget factories call this instead
    /// of hand-rolling check-then-initialize, and a second factory touching
    /// the same entity cannot clobber earlier state.
    ///
    /// # Errors
    ///
    /// [`CoreError::DeadEntity`] if the id is dead or stale.
    pub fn ensure_component<C: Component>(
        &mut self,
        id: EntityId,
        value: C,
    ) -> Result<(), CoreError> {
        let idx = self.live_index(id).ok_or(CoreError::DeadEntity { id })?;
        if self.entities[idx].has_component(C::ID) {
            return Ok(());
        }

        self.storage_entry::<C>().set(idx, value);
        self.entities[idx].add_component(C::ID);
        Ok(())
    }

    /// Checks whether a live entity carries component `C`.
    ///
    /// Dead and stale ids simply report `false`.
    #[must_use]
    pub fn has_component<C: Component>(&self, id: EntityId) -> bool {
        self.live_index(id)
            .is_some_and(|idx| self.entities[idx].has_component(C::ID))
    }

    /// Detaches component `C` from an entity.
    ///
    /// Clears the presence bit only; the data slot keeps its last value
    /// until the next attach resets it. No-op when the component is absent
    /// or the id is dead.
    pub fn remove_component<C: Component>(&mut self, id: EntityId) {
        if let Some(idx) = self.live_index(id) {
            self.entities[idx].remove_component(C::ID);
        }
    }

    /// Reads component `C` of an entity. `None` unless the entity is live
    /// and carries the component.
    #[must_use]
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        let idx = self.live_index(id)?;
        if !self.entities[idx].has_component(C::ID) {
            return None;
        }
        self.storage_slot::<C>()?.get(idx)
    }

    /// Mutable access to component `C` of an entity.
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        let idx = self.live_index(id)?;
        if !self.entities[idx].has_component(C::ID) {
            return None;
        }
        self.storage_slot_mut::<C>()?.get_mut(idx)
    }

    /// Raw slice access to the whole storage of `C`, for batch systems.
    ///
    /// Slots of entities without the component hold stale or default data;
    /// pair this with a query or the presence mask.
    #[must_use]
    pub fn storage<C: Component>(&self) -> Option<&ComponentStorage<C>> {
        self.storage_slot::<C>()
    }

    /// Mutable raw storage access for batch systems.
    pub fn storage_mut<C: Component>(&mut self) -> Option<&mut ComponentStorage<C>> {
        self.storage_slot_mut::<C>()
    }

    fn storage_slot<C: Component>(&self) -> Option<&ComponentStorage<C>> {
        self.storages[C::ID as usize]
            .as_deref()
            .and_then(|s| s.as_any().downcast_ref())
    }

    fn storage_slot_mut<C: Component>(&mut self) -> Option<&mut ComponentStorage<C>> {
        self.storages[C::ID as usize]
            .as_deref_mut()
            .and_then(|s| s.as_any_mut().downcast_mut())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the ids of all live entities matching a query, in ascending
    /// slot order.
    ///
    /// The order is stable: the same world state always yields the same
    /// sequence, which pair-iterating consumers (the collision broad
    /// phase) rely on. An unregistered component type matches nothing.
    #[must_use]
    pub fn query(&self, query: &Query) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|slot| slot.alive && query.matches(slot.component_mask))
            .map(|slot| slot.id)
            .collect()
    }

    // =========================================================================
    // Frame clock
    // =========================================================================

    /// Seconds since the previous tick, for the tick currently running.
    #[inline]
    #[must_use]
    pub const fn delta_time(&self) -> f32 {
        self.frame.delta
    }

    /// Number of completed or in-progress ticks.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.frame.tick
    }

    /// Stamps the clock for a new tick. Scheduler-internal.
    pub(crate) fn begin_frame(&mut self, delta: f32) {
        self.frame.delta = delta;
        self.frame.tick += 1;
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Clears all entities and component data, keeping registered
    /// storages allocated. Generations are preserved so ids from before
    /// the reset stay dead.
    pub fn reset(&mut self) {
        debug!(capacity = self.capacity, "world reset");
        for slot in self.entities.iter_mut() {
            slot.alive = false;
            slot.component_mask = 0;
        }
        self.free_indices.clear();
        self.free_indices.extend((0..self.capacity as u32).rev());
        self.alive_count = 0;
        self.frame = FrameClock::default();

        for storage in self.storages.iter_mut().flatten() {
            storage.clear();
        }
    }
}

impl Default for World {
    /// A world at the default capacity from
    /// [`termweave_shared::constants::MAX_ENTITIES`].
    fn default() -> Self {
        Self::new(MAX_ENTITIES)
    }
}
