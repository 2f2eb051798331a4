//! # TERMWEAVE Core
//!
//! Fixed-capacity ECS runtime for terminal UIs: screen elements are
//! entities, their state lives in pre-allocated parallel component
//! arrays, and per-frame behavior runs as phase-ordered systems.
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacity** - every storage is sized at world creation;
//!    exhaustion is a hard error, never silent growth
//! 2. **Single-threaded** - one tick runs systems to completion in a
//!    deterministic order; there are no locks and no suspension points
//! 3. **Stale ids are dead** - entity ids and packed store handles carry
//!    generation counters, validated on every lookup
//!
//! ## Example
//!
//! ```rust,ignore
//! use termweave_core::{InteractionSystem, Phase, Scheduler, World};
//!
//! let mut world = World::default();
//! let mut scheduler = Scheduler::new();
//! scheduler.add_system(Phase::Update, move |world| { /* ... */ Ok(()) });
//! scheduler.run(&mut world, 1.0 / 60.0)?;
//! # Ok::<(), termweave_core::CoreError>(())
//! ```

pub mod ecs;
mod error;
pub mod interact;
pub mod packed;

pub use ecs::{
    AnyStorage, Collider, Component, ComponentStorage, Entity, EntityId, FrameClock, Phase,
    Position, Query, Scheduler, SystemFn, SystemId, Velocity, World, MAX_COMPONENT_TYPES,
};
pub use error::CoreError;
pub use interact::{pair_key, ActivePair, CollisionTest, EventBus, InteractionSystem};
pub use packed::{PackedStore, StoreHandle};
