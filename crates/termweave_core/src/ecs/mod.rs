//! # Entity Component System
//!
//! The substrate of the runtime: entity slots with generation-checked
//! ids, pre-allocated per-type storage with presence bitmasks, mask-based
//! queries, and the phase-ordered frame scheduler.
//!
//! ## Design Philosophy
//!
//! - All storage is sized to the world's fixed capacity at creation
//! - Components are plain data in parallel arrays, one slot per entity
//! - Presence is a bit, separate from the data slot it guards
//! - Everything is single-threaded and deterministic

mod component;
mod entity;
mod query;
mod scheduler;
mod storage;
mod world;

pub use component::{Collider, Component, Position, Velocity, MAX_COMPONENT_TYPES};
pub use entity::{Entity, EntityId};
pub use query::Query;
pub use scheduler::{Phase, Scheduler, SystemFn, SystemId};
pub use storage::{AnyStorage, ComponentStorage};
pub use world::{FrameClock, World};
