//! # Interaction Subsystem
//!
//! Stateful relational tracking between collidable entities: which pairs
//! currently overlap, with exactly-once enter/exit event semantics.

mod bus;
mod system;

pub use bus::EventBus;
pub use system::{pair_key, ActivePair, CollisionTest, InteractionSystem};
