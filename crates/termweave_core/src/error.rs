//! Runtime error types.
//!
//! Everything here is a contract violation by the caller or an exhausted
//! fixed resource. There is no retryable condition: a tick either completes
//! or the first error aborts it.

use thiserror::Error;

use crate::ecs::EntityId;

/// Errors produced by the runtime core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The world has no free entity slots left.
    ///
    /// Capacity is fixed at world creation; there is no growth path.
    #[error("entity capacity exhausted ({capacity} slots)")]
    CapacityExhausted {
        /// The world's fixed capacity.
        capacity: usize,
    },

    /// An operation referenced an entity that is dead, stale or null.
    #[error("entity {id:?} is not alive")]
    DeadEntity {
        /// The offending id.
        id: EntityId,
    },

    /// An entity index is too large to encode into a collision pair key.
    ///
    /// Keys are `a * 2^26 + b`; indices at or above 2^26 would silently
    /// collide, so they are rejected instead.
    #[error("entity index {index} exceeds the pair key bound")]
    PairKeyOverflow {
        /// The offending entity index.
        index: u32,
    },

    /// A packed store handle does not refer to a live element.
    ///
    /// Either it was already removed or it belongs to a different store.
    #[error("packed store handle is stale or unknown")]
    InvalidHandle,
}
