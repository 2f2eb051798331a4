//! # TERMWEAVE Shared
//!
//! Types used on both sides of the core boundary: the runtime core below,
//! widget factories above. Nothing in here touches entity storage or the
//! scheduler, so widget crates can depend on this without pulling in the
//! whole runtime.

pub mod constants;
pub mod events;
pub mod geometry;

pub use constants::{MAX_ENTITIES, PAIR_KEY_BOUND, TICK_DELTA, TICK_RATE};
pub use events::{EventKind, InteractionEvent};
pub use geometry::Rect;
