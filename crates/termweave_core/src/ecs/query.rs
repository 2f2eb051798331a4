//! # Query Engine
//!
//! A query is a 64-bit component mask. Matching is a single AND per live
//! entity over the fixed-capacity slot array - no index structure, which
//! is the right trade at terminal-UI entity counts (hundreds, not
//! millions).

use super::component::Component;

/// A set of component types an entity must carry to match.
///
/// # Example
///
/// ```rust,ignore
/// let movable = Query::new().with::<Position>().with::<Velocity>();
/// for id in world.query(&movable) { /* ... */ }
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Query {
    mask: u64,
}

impl Query {
    /// Creates an empty query. With no components required, every live
    /// entity matches.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { mask: 0 }
    }

    /// Requires component type `C`.
    #[inline]
    #[must_use]
    pub const fn with<C: Component>(mut self) -> Self {
        self.mask |= 1 << C::ID;
        self
    }

    /// Returns the raw component mask.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u64 {
        self.mask
    }

    /// Checks a component mask against this query.
    #[inline]
    #[must_use]
    pub const fn matches(self, component_mask: u64) -> bool {
        (component_mask & self.mask) == self.mask
    }
}
