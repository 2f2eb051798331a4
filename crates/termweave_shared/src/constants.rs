//! # Runtime Constants
//!
//! Fixed configuration for the TERMWEAVE runtime.
//!
//! **CRITICAL:** Storage layouts are sized from these values at world
//! creation. Changing them does not resize live worlds.

// =============================================================================
// CAPACITY
// =============================================================================

/// Default entity capacity for a world.
///
/// Every component storage allocates one slot per possible entity index,
/// so this bounds peak memory for the whole runtime.
pub const MAX_ENTITIES: usize = 10_000;

/// Upper bound (exclusive) on entity indices that can participate in a
/// collision pair key.
///
/// Pair keys are encoded as `a * PAIR_KEY_BOUND + b`; the encoding is only
/// collision-free while both indices stay below this bound.
pub const PAIR_KEY_BOUND: u64 = 1 << 26;

// =============================================================================
// FRAME TIMING
// =============================================================================

/// Nominal tick rate (frames per second) the runtime is tuned for.
pub const TICK_RATE: u32 = 60;

/// Nominal delta time for one tick at [`TICK_RATE`], in seconds.
pub const TICK_DELTA: f32 = 1.0 / TICK_RATE as f32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_key_bound_squares_into_u64() {
        // Largest encodable key must fit in u64 without wrapping.
        let max = (PAIR_KEY_BOUND - 1) * PAIR_KEY_BOUND + (PAIR_KEY_BOUND - 1);
        assert!(max < u64::MAX);
    }

    #[test]
    fn test_capacity_below_pair_key_bound() {
        assert!((MAX_ENTITIES as u64) < PAIR_KEY_BOUND);
    }
}
