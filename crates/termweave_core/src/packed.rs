//! # Packed Store
//!
//! A dense array with stable external handles: insert at the end, remove
//! by swap-and-pop, O(1) amortized both ways. The dense slice stays
//! gap-free for cache-friendly iteration while handles keep pointing at
//! the right element across other elements' removals.
//!
//! # Removal-while-iterating hazard
//!
//! Swap-and-pop moves the *last* element into the freed slot. Iterating
//! the dense slice forward by index while removing can therefore move a
//! not-yet-visited element into an index already passed. Iterate backward
//! when removing during a scan, or collect handles first and remove after.

use crate::error::CoreError;

/// Sentinel for a sparse slot that points at no dense element.
const EMPTY: u32 = u32::MAX;

/// Handle to an element in a [`PackedStore`].
///
/// Packs a sparse slot index with a generation counter (same scheme as
/// entity ids), so a handle removed once can never silently address the
/// element that later reuses its slot: removal bumps the generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct StoreHandle(u64);

impl StoreHandle {
    #[inline]
    const fn new(slot: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (slot as u64))
    }

    #[inline]
    const fn slot(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

/// Bookkeeping for one sparse slot.
#[derive(Clone, Copy, Debug)]
struct SparseSlot {
    /// Index into the dense array, or [`EMPTY`].
    dense: u32,
    /// Generation the slot was last handed out with.
    generation: u32,
}

/// Dense-array container with stable handles and swap-and-pop removal.
///
/// Built for "currently active N-to-N relation" workloads: membership
/// toggles every tick, iteration happens every tick, and neither may
/// churn the heap once the store has warmed up.
pub struct PackedStore<T> {
    /// The gap-free element array, live in `[0, len)`.
    data: Vec<T>,
    /// Back-reference: sparse slot owning each dense index.
    slots_of: Vec<u32>,
    /// Sparse slot table, indexed by handle slot.
    sparse: Vec<SparseSlot>,
    /// Recycled sparse slots.
    free_slots: Vec<u32>,
}

impl<T> PackedStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            slots_of: Vec::new(),
            sparse: Vec::new(),
            free_slots: Vec::new(),
        }
    }

    /// Creates an empty store with pre-allocated room for `capacity`
    /// elements, so steady-state ticks never allocate.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            slots_of: Vec::with_capacity(capacity),
            sparse: Vec::with_capacity(capacity),
            free_slots: Vec::with_capacity(capacity),
        }
    }

    /// Number of live elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks whether the store is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The dense element view, valid for indices `[0, len)`.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Inserts a value, returning a handle that stays valid until this
    /// exact element is removed or the store is cleared.
    pub fn add(&mut self, value: T) -> StoreHandle {
        let dense = self.data.len() as u32;
        self.data.push(value);

        let slot = if let Some(slot) = self.free_slots.pop() {
            self.sparse[slot as usize].dense = dense;
            slot
        } else {
            let slot = self.sparse.len() as u32;
            self.sparse.push(SparseSlot {
                dense,
                generation: 0,
            });
            slot
        };
        self.slots_of.push(slot);

        StoreHandle::new(slot, self.sparse[slot as usize].generation)
    }

    /// Removes the element a handle refers to, returning it.
    ///
    /// The last dense element is swapped into the freed index and its
    /// handle is repointed; every other live handle is untouched. The
    /// removed handle (and any copy of it) is dead afterwards.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidHandle`] if the handle was already removed,
    /// cleared, or never came from this store.
    pub fn remove(&mut self, handle: StoreHandle) -> Result<T, CoreError> {
        let dense = self.resolve(handle).ok_or(CoreError::InvalidHandle)?;
        let slot = handle.slot() as usize;

        // Kill the handle before anything moves.
        self.sparse[slot].dense = EMPTY;
        self.sparse[slot].generation = self.sparse[slot].generation.wrapping_add(1);
        self.free_slots.push(handle.slot());

        let last = self.data.len() - 1;
        let value = self.data.swap_remove(dense);
        self.slots_of.swap_remove(dense);
        if dense < last {
            // Repoint the moved element's sparse slot to its new home.
            let moved_slot = self.slots_of[dense] as usize;
            self.sparse[moved_slot].dense = dense as u32;
        }
        Ok(value)
    }

    /// Reads the element a handle refers to.
    #[must_use]
    pub fn get(&self, handle: StoreHandle) -> Option<&T> {
        self.resolve(handle).map(|dense| &self.data[dense])
    }

    /// Mutable access to the element a handle refers to.
    pub fn get_mut(&mut self, handle: StoreHandle) -> Option<&mut T> {
        self.resolve(handle).map(|dense| &mut self.data[dense])
    }

    /// Checks whether a handle is live.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: StoreHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Returns the handle owning a dense index, for backward-iterating
    /// removers that found an element by scanning [`PackedStore::data`].
    #[must_use]
    pub fn handle_at(&self, dense_index: usize) -> Option<StoreHandle> {
        let slot = *self.slots_of.get(dense_index)?;
        Some(StoreHandle::new(
            slot,
            self.sparse[slot as usize].generation,
        ))
    }

    /// Removes every element and invalidates every handle. Capacity is
    /// kept.
    pub fn clear(&mut self) {
        self.data.clear();
        self.slots_of.clear();
        self.free_slots.clear();
        for (slot, entry) in self.sparse.iter_mut().enumerate() {
            if entry.dense != EMPTY {
                entry.dense = EMPTY;
                entry.generation = entry.generation.wrapping_add(1);
            }
            self.free_slots.push(slot as u32);
        }
    }

    /// Resolves a handle to its dense index, checking the generation.
    fn resolve(&self, handle: StoreHandle) -> Option<usize> {
        let entry = self.sparse.get(handle.slot() as usize)?;
        (entry.dense != EMPTY && entry.generation == handle.generation())
            .then_some(entry.dense as usize)
    }
}

impl<T> Default for PackedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut store = PackedStore::new();
        let h = store.add(42u32);
        assert_eq!(store.get(h), Some(&42));
        assert_eq!(store.len(), 1);
        assert_eq!(store.data(), &[42]);
    }

    #[test]
    fn test_remove_middle_keeps_other_handles_valid() {
        let mut store = PackedStore::new();
        let handles: Vec<_> = (0..5u32).map(|v| store.add(v * 10)).collect();

        // Remove a non-last element: the tail element gets moved into its
        // dense index, which must not break its handle.
        assert_eq!(store.remove(handles[1]), Ok(10));
        assert_eq!(store.len(), 4);

        for (i, &h) in handles.iter().enumerate() {
            if i == 1 {
                assert!(!store.contains(h));
            } else {
                assert_eq!(store.get(h), Some(&(i as u32 * 10)));
            }
        }
    }

    #[test]
    fn test_double_remove_is_an_error() {
        let mut store = PackedStore::new();
        let h = store.add(7u8);
        assert!(store.remove(h).is_ok());
        assert_eq!(store.remove(h), Err(CoreError::InvalidHandle));
    }

    #[test]
    fn test_recycled_slot_does_not_resurrect_old_handle() {
        let mut store = PackedStore::new();
        let old = store.add(1u32);
        store.remove(old).unwrap();

        // New element reuses the sparse slot; the old handle must stay dead.
        let new = store.add(2u32);
        assert!(!store.contains(old));
        assert_eq!(store.get(new), Some(&2));
        assert_eq!(store.remove(old), Err(CoreError::InvalidHandle));
    }

    #[test]
    fn test_backward_iteration_removal() {
        let mut store = PackedStore::new();
        for v in 0..6u32 {
            store.add(v);
        }

        // Remove all even values while scanning. Backward iteration is
        // safe against swap-and-pop moving elements below the cursor.
        for dense in (0..store.len()).rev() {
            if store.data()[dense] % 2 == 0 {
                let h = store.handle_at(dense).unwrap();
                store.remove(h).unwrap();
            }
        }

        let mut left: Vec<u32> = store.data().to_vec();
        left.sort_unstable();
        assert_eq!(left, vec![1, 3, 5]);
    }

    #[test]
    fn test_clear_invalidates_all_handles() {
        let mut store = PackedStore::new();
        let a = store.add(1u32);
        let b = store.add(2u32);

        store.clear();
        assert!(store.is_empty());
        assert!(!store.contains(a));
        assert!(!store.contains(b));

        // Store remains usable after clear.
        let c = store.add(3u32);
        assert_eq!(store.get(c), Some(&3));
    }

    #[test]
    fn test_handle_at_matches_dense_order() {
        let mut store = PackedStore::new();
        let h0 = store.add("a");
        let h1 = store.add("b");
        assert_eq!(store.handle_at(0), Some(h0));
        assert_eq!(store.handle_at(1), Some(h1));
        assert_eq!(store.handle_at(2), None);
    }
}
