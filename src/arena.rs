//! Fixed-capacity, generation-stamped slot arena.
//!
//! Slots are handed out as [`SlotHandle`]s (index + generation) rather than
//! references.  Releasing a slot bumps its generation, so any handle issued
//! for an earlier occupancy becomes stale: `get`/`release` on a stale handle
//! return `None` and change nothing.  Two releases of the same occupancy
//! (e.g. a contact and a later expiry) therefore act exactly once.

/// Opaque reference to one occupancy of one arena slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotHandle {
    index: usize,
    generation: u32,
}

impl SlotHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    generation: u32,
    occupied: bool,
}

/// Arena whose capacity is fixed at construction.  Values stay in place for
/// the arena's whole life; only occupancy changes.
#[derive(Debug, Clone)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
}

impl<T> SlotArena<T> {
    /// One free slot per value, in iteration order.
    pub fn with_values(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            slots: values
                .into_iter()
                .map(|value| Slot {
                    value,
                    generation: 0,
                    occupied: false,
                })
                .collect(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied).count()
    }

    /// Occupy the lowest-index free slot.  `None` when every slot is taken.
    pub fn acquire(&mut self) -> Option<(SlotHandle, &T)> {
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, s)| !s.occupied)?;
        slot.occupied = true;
        let handle = SlotHandle {
            index,
            generation: slot.generation,
        };
        Some((handle, &slot.value))
    }

    /// Free the slot if `handle` still refers to its current occupancy.
    ///
    /// Returns the slot's value on success.  A stale or already-released
    /// handle is a no-op returning `None`.
    pub fn release(&mut self, handle: SlotHandle) -> Option<&T> {
        let slot = self.slots.get_mut(handle.index)?;
        if !slot.occupied || slot.generation != handle.generation {
            return None;
        }
        slot.occupied = false;
        slot.generation = slot.generation.wrapping_add(1);
        Some(&slot.value)
    }

    /// Value behind a live handle.
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index)?;
        (slot.occupied && slot.generation == handle.generation).then_some(&slot.value)
    }

    #[inline]
    pub fn is_live(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Handle for the current occupancy of slot `index`, if it is occupied.
    pub fn live_handle(&self, index: usize) -> Option<SlotHandle> {
        let slot = self.slots.get(index)?;
        slot.occupied.then_some(SlotHandle {
            index,
            generation: slot.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(n: usize) -> SlotArena<usize> {
        SlotArena::with_values(0..n)
    }

    #[test]
    fn acquire_hands_out_lowest_free_slot_until_full() {
        let mut a = arena(3);
        let (h0, v0) = a.acquire().unwrap();
        assert_eq!((h0.index(), *v0), (0, 0));
        let (h1, _) = a.acquire().unwrap();
        let (h2, _) = a.acquire().unwrap();
        assert_eq!((h1.index(), h2.index()), (1, 2));
        assert!(a.acquire().is_none(), "full arena must refuse further acquires");
        assert_eq!(a.occupied(), 3);
    }

    #[test]
    fn release_frees_slot_and_bumps_generation() {
        let mut a = arena(2);
        let (h, _) = a.acquire().unwrap();
        assert_eq!(a.release(h), Some(&0));
        assert_eq!(a.occupied(), 0);

        let (again, _) = a.acquire().unwrap();
        assert_eq!(again.index(), h.index());
        assert_eq!(again.generation(), h.generation() + 1);
    }

    #[test]
    fn double_release_is_a_no_op() {
        let mut a = arena(1);
        let (h, _) = a.acquire().unwrap();
        assert!(a.release(h).is_some());
        assert!(a.release(h).is_none());
        assert_eq!(a.occupied(), 0);
    }

    #[test]
    fn stale_handle_cannot_release_a_newer_occupancy() {
        let mut a = arena(1);
        let (old, _) = a.acquire().unwrap();
        a.release(old);
        let (new, _) = a.acquire().unwrap();

        assert!(a.release(old).is_none(), "stale handle must not free the slot");
        assert!(a.is_live(new));
        assert!(!a.is_live(old));
        assert_eq!(a.live_handle(0), Some(new));
    }

    #[test]
    fn out_of_range_handles_are_ignored() {
        let mut a = arena(1);
        let bogus = SlotHandle {
            index: 7,
            generation: 0,
        };
        assert!(a.get(bogus).is_none());
        assert!(a.release(bogus).is_none());
        assert!(a.live_handle(7).is_none());
    }
}
