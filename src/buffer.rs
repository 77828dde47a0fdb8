//! Buffer module: owned integer slot storage with a single release event.
//!
//! A [`Buffer`] is only produced by [`crate::alloc::Allocator`]. It is
//! released either explicitly through [`Buffer::release`], which consumes
//! it, or implicitly when its owner goes out of scope. Either way the slot
//! storage is returned exactly once, and the type system rejects any use
//! after release:
//!
//! ```compile_fail
//! use slotcalc::alloc::Allocator;
//!
//! let buffer = Allocator::new().allocate(100).unwrap();
//! let _released = buffer.release();
//! let _again = buffer.release(); // use of moved value
//! ```
//!
//! ```compile_fail
//! use slotcalc::alloc::Allocator;
//!
//! let mut buffer = Allocator::new().allocate(100).unwrap();
//! buffer.release();
//! buffer.fill_indices(); // borrow of moved value
//! ```

#![forbid(unsafe_code)]

use crate::invariant_ppt::{assert_invariant, BUFFER_INDEX_SEQUENCE, BUFFER_RELEASED_ONCE};
use log::trace;

/// Proof that a buffer of `slots` slots was returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Released {
    /// Number of slots the released buffer held.
    pub slots: usize,
}

/// Contiguous, owned sequence of `i32` slots with a fixed length.
#[derive(Debug)]
pub struct Buffer {
    slots: Vec<i32>,
}

impl Buffer {
    /// Wrap storage that the allocator has already reserved and sized.
    pub(crate) fn from_slots(slots: Vec<i32>) -> Self {
        Self { slots }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false for allocator-produced buffers; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bounds-checked read of one slot.
    pub fn get(&self, index: usize) -> Option<i32> {
        self.slots.get(index).copied()
    }

    /// Read-only view of all slots.
    pub fn as_slice(&self) -> &[i32] {
        &self.slots
    }

    /// Write 0, 1, ..., N-1 into successive slots.
    ///
    /// The allocator caps N at 2^31, so every index fits in an `i32`.
    pub fn fill_indices(&mut self) {
        write_sequence(&mut self.slots, 0);
        assert_invariant(
            BUFFER_INDEX_SEQUENCE,
            self.holds_index_sequence(),
            "Buffer filled with its own index sequence",
            Some("fill_indices"),
        );
    }

    /// True when `slot[i] == i` for every slot.
    pub fn holds_index_sequence(&self) -> bool {
        self.slots
            .iter()
            .enumerate()
            .all(|(i, &v)| usize::try_from(v).map_or(false, |v| v == i))
    }

    /// Release the buffer. Consumes it, so it cannot be touched again.
    pub fn release(self) -> Released {
        Released { slots: self.len() }
        // `self` drops here; Drop returns the storage.
    }
}

/// Write `first, first + 1, ...` into `slots`, stopping at `i32::MAX`.
///
/// The counter is an inclusive range so yielding `i32::MAX` never
/// computes a successor.
fn write_sequence(slots: &mut [i32], first: i32) {
    for (slot, value) in slots.iter_mut().zip(first..=i32::MAX) {
        *slot = value;
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        trace!("releasing buffer of {} slots", self.slots.len());
        assert_invariant(
            BUFFER_RELEASED_ONCE,
            true,
            "Buffer storage returned by its sole owner",
            Some("drop"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fill_writes_index_sequence() {
        let mut buffer = Buffer::from_slots(vec![-7; 100]);
        assert!(!buffer.holds_index_sequence());
        buffer.fill_indices();
        assert!(buffer.holds_index_sequence());
        assert_eq!(buffer.get(0), Some(0));
        assert_eq!(buffer.get(99), Some(99));
        assert_eq!(buffer.get(100), None);
    }

    #[test]
    fn single_slot_buffer() {
        let mut buffer = Buffer::from_slots(vec![5]);
        buffer.fill_indices();
        assert_eq!(buffer.as_slice(), &[0]);
    }

    #[test]
    fn sequence_reaches_i32_max_without_overflow() {
        // Tail of a MAX_SLOTS buffer: the last index is i32::MAX.
        let mut tail = [0i32; 3];
        write_sequence(&mut tail, i32::MAX - 2);
        assert_eq!(tail, [i32::MAX - 2, i32::MAX - 1, i32::MAX]);

        let mut last = [-1i32; 1];
        write_sequence(&mut last, i32::MAX);
        assert_eq!(last, [i32::MAX]);
    }

    #[test]
    fn release_reports_slot_count() {
        let buffer = Buffer::from_slots(vec![0; 42]);
        assert_eq!(buffer.release(), Released { slots: 42 });
    }

    proptest! {
        #[test]
        fn fill_indices_prop(len in 1usize..4096, seed in any::<i32>()) {
            let mut buffer = Buffer::from_slots(vec![seed; len]);
            buffer.fill_indices();
            prop_assert_eq!(buffer.len(), len);
            for i in 0..len {
                prop_assert_eq!(buffer.get(i), Some(i as i32));
            }
        }
    }
}
