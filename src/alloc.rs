//! Alloc module: acquire fixed-size slot buffers.

use crate::buffer::Buffer;
use crate::invariant_ppt::{assert_invariant, ALLOC_SIZE_POSITIVE, ALLOC_WITHIN_LIMIT};
use log::{debug, warn};
use std::collections::TryReserveError;
use thiserror::Error;

/// Largest buffer whose every index is representable as an `i32` slot value.
pub const MAX_SLOTS: usize = 1 << 31;

/// Errors that can occur when acquiring a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// A buffer must hold at least one slot.
    #[error("cannot allocate a buffer of zero slots")]
    ZeroSize,
    /// Request is larger than the allocator is configured to hand out.
    #[error("requested {requested} slots, limit is {limit}")]
    LimitExceeded {
        /// Slots asked for.
        requested: usize,
        /// Configured ceiling.
        limit: usize,
    },
    /// The system could not provide the memory.
    #[error("system could not provide {requested} slots")]
    Exhausted {
        /// Slots asked for.
        requested: usize,
        /// Underlying reservation failure.
        #[source]
        source: TryReserveError,
    },
}

/// Hands out [`Buffer`]s of at most `limit` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocator {
    limit: usize,
}

impl Allocator {
    /// Allocator with the widest permitted limit.
    pub fn new() -> Self {
        Self { limit: MAX_SLOTS }
    }

    /// Allocator with a custom slot limit, clamped to [`MAX_SLOTS`].
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: limit.min(MAX_SLOTS),
        }
    }

    /// The effective slot limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Acquire sole ownership of a buffer of `size` slots.
    ///
    /// Slot contents are unspecified until the buffer is initialized.
    pub fn allocate(&self, size: usize) -> Result<Buffer, AllocError> {
        if size == 0 {
            warn!("rejected zero-slot allocation");
            return Err(AllocError::ZeroSize);
        }
        if size > self.limit {
            warn!("rejected allocation of {} slots (limit {})", size, self.limit);
            return Err(AllocError::LimitExceeded {
                requested: size,
                limit: self.limit,
            });
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(size)
            .map_err(|source| AllocError::Exhausted {
                requested: size,
                source,
            })?;
        slots.resize(size, 0);

        assert_invariant(
            ALLOC_SIZE_POSITIVE,
            !slots.is_empty(),
            "Buffer has at least one slot",
            Some("allocate"),
        );
        assert_invariant(
            ALLOC_WITHIN_LIMIT,
            slots.len() == size && size <= self.limit,
            "Buffer sized exactly as requested, within limit",
            Some("allocate"),
        );
        debug!("allocated buffer of {} slots", size);
        Ok(Buffer::from_slots(slots))
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_exact_size() {
        let buffer = Allocator::new().allocate(100).unwrap();
        assert_eq!(buffer.len(), 100);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn alloc_rejects_zero() {
        assert_eq!(Allocator::new().allocate(0).unwrap_err(), AllocError::ZeroSize);
    }

    #[test]
    fn alloc_respects_limit() {
        let allocator = Allocator::with_limit(8);
        assert!(allocator.allocate(8).is_ok());
        assert_eq!(
            allocator.allocate(9).unwrap_err(),
            AllocError::LimitExceeded {
                requested: 9,
                limit: 8
            }
        );
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(Allocator::with_limit(usize::MAX).limit(), MAX_SLOTS);
        assert_eq!(Allocator::default().limit(), MAX_SLOTS);
    }

    #[test]
    fn alloc_error_messages() {
        let err = AllocError::LimitExceeded {
            requested: 10,
            limit: 4,
        };
        assert_eq!(err.to_string(), "requested 10 slots, limit is 4");
        assert_eq!(
            AllocError::ZeroSize.to_string(),
            "cannot allocate a buffer of zero slots"
        );
    }
}
