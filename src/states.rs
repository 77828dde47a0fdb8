//! Driver state definitions.

use crate::invariant_ppt::{assert_invariant, DRIVER_STATE_ORDER};
use std::fmt;

/// States a run passes through, in order. No state is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DriverState {
    /// Nothing acquired yet.
    Start,
    /// Buffer owned by the driver.
    Allocated,
    /// Buffer holds its index sequence.
    Initialized,
    /// Arithmetic attempted; the outcome may be a failure.
    Evaluated,
    /// Buffer returned.
    Released,
    /// Sole terminal state.
    Terminated,
}

impl DriverState {
    /// Whether `self -> next` is a legal transition.
    pub fn can_advance_to(self, next: DriverState) -> bool {
        use DriverState::*;
        matches!(
            (self, next),
            (Start, Allocated)
                | (Start, Terminated)
                | (Allocated, Initialized)
                | (Initialized, Evaluated)
                | (Evaluated, Released)
                | (Released, Terminated)
        )
    }

    /// True only for [`DriverState::Terminated`].
    pub fn is_terminal(self) -> bool {
        self == DriverState::Terminated
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Ordered record of the states a run visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTrace {
    visited: Vec<DriverState>,
}

impl StateTrace {
    /// A trace positioned at [`DriverState::Start`].
    pub fn new() -> Self {
        Self {
            visited: vec![DriverState::Start],
        }
    }

    /// Current state.
    pub fn current(&self) -> DriverState {
        // `visited` starts non-empty and only grows.
        self.visited.last().copied().unwrap_or(DriverState::Start)
    }

    /// Move to `next`.
    ///
    /// # Panics
    /// Panics on an illegal transition; the driver never requests one.
    pub fn advance(&mut self, next: DriverState) {
        let from = self.current();
        let context = format!("{} -> {}", from, next);
        assert_invariant(
            DRIVER_STATE_ORDER,
            from.can_advance_to(next),
            "Driver states advance strictly in order",
            Some(&context),
        );
        log::debug!("driver state {}", context);
        self.visited.push(next);
    }

    /// States visited so far, starting with `Start`.
    pub fn visited(&self) -> &[DriverState] {
        &self.visited
    }
}

impl Default for StateTrace {
    fn default() -> Self {
        Self::new()
    }
}
