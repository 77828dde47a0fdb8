//! PPT Invariant System: Runtime invariant enforcement with contract tracking.

#[cfg(feature = "ppt")]
use lazy_static::lazy_static;
#[cfg(feature = "ppt")]
use std::collections::HashSet;
#[cfg(feature = "ppt")]
use std::sync::Mutex;

// Invariant constants for contract tracking
pub const ALLOC_WITHIN_LIMIT: u32 = 1;
pub const ALLOC_SIZE_POSITIVE: u32 = 2;
pub const BUFFER_INDEX_SEQUENCE: u32 = 3;
pub const BUFFER_RELEASED_ONCE: u32 = 4;
pub const EVAL_DISPATCH: u32 = 5;
pub const EVAL_DIVISION_GUARD: u32 = 6;
pub const EVAL_REJECTS_UNKNOWN: u32 = 7;
pub const DRIVER_STATE_ORDER: u32 = 8;
pub const DRIVER_RELEASE_OWED: u32 = 9;
pub const DRIVER_TERMINATES: u32 = 10;

#[cfg(feature = "ppt")]
lazy_static! {
    static ref INVARIANT_LOG: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[cfg(feature = "ppt")]
/// Assert an invariant: logs it and panics on failure.
pub fn assert_invariant(id: u32, condition: bool, message: &str, context: Option<&str>) {
    if !condition {
        let full_message = if let Some(ctx) = context {
            format!("Invariant {} failed: {} (context: {})", id, message, ctx)
        } else {
            format!("Invariant {} failed: {}", id, message)
        };
        log::error!("{}", full_message);
        panic!("{}", full_message);
    }
    // A poisoned log only means another thread panicked mid-insert; keep recording.
    let mut log = INVARIANT_LOG.lock().unwrap_or_else(|e| e.into_inner());
    log.insert(id);
}

#[cfg(not(feature = "ppt"))]
/// Assert an invariant: checks condition and panics on failure.
pub fn assert_invariant(_id: u32, condition: bool, message: &str, _context: Option<&str>) {
    if !condition {
        panic!("Invariant failed: {}", message);
    }
}

#[cfg(feature = "ppt")]
/// Contract test: checks that specified invariants were asserted.
pub fn contract_test(test_name: &str, required_invariants: &[u32]) {
    let log = INVARIANT_LOG.lock().unwrap_or_else(|e| e.into_inner());
    let missing: Vec<&str> = required_invariants
        .iter()
        .filter(|inv| !log.contains(inv))
        .map(|&inv| invariant_name(inv))
        .collect();
    drop(log); // Drop the lock before panicking
    if !missing.is_empty() {
        panic!(
            "Contract test '{}' failed: invariants not enforced: {:?}",
            test_name, missing
        );
    }
}

#[cfg(not(feature = "ppt"))]
/// Contract test: no-op when PPT feature is disabled.
pub fn contract_test(_test_name: &str, _required_invariants: &[u32]) {}

#[cfg(feature = "ppt")]
/// Clear invariant log (for between test runs).
pub fn clear_invariant_log() {
    INVARIANT_LOG
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clear();
}

#[cfg(not(feature = "ppt"))]
/// Clear invariant log: no-op when PPT feature is disabled.
pub fn clear_invariant_log() {}

/// Maps invariant ID to human-readable name (for diagnostics only).
pub const fn invariant_name(id: u32) -> &'static str {
    match id {
        ALLOC_WITHIN_LIMIT => "ALLOC_WITHIN_LIMIT",
        ALLOC_SIZE_POSITIVE => "ALLOC_SIZE_POSITIVE",
        BUFFER_INDEX_SEQUENCE => "BUFFER_INDEX_SEQUENCE",
        BUFFER_RELEASED_ONCE => "BUFFER_RELEASED_ONCE",
        EVAL_DISPATCH => "EVAL_DISPATCH",
        EVAL_DIVISION_GUARD => "EVAL_DIVISION_GUARD",
        EVAL_REJECTS_UNKNOWN => "EVAL_REJECTS_UNKNOWN",
        DRIVER_STATE_ORDER => "DRIVER_STATE_ORDER",
        DRIVER_RELEASE_OWED => "DRIVER_RELEASE_OWED",
        DRIVER_TERMINATES => "DRIVER_TERMINATES",
        _ => "UNKNOWN",
    }
}
