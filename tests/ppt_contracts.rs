//! Contract test: a representative set of runs must exercise every
//! invariant the kernel declares.

use slotcalc::driver::{run, RunConfig};
use slotcalc::invariant_ppt::{
    clear_invariant_log, contract_test, ALLOC_SIZE_POSITIVE, ALLOC_WITHIN_LIMIT,
    BUFFER_INDEX_SEQUENCE, BUFFER_RELEASED_ONCE, DRIVER_RELEASE_OWED, DRIVER_STATE_ORDER,
    DRIVER_TERMINATES, EVAL_DISPATCH, EVAL_DIVISION_GUARD, EVAL_REJECTS_UNKNOWN,
};

// Single test in this binary: the invariant log is process-global.
#[test]
fn runs_enforce_every_invariant() {
    clear_invariant_log();

    let _ = run(RunConfig::default());
    let _ = run(RunConfig::default().with_operation(10, '/', 0));
    let _ = run(RunConfig::default().with_operation(10, '?', 5));

    contract_test(
        "full run lifecycle",
        &[
            ALLOC_SIZE_POSITIVE,
            ALLOC_WITHIN_LIMIT,
            BUFFER_INDEX_SEQUENCE,
            BUFFER_RELEASED_ONCE,
            EVAL_DISPATCH,
            EVAL_DIVISION_GUARD,
            EVAL_REJECTS_UNKNOWN,
            DRIVER_STATE_ORDER,
            DRIVER_RELEASE_OWED,
            DRIVER_TERMINATES,
        ],
    );
}
