pub mod alloc;
pub mod buffer;
pub mod driver;
pub mod eval;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod states;
pub mod values;

pub use alloc::{AllocError, Allocator};
pub use buffer::{Buffer, Released};
pub use driver::{run, ConfigError, Driver, Outcome, RunConfig, RunReport, Verdict};
pub use eval::{evaluate, EvalError, Evaluator, Operator, OverflowPolicy};
pub use states::{DriverState, StateTrace};
