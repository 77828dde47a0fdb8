//! Driver module: one strictly sequential run over a single owned buffer.
//!
//! The driver allocates, fills, evaluates, and releases, in that order.
//! The buffer is a local owned by [`Driver::run`], so it is returned on
//! every path out of the function, including unwinding.

use crate::alloc::{AllocError, Allocator, MAX_SLOTS};
use crate::eval::{EvalError, Evaluator, OverflowPolicy};
use crate::invariant_ppt::{assert_invariant, DRIVER_RELEASE_OWED, DRIVER_TERMINATES};
use crate::states::{DriverState, StateTrace};
use crate::values::DEFAULT_SLOTS;
use log::{error, info, warn};
use std::fmt;
use thiserror::Error;

/// Run parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Buffer size in slots.
    pub slots: usize,
    /// Allocator ceiling; clamped to [`MAX_SLOTS`].
    pub slot_limit: usize,
    /// Left operand.
    pub a: i32,
    /// Right operand.
    pub b: i32,
    /// Operator code; validated by the evaluator, not here.
    pub op: char,
    /// Value the computation is checked against, if any.
    pub expected: Option<i32>,
    /// Overflow handling.
    pub overflow: OverflowPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS,
            slot_limit: MAX_SLOTS,
            a: 10,
            b: 5,
            op: '+',
            expected: Some(15),
            overflow: OverflowPolicy::Wrapping,
        }
    }
}

/// Malformed command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Neither zero nor three positional arguments.
    #[error("expected no arguments or `<a> <op> <b>`, got {0} argument(s)")]
    WrongArity(usize),
    /// Operand is not a 32-bit integer.
    #[error("invalid operand '{0}'")]
    InvalidOperand(String),
    /// Operator is not exactly one character.
    #[error("operator must be a single character, got '{0}'")]
    InvalidOperator(String),
}

impl RunConfig {
    /// Build a config from positional arguments (program name excluded).
    ///
    /// With no arguments the defaults apply. With `<a> <op> <b>` the
    /// operands and operator are replaced and no expected value is checked.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        match args.as_slice() {
            [] => Ok(Self::default()),
            [a, op, b] => {
                let a = parse_operand(a.as_ref())?;
                let b = parse_operand(b.as_ref())?;
                let mut chars = op.as_ref().chars();
                let op = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(ConfigError::InvalidOperator(op.as_ref().to_string())),
                };
                Ok(Self {
                    a,
                    b,
                    op,
                    expected: None,
                    ..Self::default()
                })
            }
            other => Err(ConfigError::WrongArity(other.len())),
        }
    }

    /// Replace operands and operator, keeping everything else.
    pub fn with_operation(mut self, a: i32, op: char, b: i32) -> Self {
        self.a = a;
        self.op = op;
        self.b = b;
        self
    }
}

fn parse_operand(raw: &str) -> Result<i32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOperand(raw.to_string()))
}

/// Comparison of a computed value against the configured expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Value equals the expectation.
    Matched,
    /// Value differs from the expectation.
    Mismatched {
        /// What was expected.
        expected: i32,
    },
    /// No expectation configured.
    Unchecked,
}

impl Verdict {
    fn judge(value: i32, expected: Option<i32>) -> Self {
        match expected {
            Some(expected) if expected == value => Verdict::Matched,
            Some(expected) => Verdict::Mismatched { expected },
            None => Verdict::Unchecked,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Arithmetic produced a value.
    Computed {
        /// The result.
        value: i32,
        /// Comparison against the expectation.
        verdict: Verdict,
    },
    /// Arithmetic failed; the buffer was still released.
    EvaluationFailed(EvalError),
    /// No buffer could be acquired; nothing ran.
    AllocationFailed(AllocError),
}

/// Everything a run reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The config the run used.
    pub config: RunConfig,
    /// How it ended.
    pub outcome: Outcome,
    /// Slots released, absent when allocation failed.
    pub released_slots: Option<usize>,
    /// States visited, `Start` first and `Terminated` last.
    pub trace: StateTrace,
}

impl RunReport {
    /// Process exit code: 1 when allocation failed, otherwise 0.
    pub fn exit_code(&self) -> u8 {
        match self.outcome {
            Outcome::AllocationFailed(_) => 1,
            _ => 0,
        }
    }

    /// True when the run completed and produced a value.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Computed { .. })
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let RunConfig { a, b, op, .. } = &self.config;
        match &self.outcome {
            Outcome::AllocationFailed(err) => {
                return write!(f, "allocation of {} slots failed: {}", self.config.slots, err)
            }
            Outcome::Computed { value, verdict } => {
                write!(f, "{} {} {} = {}", a, op, b, value)?;
                match verdict {
                    Verdict::Matched => write!(f, " (as expected)")?,
                    Verdict::Mismatched { expected } => write!(f, " (expected {})", expected)?,
                    Verdict::Unchecked => {}
                }
            }
            Outcome::EvaluationFailed(err) => write!(f, "{} {} {} failed: {}", a, op, b, err)?,
        }
        if let Some(slots) = self.released_slots {
            write!(f, "; released {} slots", slots)?;
        }
        Ok(())
    }
}

/// Sequences allocation, initialization, evaluation, and release.
#[derive(Debug, Clone)]
pub struct Driver {
    config: RunConfig,
    allocator: Allocator,
    evaluator: Evaluator,
}

impl Driver {
    /// Create a driver for one run.
    pub fn new(config: RunConfig) -> Self {
        let allocator = Allocator::with_limit(config.slot_limit);
        let evaluator = Evaluator::new(config.overflow);
        Self {
            config,
            allocator,
            evaluator,
        }
    }

    /// Execute the run to `Terminated`.
    pub fn run(self) -> RunReport {
        let mut trace = StateTrace::new();

        let mut buffer = match self.allocator.allocate(self.config.slots) {
            Ok(buffer) => buffer,
            Err(err) => {
                error!("allocation failed: {}", err);
                trace.advance(DriverState::Terminated);
                return RunReport {
                    config: self.config,
                    outcome: Outcome::AllocationFailed(err),
                    released_slots: None,
                    trace,
                };
            }
        };
        trace.advance(DriverState::Allocated);

        buffer.fill_indices();
        trace.advance(DriverState::Initialized);

        let RunConfig { a, b, op, .. } = self.config;
        let outcome = match self.evaluator.evaluate(a, b, op) {
            Ok(value) => {
                let verdict = Verdict::judge(value, self.config.expected);
                match verdict {
                    Verdict::Mismatched { expected } => {
                        warn!("{} {} {} = {}, expected {}", a, op, b, value, expected)
                    }
                    _ => info!("{} {} {} = {}", a, op, b, value),
                }
                Outcome::Computed { value, verdict }
            }
            Err(err) => {
                warn!("{} {} {} failed: {}", a, op, b, err);
                Outcome::EvaluationFailed(err)
            }
        };
        trace.advance(DriverState::Evaluated);

        let released = buffer.release();
        assert_invariant(
            DRIVER_RELEASE_OWED,
            released.slots == self.config.slots,
            "Allocated buffer released regardless of evaluation outcome",
            Some("run"),
        );
        trace.advance(DriverState::Released);

        trace.advance(DriverState::Terminated);
        assert_invariant(
            DRIVER_TERMINATES,
            trace.current().is_terminal(),
            "Run ends in the terminal state",
            Some("run"),
        );
        info!("run terminated after releasing {} slots", released.slots);

        RunReport {
            config: self.config,
            outcome,
            released_slots: Some(released.slots),
            trace,
        }
    }
}

/// Run `config` to completion.
pub fn run(config: RunConfig) -> RunReport {
    Driver::new(config).run()
}
