//! Eval module: guarded integer arithmetic dispatch.
//!
//! Results are tagged: a computed value is always `Ok`, and every failure is
//! an [`EvalError`]. No value doubles as a failure marker.
//!
//! This module emits no output itself; callers report outcomes.

#![forbid(unsafe_code)]

use crate::invariant_ppt::{
    assert_invariant, EVAL_DISPATCH, EVAL_DIVISION_GUARD, EVAL_REJECTS_UNKNOWN,
};
use std::fmt;
use thiserror::Error;

/// The four supported binary operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`, truncating toward zero.
    Divide,
}

impl Operator {
    /// Every operator, in code order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Parse an operator code. Unknown codes are rejected, never defaulted.
    pub fn from_code(code: char) -> Result<Self, EvalError> {
        match code {
            '+' => Ok(Operator::Add),
            '-' => Ok(Operator::Subtract),
            '*' => Ok(Operator::Multiply),
            '/' => Ok(Operator::Divide),
            other => Err(EvalError::UnsupportedOperation(other)),
        }
    }

    /// The operator code this variant is parsed from.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl TryFrom<char> for Operator {
    type Error = EvalError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        Operator::from_code(code)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Why an evaluation produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Divisor was zero.
    #[error("division by zero")]
    DivisionByZero,
    /// Operator code outside `+ - * /`.
    #[error("unsupported operation '{0}'")]
    UnsupportedOperation(char),
    /// Result does not fit in an `i32` (checked policy only).
    #[error("arithmetic overflow in {a} {op} {b}")]
    Overflow {
        /// Left operand.
        a: i32,
        /// Operator applied.
        op: Operator,
        /// Right operand.
        b: i32,
    },
}

/// How results that do not fit in 32 bits are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Two's-complement wraparound. `i32::MIN / -1` yields `i32::MIN`.
    #[default]
    Wrapping,
    /// Report [`EvalError::Overflow`].
    Checked,
}

/// Binary integer evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluator {
    /// Overflow handling for every operator.
    pub policy: OverflowPolicy,
}

impl Evaluator {
    /// Evaluator with the given overflow policy.
    pub fn new(policy: OverflowPolicy) -> Self {
        Self { policy }
    }

    /// Parse `code` and apply it to `a` and `b`.
    pub fn evaluate(&self, a: i32, b: i32, code: char) -> Result<i32, EvalError> {
        let op = Operator::from_code(code);
        assert_invariant(
            EVAL_REJECTS_UNKNOWN,
            op.is_ok() == matches!(code, '+' | '-' | '*' | '/'),
            "Only + - * / select an operation",
            Some("evaluate"),
        );
        self.apply(a, b, op?)
    }

    /// Apply an already-parsed operator.
    pub fn apply(&self, a: i32, b: i32, op: Operator) -> Result<i32, EvalError> {
        if op == Operator::Divide && b == 0 {
            assert_invariant(EVAL_DIVISION_GUARD, true, "Zero divisor rejected", Some("apply"));
            return Err(EvalError::DivisionByZero);
        }
        assert_invariant(EVAL_DISPATCH, true, "Operator dispatched", Some("apply"));

        match self.policy {
            OverflowPolicy::Wrapping => Ok(match op {
                Operator::Add => a.wrapping_add(b),
                Operator::Subtract => a.wrapping_sub(b),
                Operator::Multiply => a.wrapping_mul(b),
                Operator::Divide => a.wrapping_div(b),
            }),
            OverflowPolicy::Checked => {
                let value = match op {
                    Operator::Add => a.checked_add(b),
                    Operator::Subtract => a.checked_sub(b),
                    Operator::Multiply => a.checked_mul(b),
                    Operator::Divide => a.checked_div(b),
                };
                value.ok_or(EvalError::Overflow { a, op, b })
            }
        }
    }
}

/// Evaluate with the default (wrapping) evaluator.
pub fn evaluate(a: i32, b: i32, code: char) -> Result<i32, EvalError> {
    Evaluator::default().evaluate(a, b, code)
}
