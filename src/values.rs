//! Plain value types with no lifecycle of their own.

use std::fmt;

/// Buffer size used by the default run.
pub const DEFAULT_SLOTS: usize = 100;

/// Multiplier applied by [`quick_math`].
pub const QUICK_FACTOR: i32 = 42;

/// Account record: a name, a balance, and an interest rate in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAccount {
    /// Account holder.
    pub name: String,
    /// Whole-unit balance.
    pub balance: i32,
    /// Interest rate in percent.
    pub interest_rate: f32,
}

impl UserAccount {
    pub fn new(name: impl Into<String>, balance: i32, interest_rate: f32) -> Self {
        Self {
            name: name.into(),
            balance,
            interest_rate,
        }
    }
}

impl fmt::Display for UserAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (balance {}, rate {:.1}%)",
            self.name, self.balance, self.interest_rate
        )
    }
}

/// One of four display colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
}

/// A number tagged with its representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i32),
    Float(f32),
    Char(char),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) => write!(f, "{}", v),
            Number::Char(v) => write!(f, "{}", v),
        }
    }
}

/// `x * 42`, wrapping at 32 bits.
pub const fn quick_math(x: i32) -> i32 {
    x.wrapping_mul(QUICK_FACTOR)
}
