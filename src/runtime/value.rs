use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric runtime value
///
/// Integer literals and integer arithmetic stay `Int`; anything touched by a
/// real operand or by `/` becomes `Real`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating-point value
    Real(f64),
}

impl Number {
    /// Get the type name of this value
    pub fn type_name(&self) -> String {
        match self {
            Number::Int(_) => "INTEGER",
            Number::Real(_) => "REAL",
        }
        .to_string()
    }

    /// Whether this value carries the integer tag
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Value widened to a float
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(n) => n as f64,
            Number::Real(r) => r,
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(r: f64) -> Self {
        Number::Real(r)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Number::Int(n) => write!(f, "{}", n),
            // Keep a fractional part so reals never read as integers
            Number::Real(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{:.1}", r),
            Number::Real(r) => write!(f, "{}", r),
        }
    }
}
