use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Absolute tolerance used when comparing floating-point results.
pub const TOLERANCE: f64 = 0.0001;

/// A signed numeric operand: an integer or a floating-point value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Adds two numbers.
///
/// Integer operands produce an integer. If either operand is floating-point
/// the result is floating-point. An integer sum outside the `i64` range is
/// promoted to the nearest `f64`.
pub fn add(a: impl Into<Number>, b: impl Into<Number>) -> Number {
    a.into() + b.into()
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Two integers compare exactly; anything involving a float compares
    /// by absolute difference below `tolerance`.
    pub fn approx_eq(self, other: Number, tolerance: f64) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (a, b) => (a.as_f64() - b.as_f64()).abs() < tolerance,
        }
    }
}

impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(v)
    }
}

impl From<i32> for Number {
    fn from(v: i32) -> Self {
        Number::Int(v.into())
    }
}

impl From<u32> for Number {
    fn from(v: u32) -> Self {
        Number::Int(v.into())
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float(v.into())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{}", v),
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_sum_stays_integer() {
        assert_eq!(add(2, 2), Number::Int(4));
        assert_eq!(add(-5, -3), Number::Int(-8));
        assert_eq!(add(1_000_000, 2_000_000), Number::Int(3_000_000));
    }

    #[test]
    fn test_float_operand_promotes() {
        assert!(add(2.5, 3.7).is_float());
        assert!(add(1, 0.5).is_float());
        assert!(add(0.5, 1).is_float());
        assert_eq!(add(1, 0.5), Number::Float(1.5));
    }

    #[test]
    fn test_float_sum_within_tolerance() {
        let result = add(2.5, 3.7);
        assert!(result.approx_eq(Number::Float(6.2), TOLERANCE));
        assert!(!result.approx_eq(Number::Float(6.3), TOLERANCE));
    }

    #[test]
    fn test_nested_add() {
        assert_eq!(add(add(1, 2), 3), Number::Int(6));
    }

    #[test]
    fn test_overflow_promotes_to_float() {
        let result = add(i64::MAX, 1);
        assert!(result.is_float());
        assert_eq!(result.as_f64(), i64::MAX as f64 + 1.0);

        let result = add(i64::MIN, -1);
        assert!(result.is_float());
        assert!(result.as_f64() < 0.0);
    }

    #[test]
    fn test_integers_compare_exactly() {
        assert!(Number::Int(20).approx_eq(Number::Int(20), TOLERANCE));
        assert!(!Number::Int(20).approx_eq(Number::Int(21), 10.0));
        assert!(Number::Int(20).approx_eq(Number::Float(20.00001), TOLERANCE));
    }

    #[test]
    fn test_display() {
        assert_eq!(Number::Int(-8).to_string(), "-8");
        assert_eq!(Number::Float(6.2).to_string(), "6.2");
        assert_eq!(Number::Float(4.0).to_string(), "4.0");
        assert_eq!(Number::Float(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Number::Int(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Number::Float(6.2)).unwrap(), "6.2");
        let parsed: Number = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, Number::Int(7));
    }
}
