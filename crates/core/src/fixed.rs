//! Fixed-point arithmetic implementation
//!
//! Provides a Fixed structure that supports numerical values up to
//! 999999.999999999999, catering to the precision needs of financial calculations.

use rust_decimal::{Decimal, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::ops::{Add, Sub, Mul, Div, AddAssign, SubAssign, MulAssign, DivAssign};
use std::str::FromStr;

/// Fixed-point decimal type for precise financial calculations
///
/// Supports values up to 999999.999999999999 with exact decimal precision
/// to avoid floating-point errors. Serialized transparently, so exchange
/// JSON fields (string or number form) map straight onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fixed {
    value: Decimal,
}

impl Fixed {
    /// Maximum value: 999999.999999999999
    pub fn max() -> Self {
        Fixed {
            value: Decimal::new(999999999999999999i64, 12),
        }
    }

    /// Minimum value: -999999.999999999999
    pub fn min() -> Self {
        Fixed {
            value: Decimal::new(-999999999999999999i64, 12),
        }
    }

    /// Zero value
    pub const ZERO: Fixed = Fixed {
        value: Decimal::ZERO,
    };

    /// One value
    pub const ONE: Fixed = Fixed {
        value: Decimal::ONE,
    };

    /// Create a new Fixed from a Decimal
    pub fn from_decimal(value: Decimal) -> Result<Self, FixedError> {
        let fixed = Fixed { value };

        if fixed > Self::max() || fixed < Self::min() {
            return Err(FixedError::OutOfRange);
        }

        Ok(fixed)
    }

    /// Create a Fixed from an integer
    pub fn from_i64(value: i64) -> Result<Self, FixedError> {
        Self::from_decimal(Decimal::from(value))
    }

    /// Create a Fixed from a float (use with caution)
    pub fn from_f64(value: f64) -> Result<Self, FixedError> {
        let decimal = Decimal::try_from(value)
            .map_err(|_| FixedError::InvalidValue)?;
        Self::from_decimal(decimal)
    }

    /// Create a Fixed from a string
    pub fn from_str_exact(s: &str) -> Result<Self, FixedError> {
        let decimal = Decimal::from_str(s)
            .map_err(|_| FixedError::InvalidValue)?;
        Self::from_decimal(decimal)
    }

    /// Get the underlying Decimal value
    pub fn to_decimal(&self) -> Decimal {
        self.value
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }

    /// Convert to i64 if the value is integral and in range
    pub fn to_i64(&self) -> Option<i64> {
        if self.value.fract().is_zero() {
            self.value.to_i64()
        } else {
            None
        }
    }

    /// Check if the value is zero
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Check if the value is positive
    pub fn is_positive(&self) -> bool {
        self.value.is_sign_positive()
    }

    /// Check if the value is negative
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative()
    }

    /// Get the absolute value
    pub fn abs(&self) -> Self {
        Fixed {
            value: self.value.abs(),
        }
    }

    /// Round to specified decimal places
    ///
    /// Midpoints round to even, matching the exchange's contract sizing.
    pub fn round_dp(&self, dp: u32) -> Self {
        Fixed {
            value: self.value.round_dp(dp),
        }
    }

    /// Largest integral value not greater than self
    pub fn floor(&self) -> Self {
        Fixed {
            value: self.value.floor(),
        }
    }

    /// Truncate to specified decimal places
    pub fn trunc_with_scale(&self, scale: u32) -> Self {
        Fixed {
            value: self.value.trunc_with_scale(scale),
        }
    }
}

/// Fixed-point arithmetic errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixedError {
    #[error("Value out of range (max: 999999.999999999999)")]
    OutOfRange,
    #[error("Invalid value")]
    InvalidValue,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Overflow in arithmetic operation")]
    Overflow,
}

// Arithmetic implementations
impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value + rhs.value,
        }
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value - rhs.value,
        }
    }
}

impl Mul for Fixed {
    type Output = Fixed;

    fn mul(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value * rhs.value,
        }
    }
}

impl Div for Fixed {
    type Output = Fixed;

    fn div(self, rhs: Self) -> Self::Output {
        Fixed {
            value: self.value / rhs.value,
        }
    }
}

// Assignment operators
impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl SubAssign for Fixed {
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl MulAssign for Fixed {
    fn mul_assign(&mut self, rhs: Self) {
        self.value *= rhs.value;
    }
}

impl DivAssign for Fixed {
    fn div_assign(&mut self, rhs: Self) {
        self.value /= rhs.value;
    }
}

impl Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Fixed {
    type Err = FixedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_exact(s)
    }
}

impl From<Decimal> for Fixed {
    fn from(value: Decimal) -> Self {
        Fixed { value }
    }
}

impl From<Fixed> for Decimal {
    fn from(fixed: Fixed) -> Self {
        fixed.value
    }
}

/// Convenience macro for creating Fixed values
#[macro_export]
macro_rules! fixed {
    ($value:expr) => {
        $crate::fixed::Fixed::from_str_exact(stringify!($value)).unwrap()
    };
}
