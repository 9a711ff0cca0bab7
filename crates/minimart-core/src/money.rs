//! # Money
//!
//! Integer-cent monetary values.
//!
//! ## Why Integer Money?
//! Floating-point prices make totals drift (`0.1 + 0.2 != 0.3`). Every
//! monetary value here is an i64 count of the smallest currency unit; the
//! database, the API and all report arithmetic stay exact. Only a display
//! layer ever converts to a decimal string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A monetary value in cents. Signed so margins and corrections can go
/// negative.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity, saturating instead of wrapping on overflow.
    ///
    /// A single line of `i64::MAX` cents is already nonsense; saturation
    /// keeps the arithmetic total-order sane without a panic path.
    #[inline]
    pub const fn times(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Add for Money {
    type Output = Money;
    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;
    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Mul<i64> for Money {
    type Output = Money;
    #[inline]
    fn mul(self, rhs: i64) -> Money {
        self.times(rhs)
    }
}

impl Neg for Money {
    type Output = Money;
    #[inline]
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Formats as a plain decimal amount, e.g. `12.34` or `-0.05`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_exact() {
        let price = Money::from_cents(500);
        assert_eq!((price * 2).cents(), 1000);
        assert_eq!((price + Money::from_cents(3)).cents(), 503);
        assert_eq!((price - Money::from_cents(700)).cents(), -200);
    }

    #[test]
    fn sum_of_lines() {
        let total: Money = [Money::from_cents(500), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 750);
    }

    #[test]
    fn display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn serde_is_transparent() {
        let m = Money::from_cents(250);
        assert_eq!(serde_json::to_string(&m).unwrap(), "250");
        let back: Money = serde_json::from_str("250").unwrap();
        assert_eq!(back, m);
    }
}
