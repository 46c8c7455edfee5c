//! USD amounts backed by `rust_decimal`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg};

/// A USD amount with cent precision. Prices are never negative; billing
/// deltas can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Whole-dollar amount.
    pub fn dollars(amount: u64) -> Self {
        Money(Decimal::from(amount))
    }

    pub fn from_decimal(amount: Decimal) -> Self {
        Money(amount.round_dp(2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// `self × count`, rounded to cents.
    pub fn times(self, count: u64) -> Self {
        Money((self.0 * Decimal::from(count)).round_dp(2))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money((self.0 + rhs.0).round_dp(2))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, rhs: u64) -> Money {
        self.times(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money::from_decimal(amount)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        let magnitude = self.0.abs();
        let normalized = magnitude.normalize();
        if normalized.scale() == 0 {
            write!(f, "${}", normalized)
        } else {
            write!(f, "${:.2}", magnitude)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_whole_and_fractional() {
        assert_eq!(Money::dollars(109).to_string(), "$109");
        assert_eq!(Money::ZERO.to_string(), "$0");
        let half = Money::from_decimal(Decimal::from_str("109.5").unwrap());
        assert_eq!(half.to_string(), "$109.50");
    }

    #[test]
    fn negative_deltas() {
        let refund = -Money::dollars(10);
        assert!(refund.is_negative());
        assert!(!Money::ZERO.is_negative());
        assert_eq!(refund.to_string(), "-$10");
        assert_eq!(refund.abs(), Money::dollars(10));
        assert_eq!(Money::dollars(119) + refund, Money::dollars(109));
    }

    #[test]
    fn arithmetic_rounds_to_cents() {
        let price = Money::from_decimal(Decimal::from_str("0.333").unwrap());
        assert_eq!(price.amount(), Decimal::from_str("0.33").unwrap());
        assert_eq!(Money::dollars(10) * 2 + Money::dollars(99), Money::dollars(119));
        let total: Money = [Money::dollars(1), Money::dollars(2)].into_iter().sum();
        assert_eq!(total, Money::dollars(3));
    }
}
