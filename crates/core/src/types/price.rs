//! Type-safe price representation using decimal arithmetic.
//!
//! The shop API transmits prices as JSON numbers. They are parsed into a
//! [`Decimal`] so that cart and order totals add up exactly.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in the shop's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the price is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Price of `quantity` units at this unit price, saturating at the
    /// largest representable amount.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::str::FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<Decimal>().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price, "19.99".parse().unwrap());

        let price: Price = serde_json::from_str("250").unwrap();
        assert_eq!(price, Price::from(250));
    }

    #[test]
    fn test_serialize_as_json_number() {
        let price: Price = "12.5".parse().unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "12.5");
    }

    #[test]
    fn test_times_and_sum() {
        let a: Price = "19.99".parse().unwrap();
        let b: Price = "0.01".parse().unwrap();
        let total: Price = [a * 3, b.times(1)].into_iter().sum();
        assert_eq!(total, "59.98".parse().unwrap());
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::from(5).to_string(), "5.00");
        assert_eq!("1.5".parse::<Price>().unwrap().to_string(), "1.50");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Price::new(Decimal::MAX);
        assert_eq!(max.times(u32::MAX), max);
        assert_eq!(max + Price::from(1_u32), max);
    }
}
