//! Money types with exact micro-unit arithmetic
//!
//! Pot amounts are held as a signed count of micro-units (1e-6 of the pot's
//! base unit). Arithmetic inside the settlement engine is exact integer
//! arithmetic; rounding happens in one place only, when a decimal value
//! crosses into `Money` through [`Money::from_decimal`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Number of decimal places kept for every monetary value
pub const MICRO_SCALE: u32 = 6;

/// Micro-units per whole base unit
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Errors that can occur during money operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow during calculation")]
    Overflow,
}

/// Rounds a decimal to micro-unit precision, half away from zero.
///
/// This is the only rounding function used by the engine, so identical
/// inputs always produce bit-identical amounts.
pub fn round_to_micro(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MICRO_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// A monetary amount in the pot's base currency
///
/// Serializes as a decimal and deserializes from either a JSON number or a
/// decimal string, so application snapshots load without conversion.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(i64);

impl Money {
    /// The zero amount
    pub const ZERO: Money = Money(0);

    /// One micro-unit, the default settlement tolerance
    pub const TOLERANCE: Money = Money(1);

    /// Creates money from a raw micro-unit count
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Creates money from a whole number of base units
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(MICROS_PER_UNIT))
    }

    /// Converts a decimal amount, rounding to micro-unit precision
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the amount does not fit in the
    /// micro-unit range.
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        round_to_micro(amount)
            .checked_mul(Decimal::from(MICROS_PER_UNIT))
            .and_then(|micros| micros.to_i64())
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Returns the zero amount
    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Returns the raw micro-unit count
    pub fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the amount as an exact decimal in base units
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, MICRO_SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value
    pub fn abs(&self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// True when the amount is within `tolerance` of zero
    pub fn is_within(&self, tolerance: Money) -> bool {
        self.abs() <= tolerance
    }

    /// Checked addition
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Multiplies by a whole count, e.g. a per-person share times members
    pub fn checked_mul(&self, count: i64) -> Result<Money, MoneyError> {
        self.0
            .checked_mul(count)
            .map(Self)
            .ok_or(MoneyError::Overflow)
    }

    /// Divides into `parts` equal shares, rounding each share to micro-units
    ///
    /// The shares are not remainder-adjusted: `parts * share` may differ from
    /// the original amount by up to half a micro-unit per part.
    pub fn divide_evenly(&self, parts: u32) -> Result<Money, MoneyError> {
        if parts == 0 {
            return Err(MoneyError::DivisionByZero);
        }
        Self::from_decimal(self.to_decimal() / Decimal::from(parts))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal().normalize())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| MoneyError::InvalidAmount(format!("{s:?}: {e}")))?;
        Self::from_decimal(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.to_decimal()
    }
}

// Operators saturate at the i64 bounds; use the checked_* methods where an
// overflow must surface as an error.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
