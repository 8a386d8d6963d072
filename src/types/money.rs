//! Exact fixed-point monetary amounts
//!
//! Amounts are non-negative decimals with at most two fractional digits
//! (the currency's smallest denomination) and at most 26 integer digits.
//! Arithmetic is exact and checked: a sum or product that leaves the
//! supported range is an `InvalidAmount`, never a panic or a rounded value.

use crate::errors::{ValidationError, ValidationResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of fractional digits carried by every amount
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Amounts stay below 10^26 so they fit Decimal's 96-bit mantissa at cent scale
pub const MAX_INTEGER_DIGITS: u32 = 26;

/// Non-negative monetary amount with cent precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    pub const ZERO: MonetaryAmount = MonetaryAmount(Decimal::ZERO);

    /// Parse a decimal string such as `"1000"`, `"19.9"` or `"0.05"`
    pub fn parse(input: &str) -> ValidationResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::amount(input, "empty amount"));
        }
        // Decimal::from_str also accepts exponents and underscores; cents only
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
        {
            return Err(ValidationError::amount(input, "not a plain decimal number"));
        }
        let value = Decimal::from_str(trimmed)
            .map_err(|e| ValidationError::amount(input, e.to_string()))?;
        Self::from_decimal(value).map_err(|e| match e {
            ValidationError::InvalidAmount { reason, .. } => {
                ValidationError::amount(input, reason)
            }
            other => other,
        })
    }

    /// Wrap an existing decimal, enforcing sign, scale and magnitude
    ///
    /// The scale is checked as written: `12.500` carries three fractional
    /// digits and is rejected.
    pub fn from_decimal(value: Decimal) -> ValidationResult<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::amount(value.to_string(), "negative amount"));
        }
        if value.scale() > MINOR_UNIT_SCALE {
            return Err(ValidationError::amount(
                value.to_string(),
                format!("more than {} fractional digits", MINOR_UNIT_SCALE),
            ));
        }
        Self::bounded(value.abs(), || value.to_string())
    }

    /// Amount from an integer count of minor units (cents)
    pub fn from_minor_units(minor_units: u64) -> Self {
        Self(Decimal::from_i128_with_scale(
            minor_units as i128,
            MINOR_UNIT_SCALE,
        ))
    }

    /// Integer count of minor units (cents)
    pub fn minor_units(&self) -> i128 {
        self.0.mantissa()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact sum, or `InvalidAmount` when it leaves the supported range
    pub fn checked_add(self, rhs: MonetaryAmount) -> ValidationResult<Self> {
        let describe = || format!("{} + {}", self, rhs);
        let sum = self
            .0
            .checked_add(rhs.0)
            .ok_or_else(|| ValidationError::amount(describe(), "sum overflows"))?;
        Self::bounded(sum, describe)
    }

    /// Multiply by a line quantity
    pub fn checked_times(self, quantity: u64) -> ValidationResult<Self> {
        let describe = || format!("{} × {}", self, quantity);
        let product = self
            .0
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| ValidationError::amount(describe(), "product overflows"))?;
        Self::bounded(product, describe)
    }

    /// Exact sum of a sequence of amounts, zero when empty
    pub fn checked_sum<I>(amounts: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = MonetaryAmount>,
    {
        amounts
            .into_iter()
            .try_fold(MonetaryAmount::ZERO, MonetaryAmount::checked_add)
    }

    /// Lossy conversion for charting only
    pub fn to_f64_lossy(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }

    fn bounded<F>(value: Decimal, describe: F) -> ValidationResult<Self>
    where
        F: FnOnce() -> String,
    {
        let limit = Decimal::from_i128_with_scale(10_i128.pow(MAX_INTEGER_DIGITS), 0);
        if value >= limit {
            return Err(ValidationError::amount(
                describe(),
                format!("{} or more integer digits", MAX_INTEGER_DIGITS + 1),
            ));
        }
        Ok(Self::rescaled(value))
    }

    fn rescaled(mut value: Decimal) -> Self {
        value.rescale(MINOR_UNIT_SCALE);
        Self(value)
    }
}

impl FromStr for MonetaryAmount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(MINOR_UNIT_SCALE);
        write!(f, "{}", value)
    }
}

impl Serialize for MonetaryAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct MonetaryAmountVisitor;

impl<'de> Visitor<'de> for MonetaryAmountVisitor {
    type Value = MonetaryAmount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        MonetaryAmount::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        MonetaryAmount::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        MonetaryAmount::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        // Shortest round-trip representation, then the usual scale check
        MonetaryAmount::parse(&v.to_string()).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for MonetaryAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MonetaryAmountVisitor)
    }
}
