//! Exact decimal monetary value.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! `MonetaryValue` wraps `rust_decimal::Decimal` (28 fractional digits of
//! working precision). Floats only appear at the edges: `from_number` on the
//! way in, `to_number` on the way out for non-decimal consumers.
//!
//! Addition, subtraction and multiplication are exact. Only `divide` and
//! `round` bring a value down to the display scale of two decimals, always
//! rounding half away from zero.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use rust_decimal::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::{MoneyError, MoneyResult};

/// Number of fractional digits used for display and rounding.
pub const SCALE: u32 = 2;

/// Largest number of fractional digits `to_fixed` renders.
const MAX_PLACES: u32 = 28;

/// Round half up: ties go to the larger magnitude.
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// An immutable, exact monetary quantity.
///
/// Equality, ordering and hashing use the full internal precision and ignore
/// how the value was built: `1.5` parsed from a string equals `1.50` built
/// from a float.
///
/// # Example
///
/// ```
/// use monto_shared::MonetaryValue;
///
/// let price = MonetaryValue::from_string("10.00").unwrap();
/// let share = price.divide(3).unwrap();
/// assert_eq!(share.to_string(), "3.33");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonetaryValue {
    amount: Decimal,
}

/// Right-hand side of `multiply` and `divide`.
///
/// Either another monetary value or a plain exact number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Another monetary value.
    Money(MonetaryValue),
    /// A plain decimal factor or divisor.
    Scalar(Decimal),
}

impl Operand {
    const fn into_decimal(self) -> Decimal {
        match self {
            Self::Money(value) => value.amount,
            Self::Scalar(value) => value,
        }
    }
}

impl From<MonetaryValue> for Operand {
    fn from(value: MonetaryValue) -> Self {
        Self::Money(value)
    }
}

impl From<&MonetaryValue> for Operand {
    fn from(value: &MonetaryValue) -> Self {
        Self::Money(*value)
    }
}

impl From<Decimal> for Operand {
    fn from(value: Decimal) -> Self {
        Self::Scalar(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl From<u32> for Operand {
    fn from(value: u32) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

impl From<usize> for Operand {
    fn from(value: usize) -> Self {
        Self::Scalar(Decimal::from(value))
    }
}

/// Presentation settings for `MonetaryValue::format_with`.
///
/// Display only. Formatted strings must never be parsed back into arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    /// Currency symbol placed before the digits.
    pub symbol: String,
    /// Separator between groups of three integer digits.
    pub group_separator: String,
    /// Separator between integer and fractional digits.
    pub decimal_separator: String,
    /// Fraction digits to render; never fewer than two.
    pub fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            fraction_digits: SCALE,
        }
    }
}

impl MonetaryValue {
    /// Additive identity.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Multiplicative identity.
    pub const ONE: Self = Self {
        amount: Decimal::ONE,
    };

    /// Wraps an exact decimal.
    #[must_use]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Builds a value from a float.
    ///
    /// The float is read through its shortest round-trip rendering, so
    /// `from_number(0.1)` equals `from_string("0.1")` rather than the binary
    /// expansion of 0.1.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidValue` for NaN, infinities, and magnitudes
    /// outside the decimal range.
    pub fn from_number(value: f64) -> MoneyResult<Self> {
        if !value.is_finite() {
            return Err(MoneyError::InvalidValue(format!("{value} is not finite")));
        }
        // f64 Display never uses an exponent.
        Decimal::from_str(&value.to_string())
            .map(Self::from_decimal)
            .map_err(|_| MoneyError::InvalidValue(format!("{value} is out of range")))
    }

    /// Parses a decimal string such as `"10.50"`, `"-3"` or `"1.5e3"`.
    ///
    /// Surrounding whitespace and a single leading `+` are accepted.
    /// Scientific input is expanded to plain digits first, so `"1e-30"`
    /// follows the same precision rules as `"0.000000000000000000000000000001"`:
    /// digits beyond the 28th decimal place are rounded away.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidValue` on empty or whitespace-only input
    /// and on anything that is not a finite decimal.
    pub fn from_string(value: &str) -> MoneyResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(MoneyError::InvalidValue("empty string".to_string()));
        }

        let invalid = || MoneyError::InvalidValue(format!("'{trimmed}' is not a decimal number"));

        let unsigned = match trimmed.strip_prefix('+') {
            Some(rest) if rest.starts_with('-') => return Err(invalid()),
            Some(rest) => rest,
            None => trimmed,
        };

        // rust_decimal tolerates `_` separators; the wire format does not.
        if !unsigned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        {
            return Err(invalid());
        }

        let plain = if unsigned.contains(['e', 'E']) {
            expand_exponent(unsigned).ok_or_else(invalid)?
        } else {
            unsigned.to_string()
        };

        Decimal::from_str(&plain)
            .map(Self::from_decimal)
            .map_err(|_| invalid())
    }

    /// Returns the underlying decimal at full precision.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.amount
    }

    /// Lossy conversion to a float for non-decimal consumers such as charts.
    ///
    /// Never feed the result back into exact arithmetic.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        // Parsing the decimal rendering gives the nearest float; the direct
        // conversion is kept only as a fallback.
        self.amount
            .to_string()
            .parse()
            .unwrap_or_else(|_| self.amount.to_f64().unwrap_or_default())
    }

    /// Renders the value with exactly `places` fractional digits.
    ///
    /// Rounds half away from zero and never renders a negative zero.
    /// `places` is clamped to 28, the largest scale a `Decimal` carries.
    #[must_use]
    pub fn to_fixed(&self, places: u32) -> String {
        let places = places.min(MAX_PLACES);
        let mut rounded = self.amount.round_dp_with_strategy(places, ROUNDING);
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }

        // Padded as text: `rescale` cannot widen a mantissa that is already
        // near the 96-bit limit.
        let text = rounded.to_string();
        let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        let width = usize::try_from(places).unwrap_or_default();
        if width == 0 {
            integer.to_string()
        } else {
            format!("{integer}.{fraction:0<width$}")
        }
    }

    /// Localized currency string using the default format (`$1,234.56`).
    #[must_use]
    pub fn format(&self) -> String {
        self.format_with(&CurrencyFormat::default())
    }

    /// Localized currency string using the given format.
    #[must_use]
    pub fn format_with(&self, format: &CurrencyFormat) -> String {
        let digits = format.fraction_digits.max(SCALE);
        let rounded = self.amount.round_dp_with_strategy(digits, ROUNDING);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let fixed = Self::from_decimal(rounded.abs()).to_fixed(digits);
        let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let grouped = group_digits(integer, &format.group_separator);

        format!(
            "{sign}{}{grouped}{}{fraction}",
            format.symbol, format.decimal_separator
        )
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if the amount is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    // ---------------------------------------------------------------------
    // Arithmetic
    // ---------------------------------------------------------------------

    /// Exact sum.
    ///
    /// # Panics
    ///
    /// Panics if the result leaves the decimal range; see `checked_add`.
    #[allow(clippy::should_implement_trait)]
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::from_decimal(self.amount + other.amount)
    }

    /// Exact difference.
    ///
    /// # Panics
    ///
    /// Panics if the result leaves the decimal range; see `checked_subtract`.
    #[must_use]
    pub fn subtract(self, other: Self) -> Self {
        Self::from_decimal(self.amount - other.amount)
    }

    /// Exact product with a plain number or another monetary value.
    ///
    /// # Panics
    ///
    /// Panics if the result leaves the decimal range; see `checked_multiply`.
    #[must_use]
    pub fn multiply(self, factor: impl Into<Operand>) -> Self {
        Self::from_decimal(self.amount * factor.into().into_decimal())
    }

    /// Quotient rounded half up to two decimals.
    ///
    /// This is the only ordinary arithmetic operation that rounds.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::DivisionByZero` if the divisor is exactly zero and
    /// `MoneyError::Overflow` if the quotient is out of range.
    pub fn divide(self, divisor: impl Into<Operand>) -> MoneyResult<Self> {
        let divisor = divisor.into().into_decimal();
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = self
            .amount
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow("divide"))?;
        Ok(Self::from_decimal(
            quotient.round_dp_with_strategy(SCALE, ROUNDING),
        ))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::from_decimal(self.amount.abs())
    }

    /// Sign flip.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::from_decimal(-self.amount)
    }

    /// Realizes the value at display precision, rounding half up.
    #[must_use]
    pub fn round(self) -> Self {
        Self::from_decimal(self.amount.round_dp_with_strategy(SCALE, ROUNDING))
    }

    /// Exact sum, or `MoneyError::Overflow` instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the sum is out of range.
    pub fn checked_add(self, other: Self) -> MoneyResult<Self> {
        self.amount
            .checked_add(other.amount)
            .map(Self::from_decimal)
            .ok_or(MoneyError::Overflow("add"))
    }

    /// Exact difference, or `MoneyError::Overflow` instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the difference is out of range.
    pub fn checked_subtract(self, other: Self) -> MoneyResult<Self> {
        self.amount
            .checked_sub(other.amount)
            .map(Self::from_decimal)
            .ok_or(MoneyError::Overflow("subtract"))
    }

    /// Exact product, or `MoneyError::Overflow` instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the product is out of range.
    pub fn checked_multiply(self, factor: impl Into<Operand>) -> MoneyResult<Self> {
        self.amount
            .checked_mul(factor.into().into_decimal())
            .map(Self::from_decimal)
            .ok_or(MoneyError::Overflow("multiply"))
    }

    // ---------------------------------------------------------------------
    // Comparison (full precision, never the display form)
    // ---------------------------------------------------------------------

    /// Value equality at full precision.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns true if `self > other`.
    #[must_use]
    pub fn greater_than(&self, other: &Self) -> bool {
        self > other
    }

    /// Returns true if `self >= other`.
    #[must_use]
    pub fn greater_than_or_equal(&self, other: &Self) -> bool {
        self >= other
    }

    /// Returns true if `self < other`.
    #[must_use]
    pub fn less_than(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns true if `self <= other`.
    #[must_use]
    pub fn less_than_or_equal(&self, other: &Self) -> bool {
        self <= other
    }
}

/// Rewrites an exponent-form number (`-1.5e-3`) as plain digits
/// (`-0.0015`).
///
/// Returns `None` for malformed input or a magnitude of `1e29` or more,
/// which no `Decimal` can hold.
fn expand_exponent(value: &str) -> Option<String> {
    let (mantissa, exponent) = value.split_once(['e', 'E'])?;
    let exponent: i64 = exponent.parse().ok()?;
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (integer, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !integer.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{integer}{fraction}");
    let significant = digits.trim_start_matches('0');
    let leading_zeros = i64::try_from(digits.len() - significant.len()).ok()?;
    let len = i64::try_from(significant.len()).ok()?;
    // Position of the decimal point relative to the first significant digit.
    let point = i64::try_from(integer.len())
        .ok()?
        .checked_add(exponent)?
        .checked_sub(leading_zeros)?;

    if significant.is_empty() || point <= -i64::from(MAX_PLACES) - 1 {
        // Below 1e-29 everything rounds to zero.
        return Some("0".to_string());
    }
    if point > i64::from(MAX_PLACES) + 1 {
        return None;
    }

    let plain = if point <= 0 {
        let zeros = "0".repeat(usize::try_from(-point).ok()?);
        format!("{sign}0.{zeros}{significant}")
    } else if point >= len {
        let zeros = "0".repeat(usize::try_from(point - len).ok()?);
        format!("{sign}{significant}{zeros}")
    } else {
        let (whole, part) = significant.split_at(usize::try_from(point).ok()?);
        format!("{sign}{whole}.{part}")
    };
    Some(plain)
}

/// Inserts `separator` between groups of three digits, counting from the right.
fn group_digits(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

impl fmt::Display for MonetaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_fixed(SCALE))
    }
}

impl FromStr for MonetaryValue {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl From<Decimal> for MonetaryValue {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}

impl From<i64> for MonetaryValue {
    fn from(value: i64) -> Self {
        Self::from_decimal(Decimal::from(value))
    }
}

impl From<MonetaryValue> for Decimal {
    fn from(value: MonetaryValue) -> Self {
        value.amount
    }
}

impl Add for MonetaryValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        MonetaryValue::add(self, rhs)
    }
}

impl Sub for MonetaryValue {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(rhs)
    }
}

impl Neg for MonetaryValue {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl Mul<Decimal> for MonetaryValue {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        self.multiply(rhs)
    }
}

/// Panics if the total leaves the decimal range; `currency::sum` in
/// `monto-core` reports that as `MoneyError::Overflow` instead.
impl Sum for MonetaryValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a MonetaryValue> for MonetaryValue {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serializes as a plain JSON number, matching the wire representation.
impl Serialize for MonetaryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_number())
    }
}

/// Accepts a JSON number or a decimal string.
impl<'de> Deserialize<'de> for MonetaryValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MonetaryValueVisitor)
    }
}

struct MonetaryValueVisitor;

/// Key under which serde_json's `arbitrary_precision` feature hands over the
/// literal digits of a number.
const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

impl<'de> de::Visitor<'de> for MonetaryValueVisitor {
    type Value = MonetaryValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number or decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(MonetaryValue::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(MonetaryValue::from_decimal(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        MonetaryValue::from_number(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        MonetaryValue::from_string(v).map_err(E::custom)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        match map.next_key::<String>()? {
            Some(key) if key == JSON_NUMBER_TOKEN => {
                let digits: String = map.next_value()?;
                MonetaryValue::from_string(&digits).map_err(de::Error::custom)
            }
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}
