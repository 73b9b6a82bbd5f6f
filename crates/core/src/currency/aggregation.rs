//! Comparison and aggregation over collections of monetary values.
//!
//! Empty inputs never fail: `sum`, `average`, `max` and `min` all return
//! `MonetaryValue::ZERO` when given nothing. `sum` and `average` report a
//! total outside the decimal range as `MoneyError::Overflow`.

use std::cmp::Ordering;

use monto_shared::{MonetaryValue, MoneyError, MoneyResult};

/// Tri-state comparator at full precision.
///
/// `compare(a, b) as i8` yields -1, 0 or 1.
#[must_use]
pub fn compare(a: &MonetaryValue, b: &MonetaryValue) -> Ordering {
    if a.less_than(b) {
        Ordering::Less
    } else if a.greater_than(b) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Exact sum, seeded with zero.
///
/// # Errors
///
/// Returns `MoneyError::Overflow` if a running total leaves the decimal
/// range.
pub fn sum<'a>(
    values: impl IntoIterator<Item = &'a MonetaryValue>,
) -> MoneyResult<MonetaryValue> {
    values
        .into_iter()
        .try_fold(MonetaryValue::ZERO, |acc, value| acc.checked_add(*value))
}

/// Arithmetic mean rounded half up to two decimals.
///
/// Returns zero for an empty input.
///
/// # Errors
///
/// Returns `MoneyError::Overflow` if the total leaves the decimal range.
pub fn average<'a>(
    values: impl IntoIterator<Item = &'a MonetaryValue>,
) -> MoneyResult<MonetaryValue> {
    let (total, count) = values.into_iter().try_fold(
        (MonetaryValue::ZERO, 0usize),
        |(acc, count), value| Ok::<_, MoneyError>((acc.checked_add(*value)?, count + 1)),
    )?;

    if count == 0 {
        return Ok(MonetaryValue::ZERO);
    }

    total.divide(count)
}

/// Largest value, or zero for an empty input.
#[must_use]
pub fn max<'a>(values: impl IntoIterator<Item = &'a MonetaryValue>) -> MonetaryValue {
    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return MonetaryValue::ZERO;
    };
    *iter.fold(first, |best, value| {
        if value.greater_than(best) { value } else { best }
    })
}

/// Smallest value, or zero for an empty input.
#[must_use]
pub fn min<'a>(values: impl IntoIterator<Item = &'a MonetaryValue>) -> MonetaryValue {
    let mut iter = values.into_iter();
    let Some(first) = iter.next() else {
        return MonetaryValue::ZERO;
    };
    *iter.fold(first, |best, value| {
        if value.less_than(best) { value } else { best }
    })
}
