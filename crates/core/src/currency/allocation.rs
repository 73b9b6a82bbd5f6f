//! Splitting a total into parts without losing or creating cents.
//!
//! Two strategies are provided:
//! - `distribute`: equal split where the last part absorbs the rounding
//!   remainder (installment plans, equal payments)
//! - `allocate_by_ratios`: weighted split using the Largest Remainder Method
//!
//! Both guarantee the parts sum exactly back to the total.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use monto_shared::types::SCALE;
use monto_shared::{MonetaryValue, MoneyError, MoneyResult};

use super::aggregation::sum;

/// Splits `total` into `parts` pieces that sum exactly to `total`.
///
/// The first `parts - 1` pieces equal `total / parts` rounded half up to two
/// decimals. The last piece is whatever remains, so the entire rounding drift
/// lands in the final slot. A single part returns `total` untouched.
///
/// # Errors
///
/// Returns `MoneyError::InvalidArgument` if `parts` is zero and
/// `MoneyError::Overflow` if the leading pieces cannot be totalled.
///
/// # Example
///
/// ```
/// use monto_core::currency::distribute;
/// use monto_shared::MonetaryValue;
///
/// let total = MonetaryValue::from(1000);
/// let parts = distribute(total, 3).unwrap();
/// let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["333.33", "333.33", "333.34"]);
/// ```
pub fn distribute(total: MonetaryValue, parts: usize) -> MoneyResult<Vec<MonetaryValue>> {
    if parts == 0 {
        return Err(MoneyError::InvalidArgument(
            "parts must be a positive integer, got 0".to_string(),
        ));
    }
    if parts == 1 {
        return Ok(vec![total]);
    }

    let quotient = total.divide(parts)?;
    let mut pieces = vec![quotient; parts - 1];
    let last = total.checked_subtract(sum(&pieces)?)?;
    pieces.push(last);

    Ok(pieces)
}

/// Splits `total` proportionally to `ratios` using the Largest Remainder
/// Method.
///
/// The total is first rounded half up to two decimals. Each share is
/// truncated toward zero, then the leftover cents go one at a time to the
/// shares with the largest truncated fraction; ties favor the earlier share.
/// The result sums exactly to the rounded total.
///
/// # Errors
///
/// Returns `MoneyError::InvalidArgument` if `ratios` is empty, contains a
/// negative weight, or sums to zero, and `MoneyError::Overflow` if a share
/// cannot be represented.
///
/// # Example
///
/// ```
/// use monto_core::currency::allocate_by_ratios;
/// use monto_shared::MonetaryValue;
/// use rust_decimal_macros::dec;
///
/// let shares = allocate_by_ratios(MonetaryValue::from(100), &[dec!(1), dec!(1), dec!(1)]).unwrap();
/// let rendered: Vec<String> = shares.iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["33.34", "33.33", "33.33"]);
/// ```
pub fn allocate_by_ratios(
    total: MonetaryValue,
    ratios: &[Decimal],
) -> MoneyResult<Vec<MonetaryValue>> {
    if ratios.is_empty() {
        return Err(MoneyError::InvalidArgument(
            "ratios must not be empty".to_string(),
        ));
    }
    if ratios.iter().any(Decimal::is_sign_negative) {
        return Err(MoneyError::InvalidArgument(
            "ratios must not be negative".to_string(),
        ));
    }

    let weight = ratios
        .iter()
        .try_fold(Decimal::ZERO, |acc, ratio| acc.checked_add(*ratio))
        .ok_or(MoneyError::Overflow("allocate"))?;
    if weight.is_zero() {
        return Err(MoneyError::InvalidArgument(
            "ratios must not all be zero".to_string(),
        ));
    }

    let total_rounded = total.round().as_decimal();
    let unit = if total_rounded.is_sign_negative() {
        -Decimal::new(1, SCALE)
    } else {
        Decimal::new(1, SCALE)
    };

    // Exact shares
    let exact = ratios
        .iter()
        .map(|ratio| {
            total_rounded
                .checked_mul(*ratio)
                .and_then(|product| product.checked_div(weight))
                .ok_or(MoneyError::Overflow("allocate"))
        })
        .collect::<MoneyResult<Vec<Decimal>>>()?;

    // Truncate each toward zero
    let mut rounded: Vec<Decimal> = exact
        .iter()
        .map(|share| share.round_dp_with_strategy(SCALE, RoundingStrategy::ToZero))
        .collect();

    let allocated: Decimal = rounded.iter().copied().sum();
    let remainder = total_rounded - allocated;

    let units_to_distribute = (remainder / unit)
        .round_dp_with_strategy(0, RoundingStrategy::ToZero)
        .to_usize()
        .unwrap_or(0);

    if units_to_distribute > 0 {
        let mut remainders: Vec<(usize, Decimal)> = exact
            .iter()
            .zip(rounded.iter())
            .enumerate()
            .map(|(i, (e, r))| (i, (*e - *r).abs()))
            .collect();

        // Largest fraction first; stable sort keeps earlier shares ahead on ties
        remainders.sort_by(|a, b| b.1.cmp(&a.1));

        for (idx, _) in remainders.iter().take(units_to_distribute) {
            rounded[*idx] += unit;
        }
    }

    Ok(rounded.into_iter().map(MonetaryValue::from_decimal).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(value: Decimal) -> MonetaryValue {
        MonetaryValue::from_decimal(value)
    }

    // =========================================================================
    // distribute tests
    // =========================================================================

    #[test]
    fn test_distribute_zero_parts() {
        assert!(matches!(
            distribute(money(dec!(100)), 0),
            Err(MoneyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_distribute_single_part_is_untouched() {
        // No rounding introduced, even below display precision
        let total = money(dec!(10.005));
        assert_eq!(distribute(total, 1).unwrap(), vec![total]);
    }

    #[test]
    fn test_distribute_1000_by_3() {
        let result = distribute(money(dec!(1000)), 3).unwrap();
        assert_eq!(
            result,
            vec![money(dec!(333.33)), money(dec!(333.33)), money(dec!(333.34))]
        );
        assert_eq!(sum(&result), Ok(money(dec!(1000))));
    }

    #[test]
    fn test_distribute_even_split() {
        let result = distribute(money(dec!(100)), 4).unwrap();
        assert_eq!(result, vec![money(dec!(25)); 4]);
    }

    #[test]
    fn test_distribute_last_part_can_be_smaller() {
        // 0.05 / 3 = 0.0166.. rounds up to 0.02, so the last slot gets 0.01
        let result = distribute(money(dec!(0.05)), 3).unwrap();
        assert_eq!(
            result,
            vec![money(dec!(0.02)), money(dec!(0.02)), money(dec!(0.01))]
        );
    }

    #[test]
    fn test_distribute_sub_cent_total() {
        let result = distribute(money(dec!(0.01)), 3).unwrap();
        assert_eq!(result, vec![money(dec!(0)), money(dec!(0)), money(dec!(0.01))]);
    }

    #[test]
    fn test_distribute_negative_total() {
        let result = distribute(money(dec!(-100)), 3).unwrap();
        assert_eq!(
            result,
            vec![money(dec!(-33.33)), money(dec!(-33.33)), money(dec!(-33.34))]
        );
    }

    #[test]
    fn test_distribute_near_range_limit() {
        let total = MonetaryValue::from_string("79000000000000000000000000000").unwrap();
        let result = distribute(total, 3).unwrap();
        assert_eq!(sum(&result), Ok(total));
    }

    #[test]
    fn test_distribute_sum_invariant() {
        let test_cases = [
            (dec!(100), 3),
            (dec!(100), 7),
            (dec!(1000), 3),
            (dec!(1), 3),
            (dec!(0.01), 3),
            (dec!(999.99), 7),
            (dec!(12.345), 4),
        ];

        for (total, count) in test_cases {
            let result = distribute(money(total), count).unwrap();
            assert_eq!(result.len(), count);
            assert_eq!(
                sum(&result),
                Ok(money(total)),
                "Sum invariant failed for total={total}, count={count}"
            );
        }
    }

    // =========================================================================
    // allocate_by_ratios tests
    // =========================================================================

    #[test]
    fn test_allocate_by_ratios_rejects_bad_ratios() {
        let total = money(dec!(100));
        for ratios in [vec![], vec![dec!(1), dec!(-1)], vec![dec!(0), dec!(0)]] {
            assert!(matches!(
                allocate_by_ratios(total, &ratios),
                Err(MoneyError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_allocate_by_ratios_single() {
        let result = allocate_by_ratios(money(dec!(100)), &[dec!(7)]).unwrap();
        assert_eq!(result, vec![money(dec!(100))]);
    }

    #[test]
    fn test_allocate_by_ratios_uneven() {
        let ratios = [dec!(50), dec!(30), dec!(20)];
        let result = allocate_by_ratios(money(dec!(100)), &ratios).unwrap();
        assert_eq!(
            result,
            vec![money(dec!(50)), money(dec!(30)), money(dec!(20))]
        );
    }

    #[test]
    fn test_allocate_by_ratios_largest_remainder_wins() {
        // 10 split 1:2:3 → 1.666.., 3.333.., 5.00
        let ratios = [dec!(1), dec!(2), dec!(3)];
        let result = allocate_by_ratios(money(dec!(10)), &ratios).unwrap();
        assert_eq!(
            result,
            vec![money(dec!(1.67)), money(dec!(3.33)), money(dec!(5))]
        );
    }

    #[test]
    fn test_allocate_by_ratios_zero_weight_share() {
        let ratios = [dec!(0), dec!(1), dec!(1)];
        let result = allocate_by_ratios(money(dec!(0.03)), &ratios).unwrap();
        assert_eq!(
            result,
            vec![money(dec!(0)), money(dec!(0.02)), money(dec!(0.01))]
        );
    }

    #[test]
    fn test_allocate_by_ratios_negative_total() {
        let ratios = [dec!(1), dec!(1), dec!(1)];
        let result = allocate_by_ratios(money(dec!(-100)), &ratios).unwrap();
        assert_eq!(
            result,
            vec![money(dec!(-33.34)), money(dec!(-33.33)), money(dec!(-33.33))]
        );
    }

    #[test]
    fn test_allocate_by_ratios_rounds_total_first() {
        let ratios = [dec!(1), dec!(1)];
        let result = allocate_by_ratios(money(dec!(10.005)), &ratios).unwrap();
        assert_eq!(sum(&result), Ok(money(dec!(10.01))));
    }
}
