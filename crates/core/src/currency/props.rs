//! Property-based tests for monetary arithmetic, aggregation and allocation.
//!
//! - Distribution sum invariant
//! - Ratio allocation sum invariant
//! - Addition associativity and commutativity
//! - Comparator antisymmetry and transitivity
//! - Fixed-point string round trip

use proptest::prelude::*;
use rust_decimal::Decimal;

use monto_shared::MonetaryValue;

use super::aggregation::{compare, sum};
use super::allocation::{allocate_by_ratios, distribute};

/// Strategy to generate signed amounts with up to 4 decimals (±100,000,000.0000).
fn amount() -> impl Strategy<Value = MonetaryValue> {
    (-1_000_000_000_000i64..1_000_000_000_000i64)
        .prop_map(|units| MonetaryValue::from_decimal(Decimal::new(units, 4)))
}

/// Strategy to generate amounts with exactly cent precision.
fn cent_amount() -> impl Strategy<Value = MonetaryValue> {
    (-100_000_000i64..100_000_000i64)
        .prop_map(|cents| MonetaryValue::from_decimal(Decimal::new(cents, 2)))
}

/// Strategy to generate non-negative ratio lists with at least one positive weight.
fn ratios() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(0u32..1_000, 1..12)
        .prop_filter("at least one positive weight", |values| {
            values.iter().any(|v| *v > 0)
        })
        .prop_map(|values| values.into_iter().map(Decimal::from).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* total and any part count in 1..=50, the distributed parts
    /// SHALL sum exactly to the total.
    #[test]
    fn prop_distribute_sum_invariant(total in amount(), parts in 1usize..=50) {
        let result = distribute(total, parts).unwrap();
        prop_assert_eq!(result.len(), parts);
        prop_assert_eq!(sum(&result), Ok(total));
    }

    /// *For any* total, all parts except the last equal the rounded quotient.
    #[test]
    fn prop_distribute_leading_parts_equal(total in amount(), parts in 2usize..=50) {
        let result = distribute(total, parts).unwrap();
        let quotient = total.divide(parts).unwrap();
        for part in &result[..parts - 1] {
            prop_assert_eq!(*part, quotient);
        }
    }

    /// *For any* total and ratios, allocations SHALL sum to the rounded total.
    #[test]
    fn prop_allocate_by_ratios_sum_invariant(total in amount(), ratios in ratios()) {
        let result = allocate_by_ratios(total, &ratios).unwrap();
        prop_assert_eq!(result.len(), ratios.len());
        prop_assert_eq!(sum(&result), Ok(total.round()));
    }

    /// *For any* cent-precise total, no allocation deviates from its exact
    /// share by a cent or more.
    #[test]
    fn prop_allocate_by_ratios_within_one_cent(total in cent_amount(), ratios in ratios()) {
        let result = allocate_by_ratios(total, &ratios).unwrap();
        let weight: Decimal = ratios.iter().copied().sum();
        let cent = Decimal::new(1, 2);
        for (share, ratio) in result.iter().zip(&ratios) {
            let exact = total.as_decimal() * *ratio / weight;
            prop_assert!((share.as_decimal() - exact).abs() < cent);
        }
    }

    #[test]
    fn prop_add_commutative(a in amount(), b in amount()) {
        prop_assert_eq!(a.add(b), b.add(a));
    }

    #[test]
    fn prop_add_associative(a in amount(), b in amount(), c in amount()) {
        prop_assert_eq!(a.add(b).add(c), a.add(b.add(c)));
    }

    #[test]
    fn prop_subtract_inverts_add(a in amount(), b in amount()) {
        prop_assert_eq!(a.add(b).subtract(b), a);
    }

    #[test]
    fn prop_compare_antisymmetric(a in amount(), b in amount()) {
        prop_assert_eq!(compare(&a, &b) as i8, -(compare(&b, &a) as i8));
    }

    #[test]
    fn prop_compare_transitive(a in amount(), b in amount(), c in amount()) {
        let mut sorted = [a, b, c];
        sorted.sort_by(compare);
        prop_assert!(compare(&sorted[0], &sorted[1]).is_le());
        prop_assert!(compare(&sorted[1], &sorted[2]).is_le());
        prop_assert!(compare(&sorted[0], &sorted[2]).is_le());
    }

    /// *For any* cent-precise value, `to_fixed(2)` re-parses to an equal value.
    #[test]
    fn prop_fixed_string_round_trip(value in cent_amount()) {
        let fixed = value.to_fixed(2);
        let reparsed = MonetaryValue::from_string(&fixed).unwrap();
        prop_assert_eq!(reparsed, value);
        prop_assert_eq!(reparsed.to_fixed(2), fixed);
    }

    /// Division result always carries at most two decimals.
    #[test]
    fn prop_divide_scale(value in amount(), divisor in 1i64..1_000) {
        let quotient = value.divide(divisor).unwrap();
        prop_assert_eq!(quotient, quotient.round());
    }
}
