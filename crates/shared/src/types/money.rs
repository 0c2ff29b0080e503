//! Decimal helpers for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; rounding uses banker's
//! rounding (round half to even) to minimize cumulative errors.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to the given number of decimal places.
///
/// Uses banker's rounding (round half to even).
#[must_use]
pub fn round_amount(amount: Decimal, decimal_places: u32) -> Decimal {
    amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Returns true if the amount is usable as a journal amount
/// (finite by construction, non-negative).
#[must_use]
pub fn is_valid_amount(amount: Decimal) -> bool {
    amount >= Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10.005), dec!(10.00))]
    #[case(dec!(10.015), dec!(10.02))]
    #[case(dec!(10.014), dec!(10.01))]
    #[case(dec!(10.016), dec!(10.02))]
    fn test_round_amount(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_amount(input, 2), expected);
    }

    #[rstest]
    #[case(dec!(2.5), dec!(2))]
    #[case(dec!(3.5), dec!(4))]
    fn test_bankers_rounding_half_to_even(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_amount(input, 0), expected);
    }

    #[test]
    fn test_is_valid_amount() {
        assert!(is_valid_amount(dec!(0)));
        assert!(is_valid_amount(dec!(100.25)));
        assert!(!is_valid_amount(dec!(-0.01)));
    }
}
