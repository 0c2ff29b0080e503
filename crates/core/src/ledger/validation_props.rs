//! Property tests for balanced-entry validation.

use neraca_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::JournalLineInput;
use super::validation::validate_lines;

/// Strategy for positive line amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a balanced line set: every amount appears once as a debit
/// and once as a credit.
fn balanced_lines_strategy() -> impl Strategy<Value = Vec<JournalLineInput>> {
    prop::collection::vec(amount_strategy(), 1..8).prop_map(|amounts| {
        let mut lines = Vec::with_capacity(amounts.len() * 2);
        for amount in amounts {
            lines.push(JournalLineInput::debit(AccountId::new(), amount));
            lines.push(JournalLineInput::credit(AccountId::new(), amount));
        }
        lines
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any mirrored line set, validation accepts and the totals agree.
    #[test]
    fn prop_mirrored_lines_always_balance(lines in balanced_lines_strategy()) {
        let (debit, credit) = validate_lines(&lines).unwrap();
        prop_assert_eq!(debit, credit);
    }

    /// Perturbing any single line breaks the balance invariant.
    #[test]
    fn prop_perturbed_lines_rejected(
        lines in balanced_lines_strategy(),
        extra in amount_strategy(),
    ) {
        let mut lines = lines;
        lines[0].debit += extra;
        prop_assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::UnbalancedEntry { .. })
        ));
    }

    /// Validation totals equal the arithmetic sums of the inputs.
    #[test]
    fn prop_totals_match_sums(lines in balanced_lines_strategy()) {
        let expected_debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let expected_credit: Decimal = lines.iter().map(|l| l.credit).sum();
        let (debit, credit) = validate_lines(&lines).unwrap();
        prop_assert_eq!(debit, expected_debit);
        prop_assert_eq!(credit, expected_credit);
    }

    /// A line with both sides set is rejected no matter the amounts.
    #[test]
    fn prop_both_sides_rejected(
        lines in balanced_lines_strategy(),
        amount in amount_strategy(),
    ) {
        let mut lines = lines;
        lines[0].credit = amount;
        lines[0].debit += amount;
        prop_assert!(matches!(
            validate_lines(&lines),
            Err(LedgerError::BothSidesSet { line: 1 })
        ));
    }
}
