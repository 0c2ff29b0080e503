//! Property tests for the trial balance closing formula.

use neraca_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::types::TrialBalanceRow;
use crate::accounts::types::AccountType;

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn row_strategy() -> impl Strategy<Value = TrialBalanceRow> {
    (
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
    )
        .prop_map(|(od, oc, pd, pc)| {
            let mut row = TrialBalanceRow {
                account_id: AccountId::new(),
                account_code: "1010".to_string(),
                account_name: "Cash".to_string(),
                account_type: AccountType::Asset,
                opening_debit: od,
                opening_credit: oc,
                period_debit: pd,
                period_credit: pc,
                closing_debit: Decimal::ZERO,
                closing_credit: Decimal::ZERO,
            };
            row.compute_closing();
            row
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// closing_debit - closing_credit always equals the net movement.
    #[test]
    fn prop_closing_preserves_net(row in row_strategy()) {
        let net = row.opening_debit + row.period_debit
            - row.opening_credit - row.period_credit;
        prop_assert_eq!(row.closing_debit - row.closing_credit, net);
    }

    /// At most one closing column is nonzero, and neither is negative.
    #[test]
    fn prop_closing_single_sided(row in row_strategy()) {
        prop_assert!(row.closing_debit >= Decimal::ZERO);
        prop_assert!(row.closing_credit >= Decimal::ZERO);
        prop_assert!(row.closing_debit.is_zero() || row.closing_credit.is_zero());
    }

    /// Recomputing the closing columns is idempotent.
    #[test]
    fn prop_closing_idempotent(row in row_strategy()) {
        let mut again = row.clone();
        again.compute_closing();
        prop_assert_eq!(again.closing_debit, row.closing_debit);
        prop_assert_eq!(again.closing_credit, row.closing_credit);
    }
}
