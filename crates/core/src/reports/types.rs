//! Trial balance report types.

use chrono::NaiveDate;
use neraca_shared::types::{AccountId, FiscalPeriodId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::types::AccountType;

/// One row of a trial balance, per account.
///
/// Closing values derive from the opening and period columns:
/// `net = opening_debit + period_debit - opening_credit - period_credit`,
/// `closing_debit = max(net, 0)`, `closing_credit = max(-net, 0)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// The account.
    pub account_id: AccountId,
    /// Account code.
    pub account_code: String,
    /// Account name.
    pub account_name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Debit balance carried into the period.
    pub opening_debit: Decimal,
    /// Credit balance carried into the period.
    pub opening_credit: Decimal,
    /// Debits posted within the period.
    pub period_debit: Decimal,
    /// Credits posted within the period.
    pub period_credit: Decimal,
    /// Closing debit balance.
    pub closing_debit: Decimal,
    /// Closing credit balance.
    pub closing_credit: Decimal,
}

impl TrialBalanceRow {
    /// Recomputes the closing columns from the opening and period columns.
    pub fn compute_closing(&mut self) {
        let net =
            self.opening_debit + self.period_debit - self.opening_credit - self.period_credit;
        if net >= Decimal::ZERO {
            self.closing_debit = net;
            self.closing_credit = Decimal::ZERO;
        } else {
            self.closing_debit = Decimal::ZERO;
            self.closing_credit = -net;
        }
    }

    /// Returns true if every column is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.opening_debit.is_zero()
            && self.opening_credit.is_zero()
            && self.period_debit.is_zero()
            && self.period_credit.is_zero()
    }
}

/// Column totals for a trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of period debits.
    pub period_debit: Decimal,
    /// Sum of period credits.
    pub period_credit: Decimal,
    /// Sum of closing debits.
    pub closing_debit: Decimal,
    /// Sum of closing credits.
    pub closing_credit: Decimal,
    /// Whether period debits equal period credits.
    pub is_balanced: bool,
}

/// A trial balance over one fiscal period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// The period the report covers.
    pub period_id: FiscalPeriodId,
    /// Period start date.
    pub start_date: NaiveDate,
    /// Period end date.
    pub end_date: NaiveDate,
    /// Per-account rows, ordered by account code.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}
