//! Journal ledger operations.
//!
//! The ledger owns all vouchers and lines. Every mutating operation
//! validates completely before touching state, so a failure leaves no
//! partial effect; the persistence collaborator maps each operation onto
//! one transaction.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use neraca_shared::config::EngineConfig;
use neraca_shared::types::{AccountId, JournalLineId, UserId, VoucherId};
use neraca_shared::types::money::round_amount;

use super::error::LedgerError;
use super::types::{CreateVoucherInput, JournalLineInput, VoucherStatus, VoucherType};
use super::validation::validate_lines;
use super::voucher::{JournalLine, JournalVoucher};
use crate::accounts::chart::ChartOfAccounts;
use crate::fiscal::calendar::FiscalCalendar;
use crate::fiscal::error::FiscalError;

/// The journal ledger: sole writer of vouchers and lines.
#[derive(Debug)]
pub struct JournalLedger {
    vouchers: HashMap<VoucherId, JournalVoucher>,
    next_number: u64,
    number_prefix: String,
    decimal_places: u32,
}

impl JournalLedger {
    /// Creates an empty ledger using the engine configuration.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            vouchers: HashMap::new(),
            next_number: 1,
            number_prefix: config.voucher_prefix.clone(),
            decimal_places: config.amount_decimal_places,
        }
    }

    /// Creates a voucher in Draft status.
    ///
    /// Resolves the date to a fiscal period, validates every line's
    /// account, rounds amounts to the configured precision, and assigns
    /// line numbers in input order.
    ///
    /// # Errors
    ///
    /// Returns period errors (`NoOpenPeriod`, `PeriodClosed`), account
    /// errors, or line/balance validation errors.
    pub fn create_voucher(
        &mut self,
        chart: &ChartOfAccounts,
        calendar: &FiscalCalendar,
        input: CreateVoucherInput,
    ) -> Result<VoucherId, LedgerError> {
        let period_id = self.resolve_period(calendar, input.voucher_type, input.date)?;

        let lines: Vec<JournalLineInput> = input
            .lines
            .into_iter()
            .map(|mut line| {
                line.debit = round_amount(line.debit, self.decimal_places);
                line.credit = round_amount(line.credit, self.decimal_places);
                line
            })
            .collect();

        validate_lines(&lines)?;
        for line in &lines {
            chart.validate_for_posting(line.account_id)?;
        }

        let id = VoucherId::new();
        let number = format!("{}-{:06}", self.number_prefix, self.next_number);
        let journal_lines: Vec<JournalLine> = lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| JournalLine {
                id: JournalLineId::new(),
                voucher_id: id,
                line_number: u32::try_from(index).unwrap_or(u32::MAX) + 1,
                account_id: line.account_id,
                debit: line.debit,
                credit: line.credit,
                description: line.description,
                party_id: line.party_id,
                cost_center_id: line.cost_center_id,
                project_id: line.project_id,
                currency: line.currency,
                fx_rate: line.fx_rate,
                source: line.source,
            })
            .collect();

        self.vouchers.insert(
            id,
            JournalVoucher {
                id,
                number,
                voucher_type: input.voucher_type,
                date: input.date,
                description: input.description,
                status: VoucherStatus::Draft,
                branch_id: input.branch_id,
                fiscal_period_id: period_id,
                reversal_of: None,
                lines: journal_lines,
                created_by: input.created_by,
                created_at: Utc::now(),
                posted_at: None,
            },
        );
        self.next_number += 1;
        Ok(id)
    }

    /// Returns the voucher with the given id.
    pub fn voucher(&self, id: VoucherId) -> Result<&JournalVoucher, LedgerError> {
        self.vouchers
            .get(&id)
            .ok_or(LedgerError::VoucherNotFound(id))
    }

    /// Submits a draft voucher for approval.
    pub fn submit(&mut self, id: VoucherId) -> Result<(), LedgerError> {
        self.transition(id, VoucherStatus::Pending, JournalVoucher::can_submit)
    }

    /// Approves a pending voucher.
    pub fn approve(&mut self, id: VoucherId) -> Result<(), LedgerError> {
        self.transition(id, VoucherStatus::Approved, JournalVoucher::can_approve)
    }

    /// Rejects a pending voucher back to draft.
    pub fn reject(&mut self, id: VoucherId) -> Result<(), LedgerError> {
        self.transition(id, VoucherStatus::Draft, JournalVoucher::can_approve)
    }

    /// Cancels a voucher that has not been posted.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyPosted` for posted vouchers.
    pub fn cancel(&mut self, id: VoucherId) -> Result<(), LedgerError> {
        let voucher = self.voucher(id)?;
        if voucher.status == VoucherStatus::Posted {
            return Err(LedgerError::AlreadyPosted(id));
        }
        if !voucher.can_cancel() {
            return Err(LedgerError::InvalidTransition {
                from: voucher.status,
                to: VoucherStatus::Cancelled,
            });
        }
        if let Some(voucher) = self.vouchers.get_mut(&id) {
            voucher.status = VoucherStatus::Cancelled;
        }
        Ok(())
    }

    /// Posts an approved voucher to the ledger.
    ///
    /// Re-validates the balance invariant and the period gate at post
    /// time; this is the only operation with durable financial effect.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the voucher is Approved,
    /// `PeriodClosed` when the resolved period has closed since creation,
    /// or `UnbalancedEntry` if the invariant no longer holds.
    pub fn post(
        &mut self,
        calendar: &FiscalCalendar,
        id: VoucherId,
    ) -> Result<(), LedgerError> {
        let voucher = self.voucher(id)?;
        if voucher.status == VoucherStatus::Posted {
            return Err(LedgerError::AlreadyPosted(id));
        }
        if !voucher.can_post() {
            return Err(LedgerError::InvalidTransition {
                from: voucher.status,
                to: VoucherStatus::Posted,
            });
        }

        self.check_period_gate(calendar, voucher)?;

        let (debit, credit) = voucher.totals();
        if debit != credit {
            return Err(LedgerError::UnbalancedEntry { debit, credit });
        }

        let number = voucher.number.clone();
        if let Some(voucher) = self.vouchers.get_mut(&id) {
            voucher.status = VoucherStatus::Posted;
            voucher.posted_at = Some(Utc::now());
        }
        tracing::info!(voucher = %number, amount = %debit, "voucher posted");
        Ok(())
    }

    /// Reverses a posted voucher.
    ///
    /// Creates a new voucher whose lines are the exact debit/credit swap
    /// of the original, dated at the supplied reversal date, referencing
    /// the original, and posts it through the normal lifecycle. The
    /// original voucher is untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotPosted` unless the original is Posted, plus any error
    /// from creating or posting the reversing voucher.
    pub fn reverse(
        &mut self,
        chart: &ChartOfAccounts,
        calendar: &FiscalCalendar,
        id: VoucherId,
        reversal_date: NaiveDate,
        requested_by: UserId,
    ) -> Result<VoucherId, LedgerError> {
        let original = self.voucher(id)?;
        if !original.can_reverse() {
            return Err(LedgerError::NotPosted(id));
        }

        let lines: Vec<JournalLineInput> = original
            .lines
            .iter()
            .map(|line| JournalLineInput {
                account_id: line.account_id,
                debit: line.credit,
                credit: line.debit,
                description: Some(format!(
                    "Reversal: {}",
                    line.description.clone().unwrap_or_default()
                )),
                party_id: line.party_id,
                cost_center_id: line.cost_center_id,
                project_id: line.project_id,
                currency: line.currency.clone(),
                fx_rate: line.fx_rate,
                source: line.source,
            })
            .collect();

        let input = CreateVoucherInput {
            voucher_type: VoucherType::Reversal,
            date: reversal_date,
            description: format!("Reversal of {}", original.number),
            branch_id: original.branch_id,
            lines,
            created_by: requested_by,
        };

        let reversal_id = self.create_and_post(chart, calendar, input)?;
        if let Some(voucher) = self.vouchers.get_mut(&reversal_id) {
            voucher.reversal_of = Some(id);
        }
        tracing::info!(original = %id, reversal = %reversal_id, "voucher reversed");
        Ok(reversal_id)
    }

    /// Creates a voucher and runs it through submit/approve/post as one
    /// operation.
    ///
    /// Used by the closing and depreciation engines; on any failure the
    /// draft voucher is removed again so no partial state remains.
    pub fn create_and_post(
        &mut self,
        chart: &ChartOfAccounts,
        calendar: &FiscalCalendar,
        input: CreateVoucherInput,
    ) -> Result<VoucherId, LedgerError> {
        let saved_number = self.next_number;
        let id = self.create_voucher(chart, calendar, input)?;
        let result = self
            .submit(id)
            .and_then(|()| self.approve(id))
            .and_then(|()| self.post(calendar, id));
        if let Err(err) = result {
            self.vouchers.remove(&id);
            self.next_number = saved_number;
            return Err(err);
        }
        Ok(id)
    }

    /// Iterates over all vouchers.
    pub fn vouchers(&self) -> impl Iterator<Item = &JournalVoucher> {
        self.vouchers.values()
    }

    /// Iterates over vouchers dated within [start, end].
    pub fn vouchers_dated_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &JournalVoucher> {
        self.vouchers
            .values()
            .filter(move |v| v.date >= start && v.date <= end)
    }

    /// Iterates over the lines of posted vouchers only.
    pub fn posted_lines(&self) -> impl Iterator<Item = (&JournalVoucher, &JournalLine)> {
        self.vouchers
            .values()
            .filter(|v| v.status == VoucherStatus::Posted)
            .flat_map(|v| v.lines.iter().map(move |l| (v, l)))
    }

    /// Returns true if any posted voucher has a line on the account.
    #[must_use]
    pub fn account_has_posted_lines(&self, account_id: AccountId) -> bool {
        self.posted_lines()
            .any(|(_, line)| line.account_id == account_id)
    }

    /// Resolves the fiscal period for a voucher date.
    ///
    /// Closing vouchers may land in a closed period as long as the owning
    /// year is still open; every other voucher type requires an open
    /// period.
    fn resolve_period(
        &self,
        calendar: &FiscalCalendar,
        voucher_type: VoucherType,
        date: NaiveDate,
    ) -> Result<neraca_shared::types::FiscalPeriodId, LedgerError> {
        if voucher_type == VoucherType::Closing {
            let period = calendar.resolve_period_any(date)?;
            let year = calendar.year(period.fiscal_year_id)?;
            if year.is_closed {
                return Err(FiscalError::PeriodClosed(period.id).into());
            }
            Ok(period.id)
        } else {
            Ok(calendar.resolve_period(date)?.id)
        }
    }

    /// Re-checks the period gate at post time.
    fn check_period_gate(
        &self,
        calendar: &FiscalCalendar,
        voucher: &JournalVoucher,
    ) -> Result<(), LedgerError> {
        let period = calendar.period(voucher.fiscal_period_id)?;
        if voucher.voucher_type == VoucherType::Closing {
            let year = calendar.year(period.fiscal_year_id)?;
            if year.is_closed {
                return Err(FiscalError::PeriodClosed(period.id).into());
            }
        } else if period.is_closed {
            return Err(FiscalError::PeriodClosed(period.id).into());
        }
        Ok(())
    }

    fn transition(
        &mut self,
        id: VoucherId,
        target: VoucherStatus,
        guard: fn(&JournalVoucher) -> bool,
    ) -> Result<(), LedgerError> {
        let voucher = self.voucher(id)?;
        if !guard(voucher) {
            return Err(LedgerError::InvalidTransition {
                from: voucher.status,
                to: target,
            });
        }
        if let Some(voucher) = self.vouchers.get_mut(&id) {
            voucher.status = target;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::types::{AccountType, NewAccount};
    use rust_decimal_macros::dec;

    struct Fixture {
        chart: ChartOfAccounts,
        calendar: FiscalCalendar,
        ledger: JournalLedger,
        cash: AccountId,
        sales: AccountId,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Fixture {
        let mut chart = ChartOfAccounts::new();
        let cash = chart
            .create_account(NewAccount::posting("1010", "Cash", AccountType::Asset))
            .unwrap();
        let sales = chart
            .create_account(NewAccount::posting("4010", "Sales", AccountType::Revenue))
            .unwrap();

        let mut calendar = FiscalCalendar::new();
        let year = calendar
            .create_year("FY2026", date(2026, 1, 1), date(2026, 12, 31))
            .unwrap();
        calendar
            .create_period(year, "January 2026", date(2026, 1, 1), date(2026, 1, 31))
            .unwrap();
        calendar
            .create_period(year, "February 2026", date(2026, 2, 1), date(2026, 2, 28))
            .unwrap();

        let ledger = JournalLedger::new(&EngineConfig::default());
        Fixture {
            chart,
            calendar,
            ledger,
            cash,
            sales,
        }
    }

    fn sale_input(fixture: &Fixture, amount: rust_decimal::Decimal) -> CreateVoucherInput {
        CreateVoucherInput::journal(
            date(2026, 1, 15),
            "Cash sale",
            vec![
                JournalLineInput::debit(fixture.cash, amount),
                JournalLineInput::credit(fixture.sales, amount),
            ],
            UserId::new(),
        )
    }

    #[test]
    fn test_create_voucher_assigns_numbers_and_lines() {
        let mut f = fixture();
        let input = sale_input(&f, dec!(1000));
        let id = f.ledger.create_voucher(&f.chart, &f.calendar, input).unwrap();
        let voucher = f.ledger.voucher(id).unwrap();
        assert_eq!(voucher.number, "JV-000001");
        assert_eq!(voucher.status, VoucherStatus::Draft);
        assert_eq!(voucher.lines[0].line_number, 1);
        assert_eq!(voucher.lines[1].line_number, 2);

        let second = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(10)))
            .unwrap();
        assert_eq!(f.ledger.voucher(second).unwrap().number, "JV-000002");
    }

    #[test]
    fn test_create_voucher_unbalanced_rejected() {
        let mut f = fixture();
        let input = CreateVoucherInput::journal(
            date(2026, 1, 15),
            "Broken",
            vec![
                JournalLineInput::debit(f.cash, dec!(100)),
                JournalLineInput::credit(f.sales, dec!(60)),
            ],
            UserId::new(),
        );
        assert!(matches!(
            f.ledger.create_voucher(&f.chart, &f.calendar, input),
            Err(LedgerError::UnbalancedEntry { .. })
        ));
    }

    #[test]
    fn test_create_voucher_invalid_account_rejected() {
        let mut f = fixture();
        let input = CreateVoucherInput::journal(
            date(2026, 1, 15),
            "Unknown account",
            vec![
                JournalLineInput::debit(AccountId::new(), dec!(100)),
                JournalLineInput::credit(f.sales, dec!(100)),
            ],
            UserId::new(),
        );
        assert!(matches!(
            f.ledger.create_voucher(&f.chart, &f.calendar, input),
            Err(LedgerError::Account(_))
        ));
    }

    #[test]
    fn test_create_voucher_no_open_period() {
        let mut f = fixture();
        let mut input = sale_input(&f, dec!(100));
        input.date = date(2027, 6, 1);
        assert!(matches!(
            f.ledger.create_voucher(&f.chart, &f.calendar, input),
            Err(LedgerError::Fiscal(FiscalError::NoOpenPeriod(_)))
        ));
    }

    #[test]
    fn test_full_lifecycle() {
        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(1000)))
            .unwrap();

        // Cannot post from draft.
        assert!(matches!(
            f.ledger.post(&f.calendar, id),
            Err(LedgerError::InvalidTransition { .. })
        ));

        f.ledger.submit(id).unwrap();
        f.ledger.approve(id).unwrap();
        f.ledger.post(&f.calendar, id).unwrap();

        let voucher = f.ledger.voucher(id).unwrap();
        assert_eq!(voucher.status, VoucherStatus::Posted);
        assert!(voucher.posted_at.is_some());

        // Posted is terminal.
        assert!(matches!(
            f.ledger.post(&f.calendar, id),
            Err(LedgerError::AlreadyPosted(_))
        ));
        assert!(matches!(
            f.ledger.cancel(id),
            Err(LedgerError::AlreadyPosted(_))
        ));
    }

    #[test]
    fn test_reject_returns_to_draft() {
        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(100)))
            .unwrap();
        f.ledger.submit(id).unwrap();
        f.ledger.reject(id).unwrap();
        assert_eq!(f.ledger.voucher(id).unwrap().status, VoucherStatus::Draft);
    }

    #[test]
    fn test_cancel_draft_and_pending() {
        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(100)))
            .unwrap();
        f.ledger.cancel(id).unwrap();
        assert_eq!(
            f.ledger.voucher(id).unwrap().status,
            VoucherStatus::Cancelled
        );
        // Cancelled is terminal.
        assert!(matches!(
            f.ledger.cancel(id),
            Err(LedgerError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_post_into_closed_period_rejected() {
        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(100)))
            .unwrap();
        f.ledger.submit(id).unwrap();
        f.ledger.approve(id).unwrap();

        // The period closes between approval and posting.
        let period_id = f.ledger.voucher(id).unwrap().fiscal_period_id;
        f.calendar.close_period(period_id).unwrap();

        assert!(matches!(
            f.ledger.post(&f.calendar, id),
            Err(LedgerError::Fiscal(FiscalError::PeriodClosed(_)))
        ));
    }

    #[test]
    fn test_reverse_swaps_sides() {
        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(1000)))
            .unwrap();
        f.ledger.submit(id).unwrap();
        f.ledger.approve(id).unwrap();
        f.ledger.post(&f.calendar, id).unwrap();

        let reversal_id = f
            .ledger
            .reverse(&f.chart, &f.calendar, id, date(2026, 2, 10), UserId::new())
            .unwrap();
        let reversal = f.ledger.voucher(reversal_id).unwrap();
        assert_eq!(reversal.status, VoucherStatus::Posted);
        assert_eq!(reversal.voucher_type, VoucherType::Reversal);
        assert_eq!(reversal.reversal_of, Some(id));

        let original = f.ledger.voucher(id).unwrap();
        assert_eq!(original.status, VoucherStatus::Posted);
        for (orig, rev) in original.lines.iter().zip(reversal.lines.iter()) {
            assert_eq!(orig.account_id, rev.account_id);
            assert_eq!(orig.debit, rev.credit);
            assert_eq!(orig.credit, rev.debit);
        }

        // Net effect per account is zero.
        for account in [f.cash, f.sales] {
            let net: rust_decimal::Decimal = f
                .ledger
                .posted_lines()
                .filter(|(_, l)| l.account_id == account)
                .map(|(_, l)| l.signed_amount())
                .sum();
            assert_eq!(net, rust_decimal::Decimal::ZERO);
        }
    }

    #[test]
    fn test_reverse_requires_posted() {
        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(100)))
            .unwrap();
        assert!(matches!(
            f.ledger
                .reverse(&f.chart, &f.calendar, id, date(2026, 1, 20), UserId::new()),
            Err(LedgerError::NotPosted(_))
        ));
    }

    #[test]
    fn test_create_and_post_leaves_no_partial_state_on_failure() {
        let mut f = fixture();
        let mut input = sale_input(&f, dec!(100));
        input.date = date(2027, 1, 1);
        assert!(f
            .ledger
            .create_and_post(&f.chart, &f.calendar, input)
            .is_err());
        assert_eq!(f.ledger.vouchers().count(), 0);

        // The voucher number sequence is untouched by the failed attempt.
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(100)))
            .unwrap();
        assert_eq!(f.ledger.voucher(id).unwrap().number, "JV-000001");
    }

    #[test]
    fn test_account_has_posted_lines() {
        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(100)))
            .unwrap();
        assert!(!f.ledger.account_has_posted_lines(f.cash));
        f.ledger.submit(id).unwrap();
        f.ledger.approve(id).unwrap();
        f.ledger.post(&f.calendar, id).unwrap();
        assert!(f.ledger.account_has_posted_lines(f.cash));
    }

    #[test]
    fn test_posted_usage_blocks_account_restructuring() {
        use crate::accounts::error::AccountError;
        use crate::accounts::types::AccountType;

        let mut f = fixture();
        let id = f
            .ledger
            .create_voucher(&f.chart, &f.calendar, sale_input(&f, dec!(100)))
            .unwrap();
        f.ledger.submit(id).unwrap();
        f.ledger.approve(id).unwrap();
        f.ledger.post(&f.calendar, id).unwrap();

        let cash = f.cash;
        assert!(matches!(
            f.chart
                .reparent(cash, None, |a| f.ledger.account_has_posted_lines(a)),
            Err(AccountError::AccountInUse(_))
        ));
        assert!(matches!(
            f.chart.change_type(cash, AccountType::Expense, |a| f
                .ledger
                .account_has_posted_lines(a)),
            Err(AccountError::AccountInUse(_))
        ));
    }

    #[test]
    fn test_amounts_rounded_on_creation() {
        let mut f = fixture();
        let input = CreateVoucherInput::journal(
            date(2026, 1, 15),
            "Rounding",
            vec![
                JournalLineInput::debit(f.cash, dec!(10.005)),
                JournalLineInput::credit(f.sales, dec!(10.0049)),
            ],
            UserId::new(),
        );
        // Both sides round to 10.00 under banker's rounding.
        let id = f.ledger.create_voucher(&f.chart, &f.calendar, input).unwrap();
        let voucher = f.ledger.voucher(id).unwrap();
        assert_eq!(voucher.lines[0].debit, dec!(10.00));
        assert_eq!(voucher.lines[1].credit, dec!(10.00));
    }
}
