//! Period and year closing orchestration.

use chrono::Days;
use neraca_shared::types::{AccountId, FiscalPeriodId, FiscalYearId, UserId, VoucherId};
use rust_decimal::Decimal;

use super::error::ClosingError;
use crate::accounts::chart::ChartOfAccounts;
use crate::fiscal::calendar::FiscalCalendar;
use crate::ledger::journal::JournalLedger;
use crate::ledger::types::{CreateVoucherInput, JournalLineInput, VoucherType};
use crate::reports::trial_balance::TrialBalanceCalculator;

/// Result of a year close.
#[derive(Debug)]
pub struct YearCloseOutcome {
    /// The closing voucher, when the year had profit-and-loss activity.
    pub closing_voucher: Option<VoucherId>,
    /// The opening voucher for the next year, when requested.
    pub opening_voucher: Option<VoucherId>,
    /// Net income moved into the profit-and-loss account
    /// (positive = profit).
    pub net_income: Decimal,
}

/// Orchestrates fiscal period and year closes.
pub struct ClosingEngine;

impl ClosingEngine {
    /// Closes a fiscal period.
    ///
    /// Every voucher dated in the period must be posted or cancelled, and
    /// earlier periods in the same year must already be closed.
    ///
    /// # Errors
    ///
    /// Returns `OpenVouchersExist`, or calendar errors such as
    /// `PeriodOrderViolation` and `PeriodAlreadyClosed`.
    pub fn close_fiscal_period(
        calendar: &mut FiscalCalendar,
        journal: &JournalLedger,
        period_id: FiscalPeriodId,
    ) -> Result<(), ClosingError> {
        let period = calendar.period(period_id)?;
        let count = journal
            .vouchers_dated_between(period.start_date, period.end_date)
            .filter(|v| !v.status.is_settled())
            .count();
        if count > 0 {
            return Err(ClosingError::OpenVouchersExist {
                period: period_id,
                count,
            });
        }

        calendar.close_period(period_id)?;
        tracing::info!(period = %period_id, "fiscal period closed");
        Ok(())
    }

    /// Closes a fiscal year.
    ///
    /// Computes net income over the year, posts one balanced closing
    /// voucher that zeroes every Revenue/Expense period balance into the
    /// profit-and-loss account, optionally posts an opening voucher dated
    /// at the next year's start carrying forward balance-sheet closing
    /// balances, and marks the year closed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed`, `PeriodsStillOpen`, account errors for the
    /// profit-and-loss account, or ledger errors from the vouchers (e.g.
    /// `NoOpenPeriod` when no next year exists for the carry-forward).
    pub fn close_fiscal_year(
        calendar: &mut FiscalCalendar,
        journal: &mut JournalLedger,
        chart: &ChartOfAccounts,
        year_id: FiscalYearId,
        profit_and_loss_account: AccountId,
        create_opening_for_next_year: bool,
        closed_by: UserId,
    ) -> Result<YearCloseOutcome, ClosingError> {
        let year = calendar.year(year_id)?.clone();
        if year.is_closed {
            return Err(ClosingError::AlreadyClosed(year_id));
        }
        let open = calendar
            .periods_of_year(year_id)
            .iter()
            .filter(|p| p.is_open())
            .count();
        if open > 0 {
            return Err(ClosingError::PeriodsStillOpen {
                year: year_id,
                open,
            });
        }
        chart.validate_for_posting(profit_and_loss_account)?;

        // The carry-forward target must exist before any voucher posts, so
        // a failed close leaves nothing behind.
        let opening_date = year
            .end_date
            .checked_add_days(Days::new(1))
            .unwrap_or(year.end_date);
        if create_opening_for_next_year {
            calendar.resolve_period(opening_date)?;
        }

        // Zero every revenue/expense balance into the P&L account.
        let rows = TrialBalanceCalculator::compute_rows(
            journal,
            chart,
            year.start_date,
            year.end_date,
        );
        let mut lines: Vec<JournalLineInput> = Vec::new();
        for row in &rows {
            if !row.account_type.is_profit_and_loss() {
                continue;
            }
            let net = row.period_debit - row.period_credit;
            if net > Decimal::ZERO {
                lines.push(JournalLineInput::credit(row.account_id, net));
            } else if net < Decimal::ZERO {
                lines.push(JournalLineInput::debit(row.account_id, -net));
            }
        }
        let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();
        let net_income = total_debit - total_credit;
        if net_income > Decimal::ZERO {
            lines.push(JournalLineInput::credit(
                profit_and_loss_account,
                net_income,
            ));
        } else if net_income < Decimal::ZERO {
            lines.push(JournalLineInput::debit(
                profit_and_loss_account,
                -net_income,
            ));
        }

        let closing_voucher = if lines.is_empty() {
            None
        } else {
            let input = CreateVoucherInput {
                voucher_type: VoucherType::Closing,
                date: year.end_date,
                description: format!("Year-end closing {}", year.name),
                branch_id: None,
                lines,
                created_by: closed_by,
            };
            Some(journal.create_and_post(chart, calendar, input)?)
        };

        // Carry balance-sheet closing balances into the next year.
        let opening_voucher = if create_opening_for_next_year {
            let rows = TrialBalanceCalculator::compute_rows(
                journal,
                chart,
                year.start_date,
                year.end_date,
            );
            let lines: Vec<JournalLineInput> = rows
                .iter()
                .filter(|row| row.account_type.is_balance_sheet())
                .filter(|row| !row.closing_debit.is_zero() || !row.closing_credit.is_zero())
                .map(|row| {
                    if row.closing_debit > Decimal::ZERO {
                        JournalLineInput::debit(row.account_id, row.closing_debit)
                    } else {
                        JournalLineInput::credit(row.account_id, row.closing_credit)
                    }
                })
                .collect();

            if lines.is_empty() {
                None
            } else {
                let input = CreateVoucherInput {
                    voucher_type: VoucherType::OpeningBalance,
                    date: opening_date,
                    description: format!("Opening balances carried forward from {}", year.name),
                    branch_id: None,
                    lines,
                    created_by: closed_by,
                };
                Some(journal.create_and_post(chart, calendar, input)?)
            }
        } else {
            None
        };

        calendar.close_year(year_id)?;
        tracing::info!(year = %year_id, net_income = %net_income, "fiscal year closed");

        Ok(YearCloseOutcome {
            closing_voucher,
            opening_voucher,
            net_income,
        })
    }
}
