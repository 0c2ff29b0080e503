//! Trial balance computation over posted vouchers.

use chrono::NaiveDate;
use neraca_shared::types::{AccountId, FiscalPeriodId};
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals};
use crate::accounts::chart::ChartOfAccounts;
use crate::fiscal::calendar::FiscalCalendar;
use crate::ledger::journal::JournalLedger;

/// Read-only aggregator over posted journal lines.
pub struct TrialBalanceCalculator;

impl TrialBalanceCalculator {
    /// Computes the trial balance for a fiscal period.
    ///
    /// Opening columns carry the net balance of posted lines dated
    /// strictly before the period start (a single netted side); period
    /// columns sum gross posted lines dated within the period. Rows cover
    /// every posting account, ordered by code.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` for an unknown period.
    pub fn compute(
        journal: &JournalLedger,
        chart: &ChartOfAccounts,
        calendar: &FiscalCalendar,
        period_id: FiscalPeriodId,
    ) -> Result<TrialBalanceReport, ReportError> {
        let period = calendar.period(period_id)?;
        let rows = Self::compute_rows(journal, chart, period.start_date, period.end_date);
        let totals = Self::totals(&rows);
        Ok(TrialBalanceReport {
            period_id,
            start_date: period.start_date,
            end_date: period.end_date,
            rows,
            totals,
        })
    }

    /// Computes the trial balance row for one account in a period.
    ///
    /// For a non-posting group account the result is the column-wise sum
    /// of all descendant posting accounts' rows.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotFound` or `AccountNotFound`.
    pub fn compute_account(
        journal: &JournalLedger,
        chart: &ChartOfAccounts,
        calendar: &FiscalCalendar,
        period_id: FiscalPeriodId,
        account_id: AccountId,
    ) -> Result<TrialBalanceRow, ReportError> {
        let period = calendar.period(period_id)?;
        let account = chart.account(account_id)?;

        if account.is_posting {
            return Ok(Self::account_row(
                journal,
                chart,
                account_id,
                period.start_date,
                period.end_date,
            )?);
        }

        let mut aggregate = TrialBalanceRow {
            account_id,
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            account_type: account.account_type,
            opening_debit: Decimal::ZERO,
            opening_credit: Decimal::ZERO,
            period_debit: Decimal::ZERO,
            period_credit: Decimal::ZERO,
            closing_debit: Decimal::ZERO,
            closing_credit: Decimal::ZERO,
        };
        for descendant in chart.descendants(account_id) {
            let child = chart.account(descendant)?;
            if !child.is_posting {
                continue;
            }
            let row = Self::account_row(
                journal,
                chart,
                descendant,
                period.start_date,
                period.end_date,
            )?;
            aggregate.opening_debit += row.opening_debit;
            aggregate.opening_credit += row.opening_credit;
            aggregate.period_debit += row.period_debit;
            aggregate.period_credit += row.period_credit;
            aggregate.closing_debit += row.closing_debit;
            aggregate.closing_credit += row.closing_credit;
        }
        Ok(aggregate)
    }

    /// Computes rows for every posting account over an arbitrary date
    /// range. Used by the year-close, which spans all periods of a year.
    #[must_use]
    pub fn compute_rows(
        journal: &JournalLedger,
        chart: &ChartOfAccounts,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<TrialBalanceRow> {
        chart
            .posting_accounts()
            .into_iter()
            .map(|account| {
                let mut row = TrialBalanceRow {
                    account_id: account.id,
                    account_code: account.code.clone(),
                    account_name: account.name.clone(),
                    account_type: account.account_type,
                    opening_debit: Decimal::ZERO,
                    opening_credit: Decimal::ZERO,
                    period_debit: Decimal::ZERO,
                    period_credit: Decimal::ZERO,
                    closing_debit: Decimal::ZERO,
                    closing_credit: Decimal::ZERO,
                };
                Self::accumulate(journal, &mut row, start, end);
                row
            })
            .collect()
    }

    fn account_row(
        journal: &JournalLedger,
        chart: &ChartOfAccounts,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<TrialBalanceRow, ReportError> {
        let account = chart.account(account_id)?;
        let mut row = TrialBalanceRow {
            account_id,
            account_code: account.code.clone(),
            account_name: account.name.clone(),
            account_type: account.account_type,
            opening_debit: Decimal::ZERO,
            opening_credit: Decimal::ZERO,
            period_debit: Decimal::ZERO,
            period_credit: Decimal::ZERO,
            closing_debit: Decimal::ZERO,
            closing_credit: Decimal::ZERO,
        };
        Self::accumulate(journal, &mut row, start, end);
        Ok(row)
    }

    fn accumulate(
        journal: &JournalLedger,
        row: &mut TrialBalanceRow,
        start: NaiveDate,
        end: NaiveDate,
    ) {
        for (voucher, line) in journal.posted_lines() {
            if line.account_id != row.account_id {
                continue;
            }
            if voucher.date < start {
                row.opening_debit += line.debit;
                row.opening_credit += line.credit;
            } else if voucher.date <= end {
                row.period_debit += line.debit;
                row.period_credit += line.credit;
            }
        }
        // Opening is the brought-forward net balance, not gross activity;
        // only the period columns stay gross.
        let net = row.opening_debit - row.opening_credit;
        if net >= Decimal::ZERO {
            row.opening_debit = net;
            row.opening_credit = Decimal::ZERO;
        } else {
            row.opening_debit = Decimal::ZERO;
            row.opening_credit = -net;
        }
        row.compute_closing();
    }

    fn totals(rows: &[TrialBalanceRow]) -> TrialBalanceTotals {
        let period_debit: Decimal = rows.iter().map(|r| r.period_debit).sum();
        let period_credit: Decimal = rows.iter().map(|r| r.period_credit).sum();
        let closing_debit: Decimal = rows.iter().map(|r| r.closing_debit).sum();
        let closing_credit: Decimal = rows.iter().map(|r| r.closing_credit).sum();
        TrialBalanceTotals {
            period_debit,
            period_credit,
            closing_debit,
            closing_credit,
            is_balanced: period_debit == period_credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::types::{AccountType, NewAccount};
    use crate::ledger::types::{CreateVoucherInput, JournalLineInput};
    use neraca_shared::config::EngineConfig;
    use neraca_shared::types::UserId;
    use rust_decimal_macros::dec;

    struct Fixture {
        chart: ChartOfAccounts,
        calendar: FiscalCalendar,
        journal: JournalLedger,
        january: FiscalPeriodId,
        february: FiscalPeriodId,
        assets_group: AccountId,
        cash: AccountId,
        bank: AccountId,
        sales: AccountId,
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> Fixture {
        let mut chart = ChartOfAccounts::new();
        let assets_group = chart
            .create_account(NewAccount::group("1000", "Assets", AccountType::Asset))
            .unwrap();
        let cash = chart
            .create_account(
                NewAccount::posting("1010", "Cash", AccountType::Asset).under(assets_group),
            )
            .unwrap();
        let bank = chart
            .create_account(
                NewAccount::posting("1020", "Bank", AccountType::Asset).under(assets_group),
            )
            .unwrap();
        let sales = chart
            .create_account(NewAccount::posting("4010", "Sales", AccountType::Revenue))
            .unwrap();

        let mut calendar = FiscalCalendar::new();
        let year = calendar
            .create_year("FY2026", date(2026, 1, 1), date(2026, 12, 31))
            .unwrap();
        let january = calendar
            .create_period(year, "January 2026", date(2026, 1, 1), date(2026, 1, 31))
            .unwrap();
        let february = calendar
            .create_period(year, "February 2026", date(2026, 2, 1), date(2026, 2, 28))
            .unwrap();

        Fixture {
            chart,
            calendar,
            journal: JournalLedger::new(&EngineConfig::default()),
            january,
            february,
            assets_group,
            cash,
            bank,
            sales,
        }
    }

    fn post_sale(f: &mut Fixture, cash_account: AccountId, on: NaiveDate, amount: Decimal) {
        let input = CreateVoucherInput::journal(
            on,
            "Cash sale",
            vec![
                JournalLineInput::debit(cash_account, amount),
                JournalLineInput::credit(f.sales, amount),
            ],
            UserId::new(),
        );
        f.journal
            .create_and_post(&f.chart, &f.calendar, input)
            .unwrap();
    }

    fn row_for<'a>(report: &'a TrialBalanceReport, code: &str) -> &'a TrialBalanceRow {
        report
            .rows
            .iter()
            .find(|r| r.account_code == code)
            .unwrap()
    }

    #[test]
    fn test_period_columns() {
        let mut f = fixture();
        let cash = f.cash;
        post_sale(&mut f, cash, date(2026, 1, 15), dec!(1000));

        let report =
            TrialBalanceCalculator::compute(&f.journal, &f.chart, &f.calendar, f.january).unwrap();
        assert_eq!(row_for(&report, "1010").period_debit, dec!(1000));
        assert_eq!(row_for(&report, "4010").period_credit, dec!(1000));
        assert!(report.totals.is_balanced);
    }

    #[test]
    fn test_opening_columns_exclude_period() {
        let mut f = fixture();
        let cash = f.cash;
        post_sale(&mut f, cash, date(2026, 1, 15), dec!(1000));
        post_sale(&mut f, cash, date(2026, 2, 10), dec!(250));

        let report =
            TrialBalanceCalculator::compute(&f.journal, &f.chart, &f.calendar, f.february)
                .unwrap();
        let cash_row = row_for(&report, "1010");
        assert_eq!(cash_row.opening_debit, dec!(1000));
        assert_eq!(cash_row.opening_credit, dec!(0));
        assert_eq!(cash_row.period_debit, dec!(250));
        assert_eq!(cash_row.closing_debit, dec!(1250));
        assert_eq!(cash_row.closing_credit, dec!(0));
    }

    #[test]
    fn test_opening_columns_carry_net_balance() {
        let mut f = fixture();
        let cash = f.cash;
        post_sale(&mut f, cash, date(2026, 1, 15), dec!(1000));

        // A refund before February hits both sides of cash and sales.
        let refund = CreateVoucherInput::journal(
            date(2026, 1, 20),
            "Sales refund",
            vec![
                JournalLineInput::debit(f.sales, dec!(400)),
                JournalLineInput::credit(f.cash, dec!(400)),
            ],
            UserId::new(),
        );
        f.journal
            .create_and_post(&f.chart, &f.calendar, refund)
            .unwrap();

        let report =
            TrialBalanceCalculator::compute(&f.journal, &f.chart, &f.calendar, f.february)
                .unwrap();

        // Prior gross activity was 1000 debit / 400 credit on cash; the
        // opening shows only the 600 brought forward.
        let cash_row = row_for(&report, "1010");
        assert_eq!(cash_row.opening_debit, dec!(600));
        assert_eq!(cash_row.opening_credit, dec!(0));
        assert_eq!(cash_row.closing_debit, dec!(600));

        // Credit-normal side nets the same way.
        let sales_row = row_for(&report, "4010");
        assert_eq!(sales_row.opening_debit, dec!(0));
        assert_eq!(sales_row.opening_credit, dec!(600));
        assert_eq!(sales_row.closing_credit, dec!(600));
    }

    #[test]
    fn test_unposted_vouchers_invisible() {
        let mut f = fixture();
        let input = CreateVoucherInput::journal(
            date(2026, 1, 15),
            "Draft sale",
            vec![
                JournalLineInput::debit(f.cash, dec!(500)),
                JournalLineInput::credit(f.sales, dec!(500)),
            ],
            UserId::new(),
        );
        f.journal
            .create_voucher(&f.chart, &f.calendar, input)
            .unwrap();

        let report =
            TrialBalanceCalculator::compute(&f.journal, &f.chart, &f.calendar, f.january).unwrap();
        assert!(row_for(&report, "1010").is_zero());
    }

    #[test]
    fn test_group_account_aggregates_descendants() {
        let mut f = fixture();
        let (cash, bank) = (f.cash, f.bank);
        post_sale(&mut f, cash, date(2026, 1, 10), dec!(600));
        post_sale(&mut f, bank, date(2026, 1, 12), dec!(400));

        let group_row = TrialBalanceCalculator::compute_account(
            &f.journal,
            &f.chart,
            &f.calendar,
            f.january,
            f.assets_group,
        )
        .unwrap();
        assert_eq!(group_row.period_debit, dec!(1000));
        assert_eq!(group_row.closing_debit, dec!(1000));
    }

    #[test]
    fn test_closing_balances_sum_to_zero() {
        let mut f = fixture();
        let (cash, bank) = (f.cash, f.bank);
        post_sale(&mut f, cash, date(2026, 1, 15), dec!(1000));
        post_sale(&mut f, bank, date(2026, 1, 20), dec!(750));

        let report =
            TrialBalanceCalculator::compute(&f.journal, &f.chart, &f.calendar, f.january).unwrap();
        let net: Decimal = report
            .rows
            .iter()
            .map(|r| r.closing_debit - r.closing_credit)
            .sum();
        assert_eq!(net, Decimal::ZERO);
    }

    #[test]
    fn test_unknown_period_rejected() {
        let f = fixture();
        assert!(matches!(
            TrialBalanceCalculator::compute(
                &f.journal,
                &f.chart,
                &f.calendar,
                FiscalPeriodId::new()
            ),
            Err(ReportError::Fiscal(_))
        ));
    }
}
