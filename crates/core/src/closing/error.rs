//! Closing engine error types.

use neraca_shared::types::{FiscalPeriodId, FiscalYearId};
use thiserror::Error;

use crate::accounts::error::AccountError;
use crate::fiscal::error::FiscalError;
use crate::ledger::error::LedgerError;

/// Errors that can occur during period and year closes.
#[derive(Debug, Error)]
pub enum ClosingError {
    /// The fiscal year is already closed.
    #[error("Fiscal year {0} is already closed")]
    AlreadyClosed(FiscalYearId),

    /// The year cannot close while periods are open.
    #[error("Fiscal year {year} still has {open} open period(s)")]
    PeriodsStillOpen {
        /// The fiscal year.
        year: FiscalYearId,
        /// Number of open periods.
        open: usize,
    },

    /// The period cannot close while unsettled vouchers remain.
    #[error("Fiscal period {period} has {count} voucher(s) that are neither posted nor cancelled")]
    OpenVouchersExist {
        /// The fiscal period.
        period: FiscalPeriodId,
        /// Number of unsettled vouchers.
        count: usize,
    },

    /// Fiscal calendar operation failed.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    /// Journal ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The profit-and-loss account is unusable.
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl ClosingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyClosed(_) => "YEAR_ALREADY_CLOSED",
            Self::PeriodsStillOpen { .. } => "PERIODS_STILL_OPEN",
            Self::OpenVouchersExist { .. } => "OPEN_VOUCHERS_EXIST",
            Self::Fiscal(err) => err.error_code(),
            Self::Ledger(err) => err.error_code(),
            Self::Account(err) => err.error_code(),
        }
    }
}
