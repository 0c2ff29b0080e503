//! Fiscal calendar error types.

use chrono::NaiveDate;
use neraca_shared::types::{FiscalPeriodId, FiscalYearId};
use thiserror::Error;

/// Errors that can occur during fiscal calendar operations.
#[derive(Debug, Error)]
pub enum FiscalError {
    /// Start date is not before the end date.
    #[error("Invalid date range: {start} must be before {end}")]
    InvalidRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// The requested year range intersects an existing year.
    #[error("Date range overlaps existing fiscal year {0}")]
    OverlappingYear(String),

    /// The requested period range intersects a sibling period.
    #[error("Date range overlaps existing fiscal period {0}")]
    OverlappingPeriod(String),

    /// The requested period range is not inside the owning year.
    #[error("Period range is outside the fiscal year range")]
    OutOfYearRange,

    /// Fiscal year not found.
    #[error("Fiscal year not found: {0}")]
    YearNotFound(FiscalYearId),

    /// Fiscal period not found.
    #[error("Fiscal period not found: {0}")]
    PeriodNotFound(FiscalPeriodId),

    /// No fiscal period contains the given date.
    #[error("No open fiscal period for date {0}")]
    NoOpenPeriod(NaiveDate),

    /// The containing period is closed.
    #[error("Fiscal period {0} is closed")]
    PeriodClosed(FiscalPeriodId),

    /// The period is already closed.
    #[error("Fiscal period {0} is already closed")]
    PeriodAlreadyClosed(FiscalPeriodId),

    /// The period is not closed, so it cannot be reopened.
    #[error("Fiscal period {0} is not closed")]
    PeriodNotClosed(FiscalPeriodId),

    /// The owning year is already closed.
    #[error("Fiscal year {0} is already closed")]
    YearAlreadyClosed(FiscalYearId),

    /// Periods must close and reopen in chronological order.
    #[error("Fiscal periods must close and reopen in chronological order")]
    PeriodOrderViolation,
}

impl FiscalError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::OverlappingYear(_) => "OVERLAPPING_YEAR",
            Self::OverlappingPeriod(_) => "OVERLAPPING_PERIOD",
            Self::OutOfYearRange => "OUT_OF_YEAR_RANGE",
            Self::YearNotFound(_) => "FISCAL_YEAR_NOT_FOUND",
            Self::PeriodNotFound(_) => "FISCAL_PERIOD_NOT_FOUND",
            Self::NoOpenPeriod(_) => "NO_OPEN_PERIOD",
            Self::PeriodClosed(_) => "PERIOD_CLOSED",
            Self::PeriodAlreadyClosed(_) => "PERIOD_ALREADY_CLOSED",
            Self::PeriodNotClosed(_) => "PERIOD_NOT_CLOSED",
            Self::YearAlreadyClosed(_) => "YEAR_ALREADY_CLOSED",
            Self::PeriodOrderViolation => "PERIOD_ORDER_VIOLATION",
        }
    }
}
