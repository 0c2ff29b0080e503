//! Fiscal calendar types.

use chrono::{DateTime, NaiveDate, Utc};
use neraca_shared::types::{FiscalPeriodId, FiscalYearId};
use serde::{Deserialize, Serialize};

/// Fiscal year definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Unique identifier.
    pub id: FiscalYearId,
    /// Year name (e.g., "FY2026").
    pub name: String,
    /// Start date of the fiscal year.
    pub start_date: NaiveDate,
    /// End date of the fiscal year (inclusive).
    pub end_date: NaiveDate,
    /// Whether the year has been closed.
    pub is_closed: bool,
    /// When the year was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl FiscalYear {
    /// Returns true if the given date falls within this year.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if this year's range intersects another range.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }
}

/// A fiscal period within a fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiscalPeriod {
    /// Unique identifier.
    pub id: FiscalPeriodId,
    /// Fiscal year this period belongs to.
    pub fiscal_year_id: FiscalYearId,
    /// Period number within the year, assigned sequentially by start date.
    pub period_number: i32,
    /// Period name (e.g., "January 2026").
    pub name: String,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
    /// Whether the period has been closed.
    pub is_closed: bool,
    /// When the period was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency token, bumped on every close/reopen.
    pub version: i64,
}

impl FiscalPeriod {
    /// Returns true if transactions can be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_closed
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if this period's range intersects another range.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_period() -> FiscalPeriod {
        FiscalPeriod {
            id: FiscalPeriodId::new(),
            fiscal_year_id: FiscalYearId::new(),
            period_number: 1,
            name: "January 2026".to_string(),
            start_date: date(2026, 1, 1),
            end_date: date(2026, 1, 31),
            is_closed: false,
            closed_at: None,
            version: 0,
        }
    }

    #[test]
    fn test_contains_date_inclusive_bounds() {
        let period = sample_period();
        assert!(period.contains_date(date(2026, 1, 1)));
        assert!(period.contains_date(date(2026, 1, 31)));
        assert!(!period.contains_date(date(2025, 12, 31)));
        assert!(!period.contains_date(date(2026, 2, 1)));
    }

    #[test]
    fn test_overlaps() {
        let period = sample_period();
        assert!(period.overlaps(date(2026, 1, 31), date(2026, 2, 28)));
        assert!(!period.overlaps(date(2026, 2, 1), date(2026, 2, 28)));
    }
}
