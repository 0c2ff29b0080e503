//! Fiscal calendar operations.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use neraca_shared::types::{FiscalPeriodId, FiscalYearId};

use super::error::FiscalError;
use super::types::{FiscalPeriod, FiscalYear};

/// Registry of fiscal years and their periods.
#[derive(Debug, Default)]
pub struct FiscalCalendar {
    years: HashMap<FiscalYearId, FiscalYear>,
    periods: HashMap<FiscalPeriodId, FiscalPeriod>,
}

impl FiscalCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fiscal year.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if start >= end, or `OverlappingYear` if the
    /// range intersects an existing year.
    pub fn create_year(
        &mut self,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<FiscalYearId, FiscalError> {
        if start_date >= end_date {
            return Err(FiscalError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        if let Some(existing) = self.years.values().find(|y| y.overlaps(start_date, end_date)) {
            return Err(FiscalError::OverlappingYear(existing.name.clone()));
        }

        let id = FiscalYearId::new();
        self.years.insert(
            id,
            FiscalYear {
                id,
                name: name.to_string(),
                start_date,
                end_date,
                is_closed: false,
                closed_at: None,
            },
        );
        Ok(id)
    }

    /// Creates a fiscal period within a year.
    ///
    /// Period numbers are reassigned sequentially by start date after each
    /// insert.
    ///
    /// # Errors
    ///
    /// Returns `YearNotFound`, `InvalidRange`, `OutOfYearRange`, or
    /// `OverlappingPeriod`.
    pub fn create_period(
        &mut self,
        year_id: FiscalYearId,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<FiscalPeriodId, FiscalError> {
        let year = self.year(year_id)?;
        if start_date >= end_date {
            return Err(FiscalError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        if start_date < year.start_date || end_date > year.end_date {
            return Err(FiscalError::OutOfYearRange);
        }
        if let Some(existing) = self
            .periods
            .values()
            .find(|p| p.fiscal_year_id == year_id && p.overlaps(start_date, end_date))
        {
            return Err(FiscalError::OverlappingPeriod(existing.name.clone()));
        }

        let id = FiscalPeriodId::new();
        self.periods.insert(
            id,
            FiscalPeriod {
                id,
                fiscal_year_id: year_id,
                period_number: 0,
                name: name.to_string(),
                start_date,
                end_date,
                is_closed: false,
                closed_at: None,
                version: 0,
            },
        );
        self.renumber_periods(year_id);
        Ok(id)
    }

    /// Returns the fiscal year with the given id.
    pub fn year(&self, id: FiscalYearId) -> Result<&FiscalYear, FiscalError> {
        self.years.get(&id).ok_or(FiscalError::YearNotFound(id))
    }

    /// Returns the fiscal period with the given id.
    pub fn period(&self, id: FiscalPeriodId) -> Result<&FiscalPeriod, FiscalError> {
        self.periods.get(&id).ok_or(FiscalError::PeriodNotFound(id))
    }

    /// Returns the periods of a year ordered by start date.
    #[must_use]
    pub fn periods_of_year(&self, year_id: FiscalYearId) -> Vec<&FiscalPeriod> {
        let mut periods: Vec<&FiscalPeriod> = self
            .periods
            .values()
            .filter(|p| p.fiscal_year_id == year_id)
            .collect();
        periods.sort_by_key(|p| p.start_date);
        periods
    }

    /// Returns the year that starts on the given date, if any.
    #[must_use]
    pub fn year_starting_on(&self, date: NaiveDate) -> Option<&FiscalYear> {
        self.years.values().find(|y| y.start_date == date)
    }

    /// Closes a fiscal period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodAlreadyClosed`, or `PeriodOrderViolation` if an
    /// earlier period in the same year is still open.
    pub fn close_period(&mut self, id: FiscalPeriodId) -> Result<(), FiscalError> {
        let period = self.period(id)?;
        if period.is_closed {
            return Err(FiscalError::PeriodAlreadyClosed(id));
        }
        let earlier_open = self
            .periods
            .values()
            .any(|p| p.fiscal_year_id == period.fiscal_year_id && p.start_date < period.start_date && !p.is_closed);
        if earlier_open {
            return Err(FiscalError::PeriodOrderViolation);
        }

        if let Some(period) = self.periods.get_mut(&id) {
            period.is_closed = true;
            period.closed_at = Some(Utc::now());
            period.version += 1;
        }
        Ok(())
    }

    /// Reopens a closed fiscal period.
    ///
    /// # Errors
    ///
    /// Returns `PeriodNotClosed`, `YearAlreadyClosed` if the owning year is
    /// closed, or `PeriodOrderViolation` if a later period in the same year
    /// is still closed.
    pub fn reopen_period(&mut self, id: FiscalPeriodId) -> Result<(), FiscalError> {
        let period = self.period(id)?;
        if !period.is_closed {
            return Err(FiscalError::PeriodNotClosed(id));
        }
        let year = self.year(period.fiscal_year_id)?;
        if year.is_closed {
            return Err(FiscalError::YearAlreadyClosed(year.id));
        }
        let later_closed = self
            .periods
            .values()
            .any(|p| p.fiscal_year_id == period.fiscal_year_id && p.start_date > period.start_date && p.is_closed);
        if later_closed {
            return Err(FiscalError::PeriodOrderViolation);
        }

        if let Some(period) = self.periods.get_mut(&id) {
            period.is_closed = false;
            period.closed_at = None;
            period.version += 1;
        }
        Ok(())
    }

    /// Resolves the open period containing the given date.
    ///
    /// # Errors
    ///
    /// Returns `PeriodClosed` if the containing period is closed, or
    /// `NoOpenPeriod` if no period contains the date.
    pub fn resolve_period(&self, date: NaiveDate) -> Result<&FiscalPeriod, FiscalError> {
        let period = self.resolve_period_any(date)?;
        if period.is_closed {
            return Err(FiscalError::PeriodClosed(period.id));
        }
        Ok(period)
    }

    /// Resolves the period containing the given date regardless of its
    /// open/closed state.
    ///
    /// # Errors
    ///
    /// Returns `NoOpenPeriod` if no period contains the date.
    pub fn resolve_period_any(&self, date: NaiveDate) -> Result<&FiscalPeriod, FiscalError> {
        self.periods
            .values()
            .find(|p| p.contains_date(date))
            .ok_or(FiscalError::NoOpenPeriod(date))
    }

    /// Marks a fiscal year closed.
    ///
    /// The closing engine is the orchestrator here; it verifies open
    /// vouchers and periods before calling this.
    ///
    /// # Errors
    ///
    /// Returns `YearAlreadyClosed`.
    pub fn close_year(&mut self, id: FiscalYearId) -> Result<(), FiscalError> {
        let year = self.year(id)?;
        if year.is_closed {
            return Err(FiscalError::YearAlreadyClosed(id));
        }
        if let Some(year) = self.years.get_mut(&id) {
            year.is_closed = true;
            year.closed_at = Some(Utc::now());
        }
        Ok(())
    }

    fn renumber_periods(&mut self, year_id: FiscalYearId) {
        let mut ids: Vec<(NaiveDate, FiscalPeriodId)> = self
            .periods
            .values()
            .filter(|p| p.fiscal_year_id == year_id)
            .map(|p| (p.start_date, p.id))
            .collect();
        ids.sort_by_key(|(start, _)| *start);
        for (index, (_, id)) in ids.into_iter().enumerate() {
            if let Some(period) = self.periods.get_mut(&id) {
                period.period_number = i32::try_from(index).unwrap_or(i32::MAX) + 1;
            }
        }
    }
}
