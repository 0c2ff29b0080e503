//! Fiscal year and period calendar.
//!
//! Years and periods are non-overlapping date ranges with open/closed
//! temporal state. Periods close and reopen in chronological order; a
//! closed year freezes every period beneath it.

pub mod calendar;
pub mod error;
pub mod types;

pub use calendar::FiscalCalendar;
pub use error::FiscalError;
pub use types::{FiscalPeriod, FiscalYear};
