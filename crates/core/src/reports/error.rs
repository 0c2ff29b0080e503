//! Report error types.

use thiserror::Error;

use crate::accounts::error::AccountError;
use crate::fiscal::error::FiscalError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Account lookup failed.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Fiscal period lookup failed.
    #[error(transparent)]
    Fiscal(#[from] FiscalError),
}

impl ReportError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Account(err) => err.error_code(),
            Self::Fiscal(err) => err.error_code(),
        }
    }
}
