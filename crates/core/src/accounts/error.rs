//! Account error types.

use neraca_shared::types::AccountId;
use thiserror::Error;

/// Errors that can occur during chart-of-accounts operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account code already exists in the chart.
    #[error("Account code {0} already exists")]
    DuplicateCode(String),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(AccountId),

    /// The requested parent chain would contain the account itself.
    #[error("Reparenting account {0} would create a cycle")]
    CycleDetected(AccountId),

    /// Account is inactive and cannot be used.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Account does not allow direct posting.
    #[error("Account {0} is not a posting account")]
    AccountNotPostable(AccountId),

    /// Account has posted journal lines and cannot be restructured.
    #[error("Account {0} has posted journal lines and cannot be changed")]
    AccountInUse(AccountId),
}

impl AccountError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::ParentNotFound(_) => "PARENT_ACCOUNT_NOT_FOUND",
            Self::CycleDetected(_) => "ACCOUNT_CYCLE_DETECTED",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountNotPostable(_) => "ACCOUNT_NOT_POSTABLE",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
        }
    }
}
