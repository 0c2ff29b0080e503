//! Ledger error types for validation and state errors.

use neraca_shared::types::{FiscalPeriodId, VoucherId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::accounts::error::AccountError;
use crate::fiscal::error::FiscalError;
use crate::ledger::types::VoucherStatus;

/// Errors that can occur during journal ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Voucher must have at least one debit and one credit line.
    #[error("Voucher must have at least 2 lines")]
    InsufficientLines,

    /// Voucher is not balanced (debits != credits).
    #[error("Voucher is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line has zero on both sides.
    #[error("Line {line} must have a nonzero debit or credit")]
    ZeroAmountLine {
        /// The 1-based line number.
        line: u32,
    },

    /// Line has nonzero amounts on both sides.
    #[error("Line {line} must not have both debit and credit amounts")]
    BothSidesSet {
        /// The 1-based line number.
        line: u32,
    },

    /// Line amount is negative.
    #[error("Line {line} amount cannot be negative")]
    NegativeAmount {
        /// The 1-based line number.
        line: u32,
    },

    /// Line exchange rate must be positive.
    #[error("Line {line} exchange rate must be positive")]
    InvalidFxRate {
        /// The 1-based line number.
        line: u32,
    },

    // ========== Collaborator Errors ==========
    /// Account validation failed (not found / inactive / not postable).
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Fiscal period resolution failed (no open period / period closed).
    #[error(transparent)]
    Fiscal(#[from] FiscalError),

    // ========== Voucher State Errors ==========
    /// Voucher not found.
    #[error("Voucher not found: {0}")]
    VoucherNotFound(VoucherId),

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: VoucherStatus,
        /// The attempted target status.
        to: VoucherStatus,
    },

    /// Attempted to cancel or modify a posted voucher.
    #[error("Voucher {0} is already posted")]
    AlreadyPosted(VoucherId),

    /// Reversal requires a posted voucher.
    #[error("Voucher {0} is not posted")]
    NotPosted(VoucherId),

    // ========== Concurrency Errors ==========
    /// A concurrent period close invalidated this posting attempt.
    #[error("Fiscal period {period} changed concurrently, please retry")]
    ConcurrencyConflict {
        /// The contended period.
        period: FiscalPeriodId,
    },
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::ZeroAmountLine { .. } => "ZERO_AMOUNT_LINE",
            Self::BothSidesSet { .. } => "BOTH_SIDES_SET",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::InvalidFxRate { .. } => "INVALID_FX_RATE",
            Self::Account(err) => err.error_code(),
            Self::Fiscal(err) => err.error_code(),
            Self::VoucherNotFound(_) => "VOUCHER_NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::AlreadyPosted(_) => "ALREADY_POSTED",
            Self::NotPosted(_) => "NOT_POSTED",
            Self::ConcurrencyConflict { .. } => "CONCURRENCY_CONFLICT",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientLines
            | Self::UnbalancedEntry { .. }
            | Self::ZeroAmountLine { .. }
            | Self::BothSidesSet { .. }
            | Self::NegativeAmount { .. }
            | Self::InvalidFxRate { .. }
            | Self::Fiscal(_)
            | Self::InvalidTransition { .. }
            | Self::AlreadyPosted(_)
            | Self::NotPosted(_) => 400,

            Self::Account(AccountError::AccountNotFound(_)) | Self::VoucherNotFound(_) => 404,
            Self::Account(_) => 400,

            Self::ConcurrencyConflict { .. } => 409,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neraca_shared::types::AccountId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::UnbalancedEntry {
                debit: dec!(100),
                credit: dec!(50),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(
            LedgerError::ZeroAmountLine { line: 1 }.error_code(),
            "ZERO_AMOUNT_LINE"
        );
        assert_eq!(
            LedgerError::from(FiscalError::PeriodClosed(FiscalPeriodId::new())).error_code(),
            "PERIOD_CLOSED"
        );
        assert_eq!(
            LedgerError::from(AccountError::AccountInactive(AccountId::new())).error_code(),
            "ACCOUNT_INACTIVE"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InsufficientLines.http_status_code(), 400);
        assert_eq!(
            LedgerError::VoucherNotFound(VoucherId::new()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::from(AccountError::AccountNotFound(AccountId::new()))
                .http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::ConcurrencyConflict {
                period: FiscalPeriodId::new(),
            }
            .http_status_code(),
            409
        );
    }

    #[test]
    fn test_retryable_errors() {
        assert!(
            LedgerError::ConcurrencyConflict {
                period: FiscalPeriodId::new(),
            }
            .is_retryable()
        );
        assert!(!LedgerError::InsufficientLines.is_retryable());
    }

    #[test]
    fn test_error_display_includes_amounts() {
        let err = LedgerError::UnbalancedEntry {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Voucher is not balanced. Debit: 100.00, Credit: 50.00"
        );
    }
}
