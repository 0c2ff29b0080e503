//! Posting rule error types.

use rust_decimal::Decimal;
use thiserror::Error;

use super::types::DocumentKind;

/// Errors that can occur during posting rule operations.
#[derive(Debug, Error)]
pub enum PostingError {
    /// No active rule matches the document kind.
    #[error("No active posting rule for document kind {0}")]
    RuleNotFound(DocumentKind),

    /// Amounts must be non-negative and the net debit must stay positive.
    #[error("Invalid amount {0} for posting rule application")]
    InvalidAmount(Decimal),

    /// A tax amount was supplied but the rule has no tax account.
    #[error("Posting rule for {0} has no tax account configured")]
    TaxAccountNotConfigured(DocumentKind),

    /// A discount amount was supplied but the rule has no discount account.
    #[error("Posting rule for {0} has no discount account configured")]
    DiscountAccountNotConfigured(DocumentKind),

    /// A configured account code does not exist in the chart.
    #[error("Configured account code {0} not found in chart of accounts")]
    UnmappedAccountCode(String),
}

impl PostingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RuleNotFound(_) => "RULE_NOT_FOUND",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::TaxAccountNotConfigured(_) => "TAX_ACCOUNT_NOT_CONFIGURED",
            Self::DiscountAccountNotConfigured(_) => "DISCOUNT_ACCOUNT_NOT_CONFIGURED",
            Self::UnmappedAccountCode(_) => "UNMAPPED_ACCOUNT_CODE",
        }
    }
}
