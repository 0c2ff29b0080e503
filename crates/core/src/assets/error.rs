//! Fixed asset error types.

use neraca_shared::types::{AssetCategoryId, FixedAssetId, ScheduleLineId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::ledger::error::LedgerError;
use crate::posting::error::PostingError;

/// Errors that can occur during fixed asset operations.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Asset not found.
    #[error("Fixed asset not found: {0}")]
    AssetNotFound(FixedAssetId),

    /// Category not found.
    #[error("Asset category not found: {0}")]
    CategoryNotFound(AssetCategoryId),

    /// Asset code already exists.
    #[error("Asset code {0} already exists")]
    DuplicateCode(String),

    /// Acquisition cost must be positive.
    #[error("Acquisition cost must be positive, got {0}")]
    InvalidCost(Decimal),

    /// Neither the asset nor its category supplies a useful life.
    #[error("Asset {0} has no useful life and its category has no default")]
    InvalidUsefulLife(FixedAssetId),

    /// Residual value exceeds the acquisition cost.
    #[error("Residual value {residual} exceeds acquisition cost {cost}")]
    ResidualExceedsCost {
        /// The effective residual value.
        residual: Decimal,
        /// The acquisition cost.
        cost: Decimal,
    },

    /// The asset has no generated schedule.
    #[error("Asset {0} has no depreciation schedule")]
    ScheduleNotGenerated(FixedAssetId),

    /// A schedule with posted rows cannot be regenerated.
    #[error("Asset {0} has posted schedule rows; schedule cannot be regenerated")]
    ScheduleHasPostedRows(FixedAssetId),

    /// Schedule row not found.
    #[error("Schedule row not found: {0}")]
    ScheduleLineNotFound(ScheduleLineId),

    /// The row is already posted.
    #[error("Schedule row {0} is already posted")]
    ScheduleLineAlreadyPosted(ScheduleLineId),

    /// An earlier row for the same asset is still unposted.
    #[error("An earlier schedule row for asset {0} is still unposted")]
    OutOfSequencePosting(FixedAssetId),

    /// The asset's status does not allow depreciation.
    #[error("Asset {0} is not active")]
    AssetNotActive(FixedAssetId),

    /// Posting rule lookup or application failed.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Journal ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl AssetError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AssetNotFound(_) => "ASSET_NOT_FOUND",
            Self::CategoryNotFound(_) => "ASSET_CATEGORY_NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_ASSET_CODE",
            Self::InvalidCost(_) => "INVALID_ACQUISITION_COST",
            Self::InvalidUsefulLife(_) => "INVALID_USEFUL_LIFE",
            Self::ResidualExceedsCost { .. } => "RESIDUAL_EXCEEDS_COST",
            Self::ScheduleNotGenerated(_) => "SCHEDULE_NOT_GENERATED",
            Self::ScheduleHasPostedRows(_) => "SCHEDULE_HAS_POSTED_ROWS",
            Self::ScheduleLineNotFound(_) => "SCHEDULE_LINE_NOT_FOUND",
            Self::ScheduleLineAlreadyPosted(_) => "SCHEDULE_LINE_ALREADY_POSTED",
            Self::OutOfSequencePosting(_) => "OUT_OF_SEQUENCE_POSTING",
            Self::AssetNotActive(_) => "ASSET_NOT_ACTIVE",
            Self::Posting(err) => err.error_code(),
            Self::Ledger(err) => err.error_code(),
        }
    }
}
