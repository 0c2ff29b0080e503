//! Fixed assets and depreciation schedules.
//!
//! Straight-line amortization over the asset's useful life, with category
//! defaults and a final-row clamp so net book value never drops below the
//! residual value. Schedule rows post through the posting rule engine and
//! the journal ledger in sequence; the asset's cached accumulated
//! depreciation is recomputed from posted rows inside the same operation.

pub mod depreciation;
pub mod error;
pub mod register;
pub mod types;

#[cfg(test)]
mod depreciation_props;

pub use depreciation::DepreciationEngine;
pub use error::AssetError;
pub use register::AssetRegister;
pub use types::{
    AssetCategory, AssetStatus, DepreciationMethod, FixedAsset, NewFixedAsset, ScheduleLine,
};
