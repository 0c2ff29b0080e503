//! Fixed asset domain types.

use chrono::NaiveDate;
use neraca_shared::types::{
    AssetCategoryId, BranchId, CostCenterId, FixedAssetId, ProjectId, ScheduleLineId, VoucherId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a fixed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// Asset is in service and depreciating.
    Active,
    /// Depreciation is temporarily suspended.
    Suspended,
    /// Asset has been disposed of.
    Disposed,
    /// Asset has reached its residual value.
    FullyDepreciated,
}

impl AssetStatus {
    /// Returns true if schedule rows may post for this asset.
    #[must_use]
    pub fn allows_depreciation(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Depreciation method.
///
/// Only straight-line is implemented; the enum keeps the wire shape open
/// for reducing-balance methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepreciationMethod {
    /// Equal monthly amounts over the useful life.
    StraightLine,
}

/// A fixed asset category supplying defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetCategory {
    /// Unique identifier.
    pub id: AssetCategoryId,
    /// Category name.
    pub name: String,
    /// Default useful life in months, used when the asset carries zero.
    pub default_useful_life_months: u32,
    /// Default residual value as a fraction of cost (0..1), used when the
    /// asset has no explicit residual value.
    pub default_residual_rate: Decimal,
}

/// A fixed asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedAsset {
    /// Unique identifier.
    pub id: FixedAssetId,
    /// Asset code, unique within the register.
    pub code: String,
    /// Asset name.
    pub name: String,
    /// Category supplying defaults.
    pub category_id: AssetCategoryId,
    /// Depreciation method.
    pub method: DepreciationMethod,
    /// Acquisition date; the schedule starts here.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    pub acquisition_cost: Decimal,
    /// Explicit residual value; category default applies when None.
    pub residual_value: Option<Decimal>,
    /// Useful life in months; category default applies when zero.
    pub useful_life_months: u32,
    /// Cached sum of posted schedule amounts. Recomputed from posted rows
    /// inside every posting operation, never mutated independently.
    pub accumulated_depreciation: Decimal,
    /// Lifecycle status.
    pub status: AssetStatus,
    /// Optional branch.
    pub branch_id: Option<BranchId>,
    /// Optional cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Optional project.
    pub project_id: Option<ProjectId>,
}

impl FixedAsset {
    /// Returns the net book value (cost minus accumulated depreciation).
    #[must_use]
    pub fn net_book_value(&self) -> Decimal {
        self.acquisition_cost - self.accumulated_depreciation
    }
}

/// Input for creating a fixed asset.
#[derive(Debug, Clone)]
pub struct NewFixedAsset {
    /// Asset code, unique within the register.
    pub code: String,
    /// Asset name.
    pub name: String,
    /// Category supplying defaults.
    pub category_id: AssetCategoryId,
    /// Depreciation method.
    pub method: DepreciationMethod,
    /// Acquisition date.
    pub acquisition_date: NaiveDate,
    /// Acquisition cost.
    pub acquisition_cost: Decimal,
    /// Useful life in months; zero selects the category default.
    pub useful_life_months: u32,
    /// Residual value; None selects the category default.
    pub residual_value: Option<Decimal>,
    /// Optional branch.
    pub branch_id: Option<BranchId>,
    /// Optional cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Optional project.
    pub project_id: Option<ProjectId>,
}

/// One monthly row of a depreciation schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleLine {
    /// Unique identifier.
    pub id: ScheduleLineId,
    /// The asset this row belongs to.
    pub asset_id: FixedAssetId,
    /// 1-based row number in chronological order.
    pub sequence: u32,
    /// The month this row charges.
    pub period_date: NaiveDate,
    /// Depreciation amount for the month.
    pub amount: Decimal,
    /// Accumulated depreciation after this row.
    pub accumulated: Decimal,
    /// Net book value after this row.
    pub net_book_value: Decimal,
    /// Whether the row has been posted to the ledger.
    pub posted: bool,
    /// The voucher created when the row posted.
    pub voucher_id: Option<VoucherId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_asset_status_allows_depreciation() {
        assert!(AssetStatus::Active.allows_depreciation());
        assert!(!AssetStatus::Suspended.allows_depreciation());
        assert!(!AssetStatus::Disposed.allows_depreciation());
        assert!(!AssetStatus::FullyDepreciated.allows_depreciation());
    }

    #[test]
    fn test_net_book_value() {
        let asset = FixedAsset {
            id: FixedAssetId::new(),
            code: "FA-001".to_string(),
            name: "Delivery van".to_string(),
            category_id: AssetCategoryId::new(),
            method: DepreciationMethod::StraightLine,
            acquisition_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            acquisition_cost: dec!(12000),
            residual_value: Some(dec!(2000)),
            useful_life_months: 48,
            accumulated_depreciation: dec!(2500),
            status: AssetStatus::Active,
            branch_id: None,
            cost_center_id: None,
            project_id: None,
        };
        assert_eq!(asset.net_book_value(), dec!(9500));
    }
}
