//! Fixed asset register.

use std::collections::HashMap;

use neraca_shared::types::{AssetCategoryId, FixedAssetId, ScheduleLineId};
use rust_decimal::Decimal;

use super::error::AssetError;
use super::types::{AssetCategory, AssetStatus, FixedAsset, NewFixedAsset, ScheduleLine};

/// Registry of asset categories, assets, and their schedules.
#[derive(Debug, Default)]
pub struct AssetRegister {
    categories: HashMap<AssetCategoryId, AssetCategory>,
    assets: HashMap<FixedAssetId, FixedAsset>,
    schedules: HashMap<FixedAssetId, Vec<ScheduleLine>>,
}

impl AssetRegister {
    /// Creates an empty register.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an asset category.
    pub fn create_category(
        &mut self,
        name: &str,
        default_useful_life_months: u32,
        default_residual_rate: Decimal,
    ) -> AssetCategoryId {
        let id = AssetCategoryId::new();
        self.categories.insert(
            id,
            AssetCategory {
                id,
                name: name.to_string(),
                default_useful_life_months,
                default_residual_rate,
            },
        );
        id
    }

    /// Creates a fixed asset.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateCode`, `CategoryNotFound`, `InvalidCost`, or
    /// `ResidualExceedsCost`.
    pub fn create_asset(&mut self, input: NewFixedAsset) -> Result<FixedAssetId, AssetError> {
        if self.assets.values().any(|a| a.code == input.code) {
            return Err(AssetError::DuplicateCode(input.code));
        }
        if !self.categories.contains_key(&input.category_id) {
            return Err(AssetError::CategoryNotFound(input.category_id));
        }
        if input.acquisition_cost <= Decimal::ZERO {
            return Err(AssetError::InvalidCost(input.acquisition_cost));
        }
        if let Some(residual) = input.residual_value
            && residual > input.acquisition_cost
        {
            return Err(AssetError::ResidualExceedsCost {
                residual,
                cost: input.acquisition_cost,
            });
        }

        let id = FixedAssetId::new();
        self.assets.insert(
            id,
            FixedAsset {
                id,
                code: input.code,
                name: input.name,
                category_id: input.category_id,
                method: input.method,
                acquisition_date: input.acquisition_date,
                acquisition_cost: input.acquisition_cost,
                residual_value: input.residual_value,
                useful_life_months: input.useful_life_months,
                accumulated_depreciation: Decimal::ZERO,
                status: AssetStatus::Active,
                branch_id: input.branch_id,
                cost_center_id: input.cost_center_id,
                project_id: input.project_id,
            },
        );
        Ok(id)
    }

    /// Returns the asset with the given id.
    pub fn asset(&self, id: FixedAssetId) -> Result<&FixedAsset, AssetError> {
        self.assets.get(&id).ok_or(AssetError::AssetNotFound(id))
    }

    /// Returns the category with the given id.
    pub fn category(&self, id: AssetCategoryId) -> Result<&AssetCategory, AssetError> {
        self.categories
            .get(&id)
            .ok_or(AssetError::CategoryNotFound(id))
    }

    /// Returns the schedule rows for an asset in chronological order.
    pub fn schedule(&self, asset_id: FixedAssetId) -> Result<&[ScheduleLine], AssetError> {
        self.schedules
            .get(&asset_id)
            .map(Vec::as_slice)
            .ok_or(AssetError::ScheduleNotGenerated(asset_id))
    }

    /// Finds the asset owning a schedule row.
    #[must_use]
    pub fn find_schedule_line(&self, line_id: ScheduleLineId) -> Option<(FixedAssetId, usize)> {
        for (asset_id, rows) in &self.schedules {
            if let Some(index) = rows.iter().position(|r| r.id == line_id) {
                return Some((*asset_id, index));
            }
        }
        None
    }

    /// Changes an asset's lifecycle status.
    pub fn set_status(&mut self, id: FixedAssetId, status: AssetStatus) -> Result<(), AssetError> {
        let asset = self.assets.get_mut(&id).ok_or(AssetError::AssetNotFound(id))?;
        asset.status = status;
        Ok(())
    }

    pub(crate) fn asset_mut(&mut self, id: FixedAssetId) -> Result<&mut FixedAsset, AssetError> {
        self.assets.get_mut(&id).ok_or(AssetError::AssetNotFound(id))
    }

    pub(crate) fn replace_schedule(&mut self, asset_id: FixedAssetId, rows: Vec<ScheduleLine>) {
        self.schedules.insert(asset_id, rows);
    }

    pub(crate) fn schedule_mut(
        &mut self,
        asset_id: FixedAssetId,
    ) -> Result<&mut Vec<ScheduleLine>, AssetError> {
        self.schedules
            .get_mut(&asset_id)
            .ok_or(AssetError::ScheduleNotGenerated(asset_id))
    }
}
