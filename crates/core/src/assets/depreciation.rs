//! Straight-line depreciation schedule generation and posting.

use chrono::Months;
use neraca_shared::types::{ScheduleLineId, UserId, VoucherId};
use neraca_shared::types::money::round_amount;
use rust_decimal::Decimal;

use super::error::AssetError;
use super::register::AssetRegister;
use super::types::{AssetStatus, DepreciationMethod, ScheduleLine};
use crate::accounts::chart::ChartOfAccounts;
use crate::fiscal::calendar::FiscalCalendar;
use crate::ledger::journal::JournalLedger;
use crate::ledger::types::{CreateVoucherInput, VoucherType};
use crate::posting::engine::PostingRuleSet;
use crate::posting::types::{DocumentKind, SourceDocument};

/// Generates and posts depreciation schedules.
pub struct DepreciationEngine;

impl DepreciationEngine {
    /// Generates the monthly schedule for an asset.
    ///
    /// Useful life falls back to the category default when the asset
    /// carries zero; residual value falls back to the category's default
    /// percent of cost when unset. The final row is clamped so net book
    /// value never drops below the residual value. Returns the number of
    /// rows generated.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUsefulLife`, `ResidualExceedsCost`, or
    /// `ScheduleHasPostedRows` when regenerating after posting started.
    pub fn generate_schedule(
        register: &mut AssetRegister,
        asset_id: neraca_shared::types::FixedAssetId,
        decimal_places: u32,
    ) -> Result<usize, AssetError> {
        let asset = register.asset(asset_id)?.clone();
        let category = register.category(asset.category_id)?.clone();

        if let Ok(rows) = register.schedule(asset_id)
            && rows.iter().any(|r| r.posted)
        {
            return Err(AssetError::ScheduleHasPostedRows(asset_id));
        }

        let useful_life = if asset.useful_life_months > 0 {
            asset.useful_life_months
        } else {
            category.default_useful_life_months
        };
        if useful_life == 0 {
            return Err(AssetError::InvalidUsefulLife(asset_id));
        }

        let residual = match asset.residual_value {
            Some(value) => value,
            None => round_amount(
                asset.acquisition_cost * category.default_residual_rate,
                decimal_places,
            ),
        };
        if residual > asset.acquisition_cost {
            return Err(AssetError::ResidualExceedsCost {
                residual,
                cost: asset.acquisition_cost,
            });
        }

        let depreciable = asset.acquisition_cost - residual;
        let monthly = match asset.method {
            DepreciationMethod::StraightLine => round_amount(
                depreciable / Decimal::from(useful_life),
                decimal_places,
            ),
        };

        let mut rows = Vec::new();
        let mut accumulated = Decimal::ZERO;
        for sequence in 1..=useful_life {
            let remaining = depreciable - accumulated;
            // The last row (and a monthly amount that rounds to zero)
            // absorbs the remainder so the schedule lands exactly on the
            // depreciable base.
            let amount = if sequence == useful_life || monthly >= remaining || monthly.is_zero() {
                remaining
            } else {
                monthly
            };
            if amount <= Decimal::ZERO {
                break;
            }
            accumulated += amount;
            rows.push(ScheduleLine {
                id: ScheduleLineId::new(),
                asset_id,
                sequence,
                period_date: asset.acquisition_date + Months::new(sequence - 1),
                amount,
                accumulated,
                net_book_value: asset.acquisition_cost - accumulated,
                posted: false,
                voucher_id: None,
            });
        }

        let count = rows.len();
        register.replace_schedule(asset_id, rows);
        Ok(count)
    }

    /// Posts one schedule row to the ledger.
    ///
    /// Obtains the balanced expense/accumulated-depreciation legs from the
    /// posting rule engine, posts them through the journal ledger, marks
    /// the row posted, and recomputes the asset's cached accumulated
    /// depreciation from posted rows.
    ///
    /// # Errors
    ///
    /// Returns `OutOfSequencePosting` when an earlier row is unposted,
    /// `AssetNotActive` unless the asset is active, plus rule and ledger
    /// errors.
    pub fn post_schedule_line(
        register: &mut AssetRegister,
        journal: &mut JournalLedger,
        chart: &ChartOfAccounts,
        calendar: &FiscalCalendar,
        rules: &PostingRuleSet,
        line_id: ScheduleLineId,
        posted_by: UserId,
    ) -> Result<VoucherId, AssetError> {
        let (asset_id, index) = register
            .find_schedule_line(line_id)
            .ok_or(AssetError::ScheduleLineNotFound(line_id))?;
        let asset = register.asset(asset_id)?.clone();
        if !asset.status.allows_depreciation() {
            return Err(AssetError::AssetNotActive(asset_id));
        }

        let rows = register.schedule(asset_id)?;
        let row = &rows[index];
        if row.posted {
            return Err(AssetError::ScheduleLineAlreadyPosted(line_id));
        }
        if rows.iter().take(index).any(|r| !r.posted) {
            return Err(AssetError::OutOfSequencePosting(asset_id));
        }

        let rule = rules.lookup(DocumentKind::DepreciationCharge)?;
        let lines = PostingRuleSet::apply(rule, row.amount, None, None)?
            .into_iter()
            .map(|line| {
                line.with_source(SourceDocument {
                    kind: DocumentKind::DepreciationCharge,
                    document_id: line_id.into_inner(),
                })
            })
            .collect();

        let input = CreateVoucherInput {
            voucher_type: VoucherType::Depreciation,
            date: row.period_date,
            description: format!("Depreciation {} ({})", asset.code, row.period_date),
            branch_id: asset.branch_id,
            lines,
            created_by: posted_by,
        };
        let voucher_id = journal.create_and_post(chart, calendar, input)?;

        let rows = register.schedule_mut(asset_id)?;
        rows[index].posted = true;
        rows[index].voucher_id = Some(voucher_id);
        let posted_total: Decimal = rows.iter().filter(|r| r.posted).map(|r| r.amount).sum();
        let fully_posted = rows.iter().all(|r| r.posted);

        let asset = register.asset_mut(asset_id)?;
        asset.accumulated_depreciation = posted_total;
        if fully_posted && asset.net_book_value() <= asset.residual_value.unwrap_or(Decimal::ZERO)
        {
            asset.status = AssetStatus::FullyDepreciated;
        }
        tracing::info!(asset = %asset.code, voucher = %voucher_id, "depreciation posted");
        Ok(voucher_id)
    }
}
