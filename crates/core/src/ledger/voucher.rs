//! Journal voucher aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use neraca_shared::types::{
    AccountId, BranchId, CostCenterId, FiscalPeriodId, JournalLineId, PartyId, ProjectId, UserId,
    VoucherId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{VoucherStatus, VoucherType};
use crate::posting::types::SourceDocument;

/// A journal voucher consisting of balanced journal lines.
///
/// Lines are immutable once the voucher is posted; a posted voucher is
/// only ever undone by a reversing voucher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalVoucher {
    /// Unique identifier.
    pub id: VoucherId,
    /// Sequential voucher number (e.g. "JV-000042").
    pub number: String,
    /// Voucher type classification.
    pub voucher_type: VoucherType,
    /// Voucher date.
    pub date: NaiveDate,
    /// Voucher description.
    pub description: String,
    /// Current status.
    pub status: VoucherStatus,
    /// Optional branch.
    pub branch_id: Option<BranchId>,
    /// The fiscal period resolved from the voucher date.
    pub fiscal_period_id: FiscalPeriodId,
    /// The original voucher when this voucher is a reversal.
    pub reversal_of: Option<VoucherId>,
    /// Journal lines in stable order.
    pub lines: Vec<JournalLine>,
    /// User who created the voucher.
    pub created_by: UserId,
    /// When the voucher was created.
    pub created_at: DateTime<Utc>,
    /// When the voucher was posted.
    pub posted_at: Option<DateTime<Utc>>,
}

impl JournalVoucher {
    /// Returns true if the voucher can be submitted for approval.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.status == VoucherStatus::Draft
    }

    /// Returns true if the voucher can be approved.
    #[must_use]
    pub fn can_approve(&self) -> bool {
        self.status == VoucherStatus::Pending
    }

    /// Returns true if the voucher can be posted.
    #[must_use]
    pub fn can_post(&self) -> bool {
        self.status == VoucherStatus::Approved
    }

    /// Returns true if the voucher can be cancelled.
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        matches!(
            self.status,
            VoucherStatus::Draft | VoucherStatus::Pending | VoucherStatus::Approved
        )
    }

    /// Returns true if the voucher can be reversed.
    #[must_use]
    pub fn can_reverse(&self) -> bool {
        self.status == VoucherStatus::Posted
    }

    /// Returns the total debit and credit amounts.
    #[must_use]
    pub fn totals(&self) -> (Decimal, Decimal) {
        let debit = self.lines.iter().map(|l| l.debit).sum();
        let credit = self.lines.iter().map(|l| l.credit).sum();
        (debit, credit)
    }

    /// Returns true if total debits equal total credits exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let (debit, credit) = self.totals();
        debit == credit
    }
}

/// A single journal line within a voucher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// Unique identifier.
    pub id: JournalLineId,
    /// The voucher this line belongs to.
    pub voucher_id: VoucherId,
    /// 1-based line number in input order.
    pub line_number: u32,
    /// The account affected by this line.
    pub account_id: AccountId,
    /// Debit amount in functional currency (zero if credit).
    pub debit: Decimal,
    /// Credit amount in functional currency (zero if debit).
    pub credit: Decimal,
    /// Optional memo/description.
    pub description: Option<String>,
    /// Optional party (customer/vendor/employee).
    pub party_id: Option<PartyId>,
    /// Optional cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Optional project.
    pub project_id: Option<ProjectId>,
    /// Original currency code when translated upstream.
    pub currency: Option<String>,
    /// Exchange rate applied upstream.
    pub fx_rate: Decimal,
    /// Optional reference to the business document behind this line.
    pub source: Option<SourceDocument>,
}

impl JournalLine {
    /// Returns the signed amount (positive for debit, negative for credit).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }
}
