//! Ledger domain types for voucher creation and validation.

use chrono::NaiveDate;
use neraca_shared::types::{AccountId, BranchId, CostCenterId, PartyId, ProjectId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::posting::types::SourceDocument;

/// Voucher status in the approval workflow.
///
/// Vouchers progress through these states from creation to posting.
/// The valid transitions are:
/// - Draft -> Pending (submit)
/// - Pending -> Approved (approve)
/// - Pending -> Draft (reject)
/// - Approved -> Posted (post)
/// - Draft | Pending | Approved -> Cancelled (cancel)
///
/// Posted and Cancelled are terminal; a posted voucher is only ever undone
/// by a reversing voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    /// Voucher is being drafted and can be modified.
    Draft,
    /// Voucher has been submitted for approval.
    Pending,
    /// Voucher has been approved and is ready for posting.
    Approved,
    /// Voucher has been posted to the ledger (immutable).
    Posted,
    /// Voucher has been cancelled (immutable).
    Cancelled,
}

impl VoucherStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if the voucher can be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the voucher is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Cancelled)
    }

    /// Returns true if the voucher no longer blocks a period close.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Posted | Self::Cancelled)
    }
}

impl fmt::Display for VoucherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voucher type classification.
///
/// Categorizes vouchers for reporting and drives the few type-specific
/// posting rules (closing entries may land in closed periods of an open
/// year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    /// General journal entry.
    Journal,
    /// Sales invoice.
    Invoice,
    /// Vendor bill.
    Bill,
    /// Payment (incoming or outgoing).
    Payment,
    /// Adjustment entry.
    Adjustment,
    /// Monthly depreciation charge.
    Depreciation,
    /// Opening balance entry carried forward from a closed year.
    OpeningBalance,
    /// Year-end closing entry.
    Closing,
    /// Reversal of a posted voucher.
    Reversal,
}

/// Input for a single journal line.
///
/// Exactly one of `debit` and `credit` must be nonzero.
#[derive(Debug, Clone)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount in functional currency (zero if credit).
    pub debit: Decimal,
    /// Credit amount in functional currency (zero if debit).
    pub credit: Decimal,
    /// Optional memo/description for this line.
    pub description: Option<String>,
    /// Optional party (customer/vendor/employee).
    pub party_id: Option<PartyId>,
    /// Optional cost center.
    pub cost_center_id: Option<CostCenterId>,
    /// Optional project.
    pub project_id: Option<ProjectId>,
    /// Original currency code when the line was translated (ISO 4217).
    pub currency: Option<String>,
    /// Exchange rate applied upstream (1 when already functional).
    pub fx_rate: Decimal,
    /// Optional reference to the business document behind this line.
    pub source: Option<SourceDocument>,
}

impl JournalLineInput {
    /// Creates a debit line with defaults.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
            party_id: None,
            cost_center_id: None,
            project_id: None,
            currency: None,
            fx_rate: Decimal::ONE,
            source: None,
        }
    }

    /// Creates a credit line with defaults.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            debit: Decimal::ZERO,
            credit: amount,
            ..Self::debit(account_id, Decimal::ZERO)
        }
    }

    /// Sets the line description.
    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Sets the source document reference.
    #[must_use]
    pub fn with_source(mut self, source: SourceDocument) -> Self {
        self.source = Some(source);
        self
    }
}

/// Input for creating a new voucher.
#[derive(Debug, Clone)]
pub struct CreateVoucherInput {
    /// The type of voucher.
    pub voucher_type: VoucherType,
    /// The voucher date; resolved to a fiscal period on creation.
    pub date: NaiveDate,
    /// A description of the voucher.
    pub description: String,
    /// Optional branch.
    pub branch_id: Option<BranchId>,
    /// The journal lines in input order.
    pub lines: Vec<JournalLineInput>,
    /// The user creating the voucher (opaque to the engine).
    pub created_by: UserId,
}

impl CreateVoucherInput {
    /// Creates a plain journal voucher input.
    #[must_use]
    pub fn journal(
        date: NaiveDate,
        description: &str,
        lines: Vec<JournalLineInput>,
        created_by: UserId,
    ) -> Self {
        Self {
            voucher_type: VoucherType::Journal,
            date,
            description: description.to_string(),
            branch_id: None,
            lines,
            created_by,
        }
    }
}
