//! Posting rule domain types.

use neraca_shared::types::{AccountId, PostingRuleId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The business document kinds known to the ledger.
///
/// A closed variant rather than a free-form string: references are
/// validated at the boundary and cannot name unknown record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Customer sales invoice.
    SalesInvoice,
    /// Vendor purchase invoice.
    PurchaseInvoice,
    /// Payroll run.
    PayrollRun,
    /// Issued cheque.
    Cheque,
    /// Inventory adjustment.
    InventoryAdjustment,
    /// Monthly depreciation charge.
    DepreciationCharge,
}

impl DocumentKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SalesInvoice => "sales_invoice",
            Self::PurchaseInvoice => "purchase_invoice",
            Self::PayrollRun => "payroll_run",
            Self::Cheque => "cheque",
            Self::InventoryAdjustment => "inventory_adjustment",
            Self::DepreciationCharge => "depreciation_charge",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference to the business document behind a journal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// The kind of document.
    pub kind: DocumentKind,
    /// The document's identifier in its owning module.
    pub document_id: Uuid,
}

/// A posting rule mapping a document kind to ledger accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingRule {
    /// Unique identifier.
    pub id: PostingRuleId,
    /// The document kind this rule applies to.
    pub document_kind: DocumentKind,
    /// Account receiving the debit leg.
    pub debit_account: AccountId,
    /// Account receiving the credit leg.
    pub credit_account: AccountId,
    /// Account receiving the tax leg, if taxes apply.
    pub tax_account: Option<AccountId>,
    /// Account receiving the discount leg, if discounts apply.
    pub discount_account: Option<AccountId>,
    /// Whether the rule is active.
    pub is_active: bool,
}
