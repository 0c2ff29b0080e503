//! Account domain types.

use neraca_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// Account classification.
///
/// Drives the default normal side, trial-balance grouping, and which
/// accounts participate in the year-end close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned (cash, receivables, fixed assets).
    Asset,
    /// Obligations owed (payables, accrued liabilities).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
    /// Memorandum accounts outside the balance sheet.
    OffBalance,
}

impl AccountType {
    /// Returns the default normal side for this account type.
    ///
    /// Debits increase Asset/Expense accounts; credits increase
    /// Liability/Equity/Revenue accounts.
    #[must_use]
    pub fn default_normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense | Self::OffBalance => NormalSide::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalSide::Credit,
        }
    }

    /// Returns true for balance-sheet account types (carried forward at
    /// year end).
    #[must_use]
    pub fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }

    /// Returns true for profit-and-loss account types (zeroed at year end).
    #[must_use]
    pub fn is_profit_and_loss(self) -> bool {
        matches!(self, Self::Revenue | Self::Expense)
    }
}

/// The side on which an account's balance normally sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalSide {
    /// Debit-normal account.
    Debit,
    /// Credit-normal account.
    Credit,
}

/// A chart-of-accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Account code, unique within the chart (e.g. "1010").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Normal balance side.
    pub normal_side: NormalSide,
    /// Depth in the hierarchy (root = 1, child = parent.level + 1).
    pub level: i16,
    /// Whether journal lines may post directly to this account.
    pub is_posting: bool,
    /// Parent account, if any.
    pub parent_id: Option<AccountId>,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Input for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Account code, unique within the chart.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Parent account, if any.
    pub parent_id: Option<AccountId>,
    /// Whether journal lines may post directly to this account.
    pub is_posting: bool,
    /// Explicit normal side; defaults from the account type when None.
    pub normal_side: Option<NormalSide>,
}

impl NewAccount {
    /// Creates input for a posting account with defaults.
    #[must_use]
    pub fn posting(code: &str, name: &str, account_type: AccountType) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            account_type,
            parent_id: None,
            is_posting: true,
            normal_side: None,
        }
    }

    /// Creates input for a non-posting group account with defaults.
    #[must_use]
    pub fn group(code: &str, name: &str, account_type: AccountType) -> Self {
        Self {
            is_posting: false,
            ..Self::posting(code, name, account_type)
        }
    }

    /// Sets the parent account.
    #[must_use]
    pub fn under(mut self, parent_id: AccountId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
