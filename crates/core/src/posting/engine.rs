//! Posting rule lookup and application.

use neraca_shared::config::AccountCodeMap;
use neraca_shared::types::{AccountId, PostingRuleId};
use rust_decimal::Decimal;

use super::error::PostingError;
use super::types::{DocumentKind, PostingRule};
use crate::accounts::chart::ChartOfAccounts;
use crate::ledger::types::JournalLineInput;

/// An immutable set of posting rules.
///
/// Built once at startup (usually from the configured account-code map)
/// and passed explicitly to the modules that produce journal lines.
#[derive(Debug, Clone)]
pub struct PostingRuleSet {
    rules: Vec<PostingRule>,
}

impl PostingRuleSet {
    /// Creates a rule set from explicit rules.
    #[must_use]
    pub fn new(rules: Vec<PostingRule>) -> Self {
        Self { rules }
    }

    /// Builds the standard rule set from the configured account codes.
    ///
    /// # Errors
    ///
    /// Returns `UnmappedAccountCode` when a configured code is missing from
    /// the chart.
    pub fn standard(
        mapping: &AccountCodeMap,
        chart: &ChartOfAccounts,
    ) -> Result<Self, PostingError> {
        let resolve = |code: &str| -> Result<AccountId, PostingError> {
            chart
                .find_by_code(code)
                .map(|a| a.id)
                .ok_or_else(|| PostingError::UnmappedAccountCode(code.to_string()))
        };

        let rules = vec![
            PostingRule {
                id: PostingRuleId::new(),
                document_kind: DocumentKind::SalesInvoice,
                debit_account: resolve(&mapping.receivable)?,
                credit_account: resolve(&mapping.sales)?,
                tax_account: Some(resolve(&mapping.tax_payable)?),
                discount_account: Some(resolve(&mapping.sales_discount)?),
                is_active: true,
            },
            PostingRule {
                id: PostingRuleId::new(),
                document_kind: DocumentKind::PurchaseInvoice,
                debit_account: resolve(&mapping.inventory)?,
                credit_account: resolve(&mapping.payable)?,
                tax_account: Some(resolve(&mapping.tax_payable)?),
                discount_account: None,
                is_active: true,
            },
            PostingRule {
                id: PostingRuleId::new(),
                document_kind: DocumentKind::PayrollRun,
                debit_account: resolve(&mapping.payroll_expense)?,
                credit_account: resolve(&mapping.payroll_payable)?,
                tax_account: None,
                discount_account: None,
                is_active: true,
            },
            PostingRule {
                id: PostingRuleId::new(),
                document_kind: DocumentKind::Cheque,
                debit_account: resolve(&mapping.payable)?,
                credit_account: resolve(&mapping.cash)?,
                tax_account: None,
                discount_account: None,
                is_active: true,
            },
            PostingRule {
                id: PostingRuleId::new(),
                document_kind: DocumentKind::InventoryAdjustment,
                debit_account: resolve(&mapping.inventory_adjustment)?,
                credit_account: resolve(&mapping.inventory)?,
                tax_account: None,
                discount_account: None,
                is_active: true,
            },
            PostingRule {
                id: PostingRuleId::new(),
                document_kind: DocumentKind::DepreciationCharge,
                debit_account: resolve(&mapping.depreciation_expense)?,
                credit_account: resolve(&mapping.accumulated_depreciation)?,
                tax_account: None,
                discount_account: None,
                is_active: true,
            },
        ];
        Ok(Self { rules })
    }

    /// Looks up the active rule for a document kind.
    ///
    /// # Errors
    ///
    /// Returns `RuleNotFound` when no active rule matches.
    pub fn lookup(&self, kind: DocumentKind) -> Result<&PostingRule, PostingError> {
        self.rules
            .iter()
            .find(|r| r.document_kind == kind && r.is_active)
            .ok_or(PostingError::RuleNotFound(kind))
    }

    /// Applies a rule to an amount, producing a balanced line set.
    ///
    /// Legs: debit main (amount + tax - discount), debit discount, credit
    /// main (amount), credit tax. Zero legs are omitted; totals always
    /// balance exactly.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when any amount is negative, the net debit
    /// is not positive, or a tax/discount amount has no configured account.
    pub fn apply(
        rule: &PostingRule,
        amount: Decimal,
        tax_amount: Option<Decimal>,
        discount_amount: Option<Decimal>,
    ) -> Result<Vec<JournalLineInput>, PostingError> {
        let tax = tax_amount.unwrap_or(Decimal::ZERO);
        let discount = discount_amount.unwrap_or(Decimal::ZERO);

        if amount < Decimal::ZERO {
            return Err(PostingError::InvalidAmount(amount));
        }
        if tax < Decimal::ZERO {
            return Err(PostingError::InvalidAmount(tax));
        }
        if discount < Decimal::ZERO {
            return Err(PostingError::InvalidAmount(discount));
        }

        let tax_account = match (tax.is_zero(), rule.tax_account) {
            (true, _) => None,
            (false, Some(account)) => Some(account),
            (false, None) => {
                return Err(PostingError::TaxAccountNotConfigured(rule.document_kind));
            }
        };
        let discount_account = match (discount.is_zero(), rule.discount_account) {
            (true, _) => None,
            (false, Some(account)) => Some(account),
            (false, None) => {
                return Err(PostingError::DiscountAccountNotConfigured(
                    rule.document_kind,
                ));
            }
        };

        let net_debit = amount + tax - discount;
        if net_debit <= Decimal::ZERO {
            return Err(PostingError::InvalidAmount(net_debit));
        }

        let mut lines = vec![JournalLineInput::debit(rule.debit_account, net_debit)];
        if let Some(account) = discount_account {
            lines.push(JournalLineInput::debit(account, discount));
        }
        if amount > Decimal::ZERO {
            lines.push(JournalLineInput::credit(rule.credit_account, amount));
        }
        if let Some(account) = tax_account {
            lines.push(JournalLineInput::credit(account, tax));
        }
        Ok(lines)
    }
}
