//! Engine configuration management.
//!
//! The account-code mapping is resolved once at startup and passed
//! explicitly into the posting rule engine; it is never a mutable global.

use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Functional (base) currency code (ISO 4217).
    #[serde(default = "default_currency")]
    pub functional_currency: String,
    /// Decimal places used when rounding journal amounts.
    #[serde(default = "default_decimal_places")]
    pub amount_decimal_places: u32,
    /// Prefix for generated voucher numbers (e.g. "JV" -> "JV-000001").
    #[serde(default = "default_voucher_prefix")]
    pub voucher_prefix: String,
    /// Account codes backing the standard posting rules.
    #[serde(default)]
    pub accounts: AccountCodeMap,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_voucher_prefix() -> String {
    "JV".to_string()
}

/// Mapping of business concepts to chart-of-accounts codes.
///
/// Codes are resolved against the chart of accounts when the standard
/// posting rule set is built.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountCodeMap {
    /// Accounts receivable.
    pub receivable: String,
    /// Accounts payable.
    pub payable: String,
    /// Cash / bank clearing account for cheques.
    pub cash: String,
    /// Sales revenue.
    pub sales: String,
    /// Tax payable (output VAT).
    pub tax_payable: String,
    /// Sales discount expense.
    pub sales_discount: String,
    /// Payroll expense.
    pub payroll_expense: String,
    /// Payroll liabilities (net wages payable).
    pub payroll_payable: String,
    /// Inventory on hand.
    pub inventory: String,
    /// Inventory shrinkage / adjustment expense.
    pub inventory_adjustment: String,
    /// Depreciation expense.
    pub depreciation_expense: String,
    /// Accumulated depreciation (contra asset).
    pub accumulated_depreciation: String,
    /// Profit-and-loss summary account used by the year close.
    pub profit_and_loss: String,
}

impl Default for AccountCodeMap {
    fn default() -> Self {
        Self {
            receivable: "1200".to_string(),
            payable: "2100".to_string(),
            cash: "1010".to_string(),
            sales: "4010".to_string(),
            tax_payable: "2300".to_string(),
            sales_discount: "4090".to_string(),
            payroll_expense: "5200".to_string(),
            payroll_payable: "2200".to_string(),
            inventory: "1300".to_string(),
            inventory_adjustment: "5300".to_string(),
            depreciation_expense: "5400".to_string(),
            accumulated_depreciation: "1590".to_string(),
            profit_and_loss: "3900".to_string(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            functional_currency: default_currency(),
            amount_decimal_places: default_decimal_places(),
            voucher_prefix: default_voucher_prefix(),
            accounts: AccountCodeMap::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("NERACA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.functional_currency, "USD");
        assert_eq!(config.amount_decimal_places, 2);
        assert_eq!(config.voucher_prefix, "JV");
    }

    #[test]
    fn test_default_account_codes_are_distinct() {
        let map = AccountCodeMap::default();
        let codes = [
            &map.receivable,
            &map.payable,
            &map.cash,
            &map.sales,
            &map.tax_payable,
            &map.sales_discount,
            &map.payroll_expense,
            &map.payroll_payable,
            &map.inventory,
            &map.inventory_adjustment,
            &map.depreciation_expense,
            &map.accumulated_depreciation,
            &map.profit_and_loss,
        ];
        let mut unique = codes.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }
}
