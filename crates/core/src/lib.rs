//! Ledger and period-close engine for Neraca.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `accounts` - Hierarchical chart of accounts
//! - `fiscal` - Fiscal year and period calendar
//! - `posting` - Document-type to journal-line mapping rules
//! - `ledger` - Journal vouchers and the posting state machine
//! - `reports` - Trial balance aggregation
//! - `closing` - Fiscal period and year closing
//! - `assets` - Fixed assets and depreciation schedules

pub mod accounts;
pub mod assets;
pub mod closing;
pub mod fiscal;
pub mod ledger;
pub mod posting;
pub mod reports;
