//! Hierarchical chart of accounts.
//!
//! Accounts form a tree via parent references; only leaf-level posting
//! accounts may receive journal lines. The registry is an arena indexed by
//! stable id, which makes cycle rejection a bounded ancestor walk.

pub mod chart;
pub mod error;
pub mod types;

pub use chart::ChartOfAccounts;
pub use error::AccountError;
pub use types::{Account, AccountType, NewAccount, NormalSide};
