//! Journal vouchers and the posting state machine.
//!
//! This module implements the core ledger functionality:
//! - Voucher and line domain types
//! - Balanced-entry validation
//! - The Draft -> Pending -> Approved -> Posted / Cancelled lifecycle
//! - Reversal of posted vouchers
//!
//! The journal ledger is the sole writer of vouchers and lines; the
//! closing and depreciation engines write only through its public
//! operations.

pub mod error;
pub mod journal;
pub mod types;
pub mod validation;
pub mod voucher;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use journal::JournalLedger;
pub use types::{CreateVoucherInput, JournalLineInput, VoucherStatus, VoucherType};
pub use voucher::{JournalLine, JournalVoucher};
