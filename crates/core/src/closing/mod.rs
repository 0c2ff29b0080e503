//! Fiscal period and year closing.
//!
//! The closing engine orchestrates period and year closes. It holds no
//! private write path: closing and opening vouchers go through the journal
//! ledger's normal create/submit/approve/post operations, and the closed
//! flags go through the fiscal calendar.

pub mod engine;
pub mod error;

pub use engine::{ClosingEngine, YearCloseOutcome};
pub use error::ClosingError;
