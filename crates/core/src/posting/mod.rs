//! Document-type to journal-line mapping rules.
//!
//! Business documents (invoices, payroll runs, cheques, adjustments)
//! reduce to balanced journal lines through a posting rule keyed by
//! document kind. The rule set is built once from the configured account
//! mapping and passed explicitly to its consumers.

pub mod engine;
pub mod error;
pub mod types;

pub use engine::PostingRuleSet;
pub use error::PostingError;
pub use types::{DocumentKind, PostingRule, SourceDocument};
