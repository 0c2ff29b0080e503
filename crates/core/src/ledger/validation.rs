//! Balanced-entry validation for journal lines.

use neraca_shared::types::money::is_valid_amount;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::JournalLineInput;

/// Validates a set of journal line inputs and returns the debit/credit
/// totals.
///
/// Each line must carry exactly one nonzero side and a positive exchange
/// rate; the set must contain at least two lines and balance exactly.
///
/// # Errors
///
/// Returns a `LedgerError` naming the offending 1-based line number, or
/// `UnbalancedEntry` with both totals.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<(Decimal, Decimal), LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for (index, line) in lines.iter().enumerate() {
        let number = u32::try_from(index).unwrap_or(u32::MAX) + 1;
        validate_line(line, number)?;
        total_debit += line.debit;
        total_credit += line.credit;
    }

    if total_debit != total_credit {
        return Err(LedgerError::UnbalancedEntry {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok((total_debit, total_credit))
}

/// Validates a single journal line input.
fn validate_line(line: &JournalLineInput, number: u32) -> Result<(), LedgerError> {
    if !is_valid_amount(line.debit) || !is_valid_amount(line.credit) {
        return Err(LedgerError::NegativeAmount { line: number });
    }
    if line.debit.is_zero() && line.credit.is_zero() {
        return Err(LedgerError::ZeroAmountLine { line: number });
    }
    if !line.debit.is_zero() && !line.credit.is_zero() {
        return Err(LedgerError::BothSidesSet { line: number });
    }
    if line.fx_rate <= Decimal::ZERO {
        return Err(LedgerError::InvalidFxRate { line: number });
    }
    Ok(())
}
