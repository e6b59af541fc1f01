//! Business rule validation for journal entries.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use saldo_shared::AccountCode;

use super::entry::{EntryDraft, JournalLine};
use super::error::LedgerError;

/// Validates the structure and balance of an entry draft.
///
/// Checks, in order: non-empty description, at least two lines, every line
/// well-formed (non-negative amounts, exactly one nonzero side), and exact
/// equality of the debit and credit sums.
///
/// # Errors
///
/// Returns `InvalidEntry` for structural problems and `Unbalanced` when the
/// sums differ.
pub fn validate_draft(draft: &EntryDraft) -> Result<(), LedgerError> {
    if draft.description.trim().is_empty() {
        return Err(LedgerError::InvalidEntry("description is required".into()));
    }

    if draft.lines.len() < 2 {
        return Err(LedgerError::InvalidEntry(
            "an entry requires at least two lines".into(),
        ));
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;

    for line in &draft.lines {
        validate_line(line)?;
        debits += line.debit;
        credits += line.credit;
    }

    if debits != credits {
        return Err(LedgerError::Unbalanced { debits, credits });
    }

    Ok(())
}

/// Validates that every line references a registered account code.
///
/// This check is independent of the balance check; both are required before
/// an entry is accepted.
///
/// # Errors
///
/// Returns `UnknownAccount` for the first unregistered code encountered.
pub fn check_known_accounts(
    lines: &[JournalLine],
    registered: &BTreeSet<AccountCode>,
) -> Result<(), LedgerError> {
    for line in lines {
        if !registered.contains(&line.account) {
            return Err(LedgerError::UnknownAccount(line.account.clone()));
        }
    }
    Ok(())
}

fn validate_line(line: &JournalLine) -> Result<(), LedgerError> {
    if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
        return Err(LedgerError::InvalidEntry(format!(
            "line for {} has a negative amount",
            line.account
        )));
    }

    let has_debit = line.debit > Decimal::ZERO;
    let has_credit = line.credit > Decimal::ZERO;

    match (has_debit, has_credit) {
        (true, true) => Err(LedgerError::InvalidEntry(format!(
            "line for {} sets both debit and credit",
            line.account
        ))),
        (false, false) => Err(LedgerError::InvalidEntry(format!(
            "line for {} has neither a debit nor a credit amount",
            line.account
        ))),
        _ => Ok(()),
    }
}
