//! General ledger construction.
//!
//! The general ledger shows every posting per account with a running
//! balance. Postings are taken in `(date, id)` order within each collection,
//! transactions before adjustments — the order the books were worked in, and
//! the order the running balances are defined over.

use rust_decimal::Decimal;

use super::types::{GeneralLedgerReport, LedgerAccountView, LedgerEntryRow};
use crate::ledger::account::ChartOfAccounts;
use crate::ledger::entry::Entry;

/// Builds the general ledger from the sorted journal collections.
///
/// `transactions` and `adjustments` must already be `(date, id)` sorted, as
/// returned by the journal service. Accounts without postings are omitted.
#[must_use]
pub fn build_general_ledger(
    chart: &ChartOfAccounts,
    transactions: &[Entry],
    adjustments: &[Entry],
) -> GeneralLedgerReport {
    let mut accounts = Vec::new();

    for account in chart.iter() {
        let mut rows = Vec::new();
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let normal_side = account.kind.normal_side();

        let postings = transactions
            .iter()
            .map(|entry| (entry, false))
            .chain(adjustments.iter().map(|entry| (entry, true)));

        for (entry, is_adjustment) in postings {
            for line in &entry.lines {
                if line.account != account.code {
                    continue;
                }
                total_debit += line.debit;
                total_credit += line.credit;
                rows.push(LedgerEntryRow {
                    date: entry.date,
                    entry_id: entry.id,
                    description: entry.description.clone(),
                    debit: line.debit,
                    credit: line.credit,
                    running_balance: normal_side.balance(total_debit, total_credit),
                    is_adjustment,
                });
            }
        }

        if rows.is_empty() {
            continue;
        }

        accounts.push(LedgerAccountView {
            account: account.code.clone(),
            name: account.name.clone(),
            closing_balance: normal_side.balance(total_debit, total_credit),
            rows,
            total_debit,
            total_credit,
        });
    }

    GeneralLedgerReport { accounts }
}
