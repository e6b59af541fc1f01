//! Closing-entry synthesis.
//!
//! At period end, revenue and expense balances are zeroed out into retained
//! earnings through one balanced adjusting entry. The synthesized entry is
//! submitted through the journal service so every acceptance invariant is
//! revalidated on the way in.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo_shared::AccountCode;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ledger::account::AccountKind;
use crate::ledger::balance::calculate_balances;
use crate::ledger::entry::{Entry, EntryDraft, JournalKind, JournalLine};
use crate::ledger::error::LedgerError;
use crate::ledger::journal::JournalService;
use crate::storage::LedgerStore;

const DEFAULT_DESCRIPTION: &str = "Closing entries - revenue and expenses to retained earnings";

/// Result of synthesizing closing entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosingSummary {
    /// The adjusting entry that was recorded.
    pub entry: Entry,
    /// Revenue accounts that were closed, in code order.
    pub revenue_accounts_closed: Vec<AccountCode>,
    /// Expense accounts that were closed, in code order.
    pub expense_accounts_closed: Vec<AccountCode>,
    /// Total revenue moved into retained earnings.
    pub total_revenue_closed: Decimal,
    /// Total expenses moved out of retained earnings.
    pub total_expense_closed: Decimal,
    /// Net effect on retained earnings.
    pub net_income: Decimal,
}

/// Closing-entry synthesizer.
pub struct ClosingService;

impl ClosingService {
    /// Builds and records one balanced adjusting entry that zeroes every
    /// positive revenue and expense balance into `retained_earnings`.
    ///
    /// Each revenue account is debited by its balance and retained earnings
    /// credited by the revenue total; each expense account is credited by its
    /// balance and retained earnings debited by the expense total.
    ///
    /// # Errors
    ///
    /// Returns `MissingRetainedEarningsAccount` if the configured code is not
    /// registered as an equity account, and `NothingToClose` if no revenue or
    /// expense account carries a positive balance.
    pub fn create_closing_entries(
        store: &dyn LedgerStore,
        retained_earnings: &AccountCode,
        date: NaiveDate,
        description: Option<String>,
    ) -> Result<ClosingSummary, LedgerError> {
        let accounts = store.load_accounts()?;

        let registered_as_equity = accounts
            .iter()
            .any(|account| &account.code == retained_earnings && account.kind == AccountKind::Equity);
        if !registered_as_equity {
            return Err(LedgerError::MissingRetainedEarningsAccount(
                retained_earnings.clone(),
            ));
        }

        let transactions = JournalService::list(store, JournalKind::Transactions)?;
        let adjustments = JournalService::list(store, JournalKind::Adjustments)?;
        let balances = calculate_balances(&accounts, &transactions, &adjustments);

        let closable = |kind: AccountKind| -> Vec<(AccountCode, Decimal)> {
            balances
                .iter()
                .filter(|balance| balance.kind == kind && balance.balance > Decimal::ZERO)
                .map(|balance| (balance.code.clone(), balance.balance))
                .collect()
        };

        let revenues = closable(AccountKind::Revenue);
        let expenses = closable(AccountKind::Expense);
        if revenues.is_empty() && expenses.is_empty() {
            return Err(LedgerError::NothingToClose);
        }

        let total_revenue_closed: Decimal = revenues.iter().map(|(_, amount)| *amount).sum();
        let total_expense_closed: Decimal = expenses.iter().map(|(_, amount)| *amount).sum();

        let mut lines = Vec::with_capacity(revenues.len() + expenses.len() + 2);
        for (code, amount) in &revenues {
            lines.push(JournalLine::debit(code.clone(), *amount));
        }
        if total_revenue_closed > Decimal::ZERO {
            lines.push(JournalLine::credit(retained_earnings.clone(), total_revenue_closed));
        }
        for (code, amount) in &expenses {
            lines.push(JournalLine::credit(code.clone(), *amount));
        }
        if total_expense_closed > Decimal::ZERO {
            lines.push(JournalLine::debit(retained_earnings.clone(), total_expense_closed));
        }

        let draft = EntryDraft {
            date,
            description: description.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            lines,
        };
        let entry = JournalService::add(store, JournalKind::Adjustments, draft)?;

        info!(
            id = %entry.id,
            revenue = %total_revenue_closed,
            expenses = %total_expense_closed,
            "Closing entry recorded"
        );

        Ok(ClosingSummary {
            entry,
            revenue_accounts_closed: revenues.into_iter().map(|(code, _)| code).collect(),
            expense_accounts_closed: expenses.into_iter().map(|(code, _)| code).collect(),
            total_revenue_closed,
            total_expense_closed,
            net_income: total_revenue_closed - total_expense_closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::NewAccount;
    use crate::ledger::registry::AccountRegistry;
    use crate::storage::MemoryStore;
    use rust_decimal_macros::dec;

    fn code(text: &str) -> AccountCode {
        AccountCode::parse(text).unwrap()
    }

    fn register(store: &MemoryStore, account_code: &str, name: &str, kind: AccountKind) {
        AccountRegistry::add(
            store,
            NewAccount {
                code: account_code.to_string(),
                name: name.to_string(),
                kind,
                is_contra: false,
            },
        )
        .unwrap();
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    fn store_with_period_activity() -> MemoryStore {
        let store = MemoryStore::new();
        register(&store, "1-110", "Bank", AccountKind::Asset);
        register(&store, "3-200", "Retained earnings", AccountKind::Equity);
        register(&store, "4-100", "Service revenue", AccountKind::Revenue);
        register(&store, "5-100", "Salary expense", AccountKind::Expense);

        JournalService::add(
            &store,
            JournalKind::Transactions,
            EntryDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
                description: "Consulting fee received".to_string(),
                lines: vec![
                    JournalLine::debit(code("1-110"), dec!(1000000)),
                    JournalLine::credit(code("4-100"), dec!(1000000)),
                ],
            },
        )
        .unwrap();
        JournalService::add(
            &store,
            JournalKind::Transactions,
            EntryDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
                description: "Salaries paid".to_string(),
                lines: vec![
                    JournalLine::debit(code("5-100"), dec!(400000)),
                    JournalLine::credit(code("1-110"), dec!(400000)),
                ],
            },
        )
        .unwrap();
        store
    }

    #[test]
    fn test_closing_entry_shape_and_net_effect() {
        let store = store_with_period_activity();
        let summary =
            ClosingService::create_closing_entries(&store, &code("3-200"), date(), None).unwrap();

        // Four lines: debit revenue, credit RE, credit expense, debit RE.
        assert_eq!(summary.entry.lines.len(), 4);
        assert_eq!(summary.entry.lines[0], JournalLine::debit(code("4-100"), dec!(1000000)));
        assert_eq!(summary.entry.lines[1], JournalLine::credit(code("3-200"), dec!(1000000)));
        assert_eq!(summary.entry.lines[2], JournalLine::credit(code("5-100"), dec!(400000)));
        assert_eq!(summary.entry.lines[3], JournalLine::debit(code("3-200"), dec!(400000)));

        assert_eq!(summary.total_revenue_closed, dec!(1000000));
        assert_eq!(summary.total_expense_closed, dec!(400000));
        assert_eq!(summary.net_income, dec!(600000));
        assert_eq!(summary.revenue_accounts_closed, vec![code("4-100")]);
        assert_eq!(summary.expense_accounts_closed, vec![code("5-100")]);

        // Net effect on retained earnings equals net income, and the closed
        // accounts are zeroed.
        let accounts = store.load_accounts().unwrap();
        let transactions = JournalService::list(&store, JournalKind::Transactions).unwrap();
        let adjustments = JournalService::list(&store, JournalKind::Adjustments).unwrap();
        let balances = calculate_balances(&accounts, &transactions, &adjustments);
        assert_eq!(balances.balance_or_zero(&code("3-200")), dec!(600000));
        assert_eq!(balances.balance_or_zero(&code("4-100")), Decimal::ZERO);
        assert_eq!(balances.balance_or_zero(&code("5-100")), Decimal::ZERO);
    }

    #[test]
    fn test_entry_lands_in_adjustments_collection() {
        let store = store_with_period_activity();
        ClosingService::create_closing_entries(&store, &code("3-200"), date(), None).unwrap();

        let adjustments = JournalService::list(&store, JournalKind::Adjustments).unwrap();
        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].total_debits(), adjustments[0].total_credits());
    }

    #[test]
    fn test_custom_description_is_used() {
        let store = store_with_period_activity();
        let summary = ClosingService::create_closing_entries(
            &store,
            &code("3-200"),
            date(),
            Some("January close".to_string()),
        )
        .unwrap();
        assert_eq!(summary.entry.description, "January close");
    }

    #[test]
    fn test_missing_retained_earnings_rejected() {
        let store = store_with_period_activity();
        let result =
            ClosingService::create_closing_entries(&store, &code("3-999"), date(), None);
        assert!(matches!(
            result,
            Err(LedgerError::MissingRetainedEarningsAccount(_))
        ));
    }

    #[test]
    fn test_retained_earnings_must_be_equity() {
        let store = store_with_period_activity();
        // Registered, but as an asset.
        register(&store, "1-200", "Not equity", AccountKind::Asset);
        let result =
            ClosingService::create_closing_entries(&store, &code("1-200"), date(), None);
        assert!(matches!(
            result,
            Err(LedgerError::MissingRetainedEarningsAccount(_))
        ));
    }

    #[test]
    fn test_nothing_to_close_on_quiet_ledger() {
        let store = MemoryStore::new();
        register(&store, "3-200", "Retained earnings", AccountKind::Equity);
        register(&store, "4-100", "Service revenue", AccountKind::Revenue);

        let result =
            ClosingService::create_closing_entries(&store, &code("3-200"), date(), None);
        assert!(matches!(result, Err(LedgerError::NothingToClose)));
        assert!(JournalService::list(&store, JournalKind::Adjustments).unwrap().is_empty());
    }

    #[test]
    fn test_revenue_only_close_still_balances() {
        let store = MemoryStore::new();
        register(&store, "1-110", "Bank", AccountKind::Asset);
        register(&store, "3-200", "Retained earnings", AccountKind::Equity);
        register(&store, "4-100", "Service revenue", AccountKind::Revenue);
        JournalService::add(
            &store,
            JournalKind::Transactions,
            EntryDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
                description: "Fee received".to_string(),
                lines: vec![
                    JournalLine::debit(code("1-110"), dec!(500)),
                    JournalLine::credit(code("4-100"), dec!(500)),
                ],
            },
        )
        .unwrap();

        let summary =
            ClosingService::create_closing_entries(&store, &code("3-200"), date(), None).unwrap();
        assert_eq!(summary.entry.lines.len(), 2);
        assert_eq!(summary.total_expense_closed, Decimal::ZERO);
        assert_eq!(summary.net_income, dec!(500));
        assert!(summary.expense_accounts_closed.is_empty());
    }
}
