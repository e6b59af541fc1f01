//! Chart of accounts registry service.
//!
//! Stateless operations over the storage contract. Every mutation validates
//! first, then replaces the stored account list in one save.

use saldo_shared::AccountCode;
use tracing::info;

use super::account::{Account, AccountUpdate, ChartOfAccounts, NewAccount};
use super::entry::JournalKind;
use super::error::LedgerError;
use crate::storage::LedgerStore;

/// Chart of accounts registry.
pub struct AccountRegistry;

impl AccountRegistry {
    /// Returns the chart of accounts partitioned by kind.
    ///
    /// All five sections are always present, each in code order, even when
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the account list cannot be read.
    pub fn chart(store: &dyn LedgerStore) -> Result<ChartOfAccounts, LedgerError> {
        Ok(ChartOfAccounts::from_accounts(store.load_accounts()?))
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAccount` if the code is unparseable or the name is
    /// empty, and `DuplicateCode` if the code is already registered.
    pub fn add(store: &dyn LedgerStore, input: NewAccount) -> Result<Account, LedgerError> {
        let code = AccountCode::parse(&input.code)
            .map_err(|err| LedgerError::InvalidAccount(err.to_string()))?;
        let name = validated_name(&input.name)?;

        let mut accounts = store.load_accounts()?;
        if accounts.iter().any(|account| account.code == code) {
            return Err(LedgerError::DuplicateCode(code));
        }

        let account = Account {
            code,
            name,
            kind: input.kind,
            is_contra: input.is_contra,
        };
        accounts.push(account.clone());
        store.save_accounts(&accounts)?;

        info!(code = %account.code, kind = %account.kind, "Account registered");
        Ok(account)
    }

    /// Replaces an account's name, kind, and contra flag.
    ///
    /// Changing the kind moves the account to the new chart section for all
    /// subsequent [`Self::chart`] calls.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the code is unregistered and
    /// `InvalidAccount` if the new name is empty.
    pub fn update(
        store: &dyn LedgerStore,
        code: &AccountCode,
        input: AccountUpdate,
    ) -> Result<Account, LedgerError> {
        let name = validated_name(&input.name)?;

        let mut accounts = store.load_accounts()?;
        let account = accounts
            .iter_mut()
            .find(|account| &account.code == code)
            .ok_or_else(|| LedgerError::AccountNotFound(code.clone()))?;

        account.name = name;
        account.kind = input.kind;
        account.is_contra = input.is_contra;
        let updated = account.clone();
        store.save_accounts(&accounts)?;

        info!(code = %updated.code, kind = %updated.kind, "Account updated");
        Ok(updated)
    }

    /// Deletes an account.
    ///
    /// Referential integrity: the delete is rejected while any journal line
    /// in either collection still references the code.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the code is unregistered and
    /// `AccountInUse` if it is still referenced.
    pub fn remove(store: &dyn LedgerStore, code: &AccountCode) -> Result<(), LedgerError> {
        let mut accounts = store.load_accounts()?;
        if !accounts.iter().any(|account| &account.code == code) {
            return Err(LedgerError::AccountNotFound(code.clone()));
        }

        for kind in [JournalKind::Transactions, JournalKind::Adjustments] {
            let journal = store.load_journal(kind)?;
            let referenced = journal
                .entries
                .iter()
                .flat_map(|entry| entry.lines.iter())
                .any(|line| &line.account == code);
            if referenced {
                return Err(LedgerError::AccountInUse(code.clone()));
            }
        }

        accounts.retain(|account| &account.code != code);
        store.save_accounts(&accounts)?;

        info!(code = %code, "Account deleted");
        Ok(())
    }
}

fn validated_name(name: &str) -> Result<String, LedgerError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidAccount("name is required".into()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::AccountKind;
    use crate::ledger::entry::{EntryDraft, JournalLine};
    use crate::ledger::journal::JournalService;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn code(text: &str) -> AccountCode {
        AccountCode::parse(text).unwrap()
    }

    fn new_account(code: &str, name: &str, kind: AccountKind) -> NewAccount {
        NewAccount {
            code: code.to_string(),
            name: name.to_string(),
            kind,
            is_contra: false,
        }
    }

    #[test]
    fn test_add_and_list() {
        let store = MemoryStore::new();
        AccountRegistry::add(&store, new_account("1-110", "Bank", AccountKind::Asset)).unwrap();
        AccountRegistry::add(&store, new_account("3-101", "Owner capital", AccountKind::Equity))
            .unwrap();

        let chart = AccountRegistry::chart(&store).unwrap();
        assert_eq!(chart.assets.len(), 1);
        assert_eq!(chart.equity.len(), 1);
        assert!(chart.liabilities.is_empty());
        assert!(chart.revenue.is_empty());
        assert!(chart.expenses.is_empty());
    }

    #[test]
    fn test_add_duplicate_code_rejected() {
        let store = MemoryStore::new();
        AccountRegistry::add(&store, new_account("1-110", "Bank", AccountKind::Asset)).unwrap();
        let result = AccountRegistry::add(&store, new_account("1-110", "Bank 2", AccountKind::Asset));
        assert!(matches!(result, Err(LedgerError::DuplicateCode(_))));
    }

    #[test]
    fn test_add_invalid_input_rejected() {
        let store = MemoryStore::new();
        assert!(matches!(
            AccountRegistry::add(&store, new_account("bank", "Bank", AccountKind::Asset)),
            Err(LedgerError::InvalidAccount(_))
        ));
        assert!(matches!(
            AccountRegistry::add(&store, new_account("1-110", "  ", AccountKind::Asset)),
            Err(LedgerError::InvalidAccount(_))
        ));
        assert!(AccountRegistry::chart(&store).unwrap().is_empty());
    }

    #[test]
    fn test_update_moves_account_between_sections() {
        let store = MemoryStore::new();
        AccountRegistry::add(&store, new_account("2-130", "Unearned revenue", AccountKind::Liability))
            .unwrap();

        AccountRegistry::update(
            &store,
            &code("2-130"),
            AccountUpdate {
                name: "Unearned revenue".to_string(),
                kind: AccountKind::Revenue,
                is_contra: false,
            },
        )
        .unwrap();

        let chart = AccountRegistry::chart(&store).unwrap();
        assert!(chart.liabilities.is_empty());
        assert_eq!(chart.revenue.len(), 1);
    }

    #[test]
    fn test_update_unknown_code_rejected() {
        let store = MemoryStore::new();
        let result = AccountRegistry::update(
            &store,
            &code("9-999"),
            AccountUpdate {
                name: "Ghost".to_string(),
                kind: AccountKind::Asset,
                is_contra: false,
            },
        );
        assert!(matches!(result, Err(LedgerError::AccountNotFound(_))));
    }

    #[test]
    fn test_remove_referenced_account_rejected() {
        let store = MemoryStore::new();
        AccountRegistry::add(&store, new_account("1-110", "Bank", AccountKind::Asset)).unwrap();
        AccountRegistry::add(&store, new_account("3-101", "Owner capital", AccountKind::Equity))
            .unwrap();
        JournalService::add(
            &store,
            JournalKind::Transactions,
            EntryDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                description: "Owner investment".to_string(),
                lines: vec![
                    JournalLine::debit(code("1-110"), dec!(100)),
                    JournalLine::credit(code("3-101"), dec!(100)),
                ],
            },
        )
        .unwrap();

        let result = AccountRegistry::remove(&store, &code("1-110"));
        assert!(matches!(result, Err(LedgerError::AccountInUse(_))));
        // Still listed.
        assert_eq!(AccountRegistry::chart(&store).unwrap().assets.len(), 1);
    }

    #[test]
    fn test_remove_scans_adjustments_too() {
        let store = MemoryStore::new();
        AccountRegistry::add(&store, new_account("5-100", "Salary expense", AccountKind::Expense))
            .unwrap();
        AccountRegistry::add(&store, new_account("2-110", "Salaries payable", AccountKind::Liability))
            .unwrap();
        JournalService::add(
            &store,
            JournalKind::Adjustments,
            EntryDraft {
                date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                description: "Unrecorded salaries".to_string(),
                lines: vec![
                    JournalLine::debit(code("5-100"), dec!(10)),
                    JournalLine::credit(code("2-110"), dec!(10)),
                ],
            },
        )
        .unwrap();

        assert!(matches!(
            AccountRegistry::remove(&store, &code("2-110")),
            Err(LedgerError::AccountInUse(_))
        ));
    }

    #[test]
    fn test_remove_unreferenced_account_succeeds() {
        let store = MemoryStore::new();
        AccountRegistry::add(&store, new_account("1-100", "Petty cash", AccountKind::Asset)).unwrap();
        AccountRegistry::remove(&store, &code("1-100")).unwrap();

        let chart = AccountRegistry::chart(&store).unwrap();
        assert!(chart.is_empty());
        assert!(matches!(
            AccountRegistry::remove(&store, &code("1-100")),
            Err(LedgerError::AccountNotFound(_))
        ));
    }
}
