//! In-memory reference store.

use std::sync::{Mutex, MutexGuard};

use super::{LedgerStore, StoreError};
use crate::ledger::account::Account;
use crate::ledger::entry::{Journal, JournalKind};
use crate::ledger::metadata::ReportMetadata;

#[derive(Debug, Default)]
struct State {
    accounts: Vec<Account>,
    transactions: Journal,
    adjustments: Journal,
    metadata: ReportMetadata,
}

/// A `Mutex`-guarded in-memory store.
///
/// The reference implementation of the persistence contract: used by the test
/// suites and by embeddings that want an ephemeral ledger. Mutations are
/// serialized by the lock, matching the single-writer assumption of the
/// contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Corrupt("store lock poisoned".into()))
    }
}

impl LedgerStore for MemoryStore {
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.state()?.accounts.clone())
    }

    fn save_accounts(&self, accounts: &[Account]) -> Result<(), StoreError> {
        self.state()?.accounts = accounts.to_vec();
        Ok(())
    }

    fn load_journal(&self, kind: JournalKind) -> Result<Journal, StoreError> {
        let state = self.state()?;
        Ok(match kind {
            JournalKind::Transactions => state.transactions.clone(),
            JournalKind::Adjustments => state.adjustments.clone(),
        })
    }

    fn save_journal(&self, kind: JournalKind, journal: &Journal) -> Result<(), StoreError> {
        let mut state = self.state()?;
        match kind {
            JournalKind::Transactions => state.transactions = journal.clone(),
            JournalKind::Adjustments => state.adjustments = journal.clone(),
        }
        Ok(())
    }

    fn load_metadata(&self) -> Result<ReportMetadata, StoreError> {
        Ok(self.state()?.metadata.clone())
    }

    fn save_metadata(&self, metadata: &ReportMetadata) -> Result<(), StoreError> {
        self.state()?.metadata = metadata.clone();
        Ok(())
    }
}
