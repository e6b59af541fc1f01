//! Journal entry service.
//!
//! One service for both collections: transactions and period-end adjustments
//! share the exact operation shapes and differ only in which reports consume
//! them. Validation runs in full before the journal document is touched, so
//! a rejected draft consumes no id and a failed update leaves the prior entry
//! intact.

use std::collections::BTreeSet;

use saldo_shared::{AccountCode, EntryId};
use tracing::info;

use super::entry::{Entry, EntryDraft, JournalKind};
use super::error::LedgerError;
use super::validation::{check_known_accounts, validate_draft};
use crate::storage::LedgerStore;

/// Journal entry operations over the storage contract.
pub struct JournalService;

impl JournalService {
    /// Lists a collection sorted by `(date, id)` ascending.
    ///
    /// The sort key is significant: it is stable and reproducible, and the
    /// general ledger's running balances depend on it.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the collection cannot be read.
    pub fn list(store: &dyn LedgerStore, kind: JournalKind) -> Result<Vec<Entry>, LedgerError> {
        let mut entries = store.load_journal(kind)?.entries;
        entries.sort_by(|a, b| (a.date, a.id).cmp(&(b.date, b.id)));
        Ok(entries)
    }

    /// Records a new entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry`, `Unbalanced`, or `UnknownAccount` when the
    /// draft fails validation; no id is consumed in that case.
    pub fn add(
        store: &dyn LedgerStore,
        kind: JournalKind,
        draft: EntryDraft,
    ) -> Result<Entry, LedgerError> {
        validate_draft(&draft)?;
        check_known_accounts(&draft.lines, &Self::registered_codes(store)?)?;

        let mut journal = store.load_journal(kind)?;
        let entry = Entry {
            id: journal.allocate_id(),
            date: draft.date,
            description: draft.description,
            lines: draft.lines,
        };
        journal.entries.push(entry.clone());
        store.save_journal(kind, &journal)?;

        info!(kind = %kind, id = %entry.id, "Journal entry recorded");
        Ok(entry)
    }

    /// Replaces an entry's date, description, and lines under the same id.
    ///
    /// The replacement is atomic from the caller's perspective: validation
    /// failures and storage failures both leave the previous entry untouched.
    ///
    /// # Errors
    ///
    /// Same validation errors as [`Self::add`], plus `EntryNotFound` when the
    /// id is absent.
    pub fn update(
        store: &dyn LedgerStore,
        kind: JournalKind,
        id: EntryId,
        draft: EntryDraft,
    ) -> Result<Entry, LedgerError> {
        validate_draft(&draft)?;
        check_known_accounts(&draft.lines, &Self::registered_codes(store)?)?;

        let mut journal = store.load_journal(kind)?;
        let entry = journal
            .find_mut(id)
            .ok_or(LedgerError::EntryNotFound { kind, id })?;

        entry.date = draft.date;
        entry.description = draft.description;
        entry.lines = draft.lines;
        let updated = entry.clone();
        store.save_journal(kind, &journal)?;

        info!(kind = %kind, id = %id, "Journal entry replaced");
        Ok(updated)
    }

    /// Deletes an entry and all its lines.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound` when the id is absent.
    pub fn remove(
        store: &dyn LedgerStore,
        kind: JournalKind,
        id: EntryId,
    ) -> Result<(), LedgerError> {
        let mut journal = store.load_journal(kind)?;
        if journal.find(id).is_none() {
            return Err(LedgerError::EntryNotFound { kind, id });
        }
        journal.entries.retain(|entry| entry.id != id);
        store.save_journal(kind, &journal)?;

        info!(kind = %kind, id = %id, "Journal entry deleted");
        Ok(())
    }

    fn registered_codes(store: &dyn LedgerStore) -> Result<BTreeSet<AccountCode>, LedgerError> {
        Ok(store
            .load_accounts()?
            .into_iter()
            .map(|account| account.code)
            .collect())
    }
}
