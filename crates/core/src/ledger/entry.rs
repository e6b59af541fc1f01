//! Journal entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo_shared::{AccountCode, EntryId};
use serde::{Deserialize, Serialize};

/// Which journal collection an entry belongs to.
///
/// Transactions and adjustments are structurally identical; adjustments
/// represent period-end corrections and are folded into balances the same
/// way, but are stored and listed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalKind {
    /// Ordinary journal transactions.
    Transactions,
    /// Period-end adjusting entries.
    Adjustments,
}

impl JournalKind {
    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Adjustments => "adjustments",
        }
    }
}

impl std::fmt::Display for JournalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single debit or credit line within a journal entry.
///
/// A well-formed line has exactly one nonzero side; both amounts are
/// non-negative. This is enforced when an entry is accepted, and the balance
/// math assumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// The account this line posts to.
    pub account: AccountCode,
    /// Debit amount (zero for credit lines).
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount (zero for debit lines).
    #[serde(default)]
    pub credit: Decimal,
}

impl JournalLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account: AccountCode, amount: Decimal) -> Self {
        Self {
            account,
            debit: amount,
            credit: Decimal::ZERO,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account: AccountCode, amount: Decimal) -> Self {
        Self {
            account,
            debit: Decimal::ZERO,
            credit: amount,
        }
    }
}

/// A journal entry: a dated, described set of balanced lines.
///
/// Invariant once accepted: at least two lines and the debit and credit sums
/// are exactly equal. Lines die with their entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique id within the collection.
    pub id: EntryId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Debit/credit lines, in recorded order.
    #[serde(rename = "entries")]
    pub lines: Vec<JournalLine>,
}

impl Entry {
    /// Sum of all debit amounts.
    #[must_use]
    pub fn total_debits(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit).sum()
    }

    /// Sum of all credit amounts.
    #[must_use]
    pub fn total_credits(&self) -> Decimal {
        self.lines.iter().map(|line| line.credit).sum()
    }
}

/// Input for creating or replacing a journal entry.
///
/// Carries everything except the id, which the journal assigns on acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// Transaction date.
    pub date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Debit/credit lines.
    #[serde(rename = "entries")]
    pub lines: Vec<JournalLine>,
}

impl EntryDraft {
    /// Sum of all debit amounts.
    #[must_use]
    pub fn total_debits(&self) -> Decimal {
        self.lines.iter().map(|line| line.debit).sum()
    }

    /// Sum of all credit amounts.
    #[must_use]
    pub fn total_credits(&self) -> Decimal {
        self.lines.iter().map(|line| line.credit).sum()
    }
}

/// One journal collection: its entries plus the id high-water mark.
///
/// `next_id` is persisted alongside the entries so ids stay monotonic across
/// deletions; it only ever moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    /// The next id to issue.
    pub next_id: EntryId,
    /// Entries in insertion order.
    pub entries: Vec<Entry>,
}

impl Default for Journal {
    fn default() -> Self {
        Self {
            next_id: EntryId::FIRST,
            entries: Vec::new(),
        }
    }
}

impl Journal {
    /// Takes the next id and advances the high-water mark.
    pub fn allocate_id(&mut self) -> EntryId {
        let id = self.next_id;
        self.next_id = self.next_id.next();
        id
    }

    /// Finds an entry by id.
    #[must_use]
    pub fn find(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Finds an entry by id, mutably.
    pub fn find_mut(&mut self, id: EntryId) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }
}
