//! The persistence contract.
//!
//! The core consumes persistence through the small CRUD-style [`LedgerStore`]
//! trait: whole-collection reads and whole-collection saves. Every mutating
//! service validates first and saves once, so a failing save leaves the prior
//! state intact. Adapters decide how the snapshot is actually kept (in
//! memory, JSON documents on disk).

pub mod memory;

use thiserror::Error;

use crate::ledger::account::Account;
use crate::ledger::entry::{Journal, JournalKind};
use crate::ledger::metadata::ReportMetadata;

pub use memory::MemoryStore;

/// Errors surfaced by a persistence adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The stored state is internally inconsistent.
    #[error("corrupt store: {0}")]
    Corrupt(String),
}

/// Persistence contract for one logical ledger.
///
/// Reads return fresh snapshots; implementations must not hand out stale
/// cached state, because every report derivation re-reads through this trait.
pub trait LedgerStore: Send + Sync {
    /// Reads all registered accounts.
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Replaces the stored account list.
    fn save_accounts(&self, accounts: &[Account]) -> Result<(), StoreError>;

    /// Reads one journal collection, including its id high-water mark.
    fn load_journal(&self, kind: JournalKind) -> Result<Journal, StoreError>;

    /// Replaces one journal collection.
    fn save_journal(&self, kind: JournalKind, journal: &Journal) -> Result<(), StoreError>;

    /// Reads the report metadata.
    fn load_metadata(&self) -> Result<ReportMetadata, StoreError>;

    /// Replaces the report metadata.
    fn save_metadata(&self, metadata: &ReportMetadata) -> Result<(), StoreError>;
}
