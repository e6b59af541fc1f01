//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use saldo_shared::{AccountCode, EntryId};
use thiserror::Error;

use super::entry::JournalKind;
use crate::storage::StoreError;

/// Errors that can occur during ledger operations.
///
/// Every validation error is detected before any mutation is applied, so a
/// failed operation leaves the stored state untouched.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Entry Validation Errors ==========
    /// Entry failed structural validation (missing field, too few lines,
    /// malformed line).
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Entry debit and credit sums do not match exactly.
    #[error("Entry is not balanced. Debit: {debits}, Credit: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    /// A line references a code that is not in the chart of accounts.
    #[error("Unknown account code: {0}")]
    UnknownAccount(AccountCode),

    // ========== Registry Errors ==========
    /// The code is already registered.
    #[error("Duplicate account code: {0}")]
    DuplicateCode(AccountCode),

    /// Account input failed validation (unparseable code, empty name).
    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    /// No account registered under the code.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountCode),

    /// The account is referenced by journal lines and cannot be deleted.
    #[error("Account {0} is referenced by journal entries and cannot be deleted")]
    AccountInUse(AccountCode),

    // ========== Journal Errors ==========
    /// No entry with the id in the collection.
    #[error("Entry {id} not found in {kind}")]
    EntryNotFound {
        /// The collection that was searched.
        kind: JournalKind,
        /// The missing id.
        id: EntryId,
    },

    // ========== Closing Errors ==========
    /// No revenue or expense account carries a balance to close.
    #[error("No revenue or expense balances to close")]
    NothingToClose,

    /// The configured retained-earnings account is not registered as equity.
    #[error("Retained earnings account {0} is not registered as an equity account")]
    MissingRetainedEarningsAccount(AccountCode),

    // ========== Storage Errors ==========
    /// The persistence collaborator failed.
    #[error("Storage unavailable: {0}")]
    Storage(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEntry(_) => "INVALID_ENTRY",
            Self::Unbalanced { .. } => "UNBALANCED",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::InvalidAccount(_) => "INVALID_ACCOUNT",
            Self::AccountNotFound(_) | Self::EntryNotFound { .. } => "NOT_FOUND",
            Self::AccountInUse(_) => "ACCOUNT_IN_USE",
            Self::NothingToClose => "NOTHING_TO_CLOSE",
            Self::MissingRetainedEarningsAccount(_) => "MISSING_RETAINED_EARNINGS_ACCOUNT",
            Self::Storage(_) => "STORAGE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code a transport wrapper should map this to.
    ///
    /// Validation errors are client errors; storage failures are server errors.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation errors
            Self::InvalidEntry(_)
            | Self::Unbalanced { .. }
            | Self::UnknownAccount(_)
            | Self::InvalidAccount(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::EntryNotFound { .. } => 404,

            // 409 Conflict - uniqueness and referential integrity
            Self::DuplicateCode(_) | Self::AccountInUse(_) => 409,

            // 422 Unprocessable - closing preconditions
            Self::NothingToClose | Self::MissingRetainedEarningsAccount(_) => 422,

            // 500 Internal Server Error
            Self::Storage(_) => 500,
        }
    }
}
