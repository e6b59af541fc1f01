//! Filesystem-backed JSON persistence for Saldo ledgers.
//!
//! One pretty-printed JSON document per collection under a data directory:
//! `accounts.json`, `transactions.json`, `adjustments.json`, and
//! `metadata.json`. Every load reads the document fresh from disk; every save
//! writes a temporary file and renames it over the old document, so a failed
//! save leaves the previous state intact. A single writer per data directory
//! is assumed.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use saldo_core::ledger::account::Account;
use saldo_core::ledger::entry::{Journal, JournalKind};
use saldo_core::ledger::metadata::ReportMetadata;
use saldo_core::storage::{LedgerStore, StoreError};
use saldo_shared::config::StorageConfig;

const ACCOUNTS_FILE: &str = "accounts.json";
const TRANSACTIONS_FILE: &str = "transactions.json";
const ADJUSTMENTS_FILE: &str = "adjustments.json";
const METADATA_FILE: &str = "metadata.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-document store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Opens a store at the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        Self::new(config.data_dir.clone())
    }

    /// The directory the documents live in.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn journal_path(&self, kind: JournalKind) -> PathBuf {
        let file = match kind {
            JournalKind::Transactions => TRANSACTIONS_FILE,
            JournalKind::Adjustments => ADJUSTMENTS_FILE,
        };
        self.data_dir.join(file)
    }

    fn read_document<T>(&self, path: &Path) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        if !path.exists() {
            return Ok(T::default());
        }
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|err| StoreError::Serialization(err.to_string()))
    }

    fn write_document<T>(&self, path: &Path, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let data = serde_json::to_string_pretty(value)
            .map_err(|err| StoreError::Serialization(err.to_string()))?;

        let tmp = tmp_path(path);
        write_atomic(&tmp, &data)?;
        fs::rename(&tmp, path)?;

        debug!(path = %path.display(), "Document saved");
        Ok(())
    }
}

impl LedgerStore for JsonFileStore {
    fn load_accounts(&self) -> Result<Vec<Account>, StoreError> {
        self.read_document(&self.data_dir.join(ACCOUNTS_FILE))
    }

    fn save_accounts(&self, accounts: &[Account]) -> Result<(), StoreError> {
        self.write_document(&self.data_dir.join(ACCOUNTS_FILE), &accounts)
    }

    fn load_journal(&self, kind: JournalKind) -> Result<Journal, StoreError> {
        self.read_document(&self.journal_path(kind))
    }

    fn save_journal(&self, kind: JournalKind, journal: &Journal) -> Result<(), StoreError> {
        self.write_document(&self.journal_path(kind), journal)
    }

    fn load_metadata(&self) -> Result<ReportMetadata, StoreError> {
        self.read_document(&self.data_dir.join(METADATA_FILE))
    }

    fn save_metadata(&self, metadata: &ReportMetadata) -> Result<(), StoreError> {
        self.write_document(&self.data_dir.join(METADATA_FILE), metadata)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
