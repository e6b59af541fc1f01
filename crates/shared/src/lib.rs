//! Shared types and configuration for Saldo.
//!
//! This crate provides common types used across all other crates:
//! - Account codes and entry ids for type-safe ledger references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{AccountCode, CodeParseError, EntryId};
