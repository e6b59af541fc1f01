//! Financial report generation.
//!
//! This module derives the accounting statements from the ledger:
//! - Trial Balance
//! - Adjusted Trial Balance
//! - Income Statement
//! - Statement of Financial Position (with contra-account netting)
//! - Statement of Changes in Equity
//! - General Ledger
//!
//! It also hosts the closing-entry synthesizer, which writes one balanced
//! adjusting entry back through the journal service.

pub mod closing;
pub mod contra;
pub mod ledger_view;
pub mod service;
pub mod types;


pub use closing::{ClosingService, ClosingSummary};
pub use contra::{CodeProximityLinker, ContraLinker};
pub use ledger_view::build_general_ledger;
pub use service::ReportService;
pub use types::*;
