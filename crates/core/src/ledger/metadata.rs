//! Report labeling metadata.

use serde::{Deserialize, Serialize};

/// Free-form labels shown on report headers.
///
/// Persisted alongside the ledger and replaced wholesale on update; none of
/// the fields participate in any calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Company or entity name.
    #[serde(default)]
    pub company_name: String,
    /// Reporting period label, e.g. "January 2024".
    #[serde(default)]
    pub period_label: String,
    /// Name of the person preparing the statements.
    #[serde(default)]
    pub prepared_by: String,
}
