//! Raw import rows and the batch report.
//!
//! Field names are a fixed external contract with the GL source system
//! and must not be renamed.

use serde::{Deserialize, Serialize};

/// A raw actual-transaction row from the GL source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawActualRow {
    /// GL account key.
    #[serde(default)]
    pub gl: String,
    /// Line number, not yet normalized.
    #[serde(default)]
    pub line: String,
    /// Transaction description.
    #[serde(default)]
    pub description: String,
    /// Posted amount.
    #[serde(default)]
    pub amount: f64,
    /// Sequence number, when the source carries one.
    #[serde(default)]
    pub seq: Option<f64>,
    /// Transaction date, e.g. `2023-03-15`.
    #[serde(default)]
    pub tr_date: Option<String>,
    /// Vendor name.
    #[serde(default)]
    pub vendor_name: Option<String>,
    /// Voucher number.
    #[serde(default)]
    pub vouchno: Option<String>,
}

/// A raw budget row from the GL source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBudgetRow {
    /// Fully formatted GL account number.
    #[serde(default)]
    pub formattedglacctno: String,
    /// Budgeted amount.
    #[serde(default)]
    pub budgetamt: f64,
    /// Budget description.
    #[serde(default)]
    pub description: String,
}

/// A raw GL-listing row used to seed accounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGlRow {
    /// GL account key.
    #[serde(default)]
    pub gl: String,
    /// Account description.
    #[serde(default)]
    pub description: String,
}

/// Outcome of a best-effort batch import.
///
/// Bulk imports are not atomic: rows committed before a failure stay
/// committed, and the report tells the caller how far the batch got.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Rows received in the batch.
    pub total: usize,
    /// Rows actually inserted.
    pub imported: usize,
    /// Rows skipped by normalization or duplicate detection.
    pub skipped: usize,
    /// First error encountered, when the batch aborted early.
    pub error: Option<String>,
}

impl ImportReport {
    /// Creates a report for a batch of `total` rows.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }
}
