//! Actual-item normalization and duplicate detection.

use ledgerline_shared::pad2;
use serde::{Deserialize, Serialize};

use super::types::RawActualRow;

/// Two amounts within this tolerance count as equal for duplicate
/// detection (half a cent).
pub const AMOUNT_TOLERANCE: f64 = 0.005;

/// A raw actual row after normalization, ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedActual {
    /// GL account key.
    pub acct5: String,
    /// Zero-padded two-digit line number.
    pub line: String,
    /// Transaction description.
    pub description: String,
    /// Posted amount.
    pub amount: f64,
    /// Sequence number, when supplied by the source.
    pub seq: Option<f64>,
    /// Transaction date.
    pub tr_date: Option<String>,
    /// Vendor name.
    pub vendor_name: Option<String>,
    /// Voucher number.
    pub vouchno: Option<String>,
}

impl NormalizedActual {
    /// The fields duplicate detection compares.
    #[must_use]
    pub fn fingerprint(&self) -> ActualFingerprint {
        ActualFingerprint {
            acct5: self.acct5.clone(),
            description: self.description.clone(),
            amount: self.amount,
            tr_date: self.tr_date.clone(),
            vendor_name: self.vendor_name.clone(),
        }
    }
}

/// The identity of an actual posting for duplicate detection.
///
/// The line number is deliberately NOT part of the identity: the same
/// posting re-imported under a different line is still a duplicate.
#[derive(Debug, Clone, PartialEq)]
pub struct ActualFingerprint {
    /// GL account key.
    pub acct5: String,
    /// Exact description.
    pub description: String,
    /// Posted amount.
    pub amount: f64,
    /// Transaction date, compared as equal-or-both-absent.
    pub tr_date: Option<String>,
    /// Vendor name, compared as equal-or-both-absent.
    pub vendor_name: Option<String>,
}

impl ActualFingerprint {
    /// True when `other` represents the same posting: matching account
    /// key and description, amount within [`AMOUNT_TOLERANCE`], and
    /// matching (or mutually absent) transaction date and vendor.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.acct5 == other.acct5
            && self.description == other.description
            && (self.amount - other.amount).abs() <= AMOUNT_TOLERANCE
            && self.tr_date == other.tr_date
            && self.vendor_name == other.vendor_name
    }
}

/// Normalizes a raw actual row.
///
/// The line number is zero-padded to two digits. Returns `None` (skip
/// the row entirely) for a blank account key, blank line, blank
/// description, or zero amount.
#[must_use]
pub fn normalize_actual(row: &RawActualRow) -> Option<NormalizedActual> {
    let acct5 = row.gl.trim();
    let description = row.description.trim();

    if acct5.is_empty() || row.line.trim().is_empty() || description.is_empty() {
        return None;
    }
    if row.amount == 0.0 {
        return None;
    }

    Some(NormalizedActual {
        acct5: acct5.to_string(),
        line: pad2(&row.line),
        description: description.to_string(),
        amount: row.amount,
        seq: row.seq,
        tr_date: row.tr_date.clone(),
        vendor_name: row.vendor_name.clone(),
        vouchno: row.vouchno.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(gl: &str, line: &str, desc: &str, amount: f64) -> RawActualRow {
        RawActualRow {
            gl: gl.to_string(),
            line: line.to_string(),
            description: desc.to_string(),
            amount,
            ..RawActualRow::default()
        }
    }

    #[test]
    fn test_normalize_pads_line() {
        let norm = normalize_actual(&raw("100-01", "1", "invoice", 10.0)).unwrap();
        assert_eq!(norm.line, "01");

        let norm = normalize_actual(&raw("100-01", "23", "invoice", 10.0)).unwrap();
        assert_eq!(norm.line, "23");
    }

    #[test]
    fn test_normalize_skips_blank_fields() {
        assert!(normalize_actual(&raw("", "01", "invoice", 10.0)).is_none());
        assert!(normalize_actual(&raw("100-01", " ", "invoice", 10.0)).is_none());
        assert!(normalize_actual(&raw("100-01", "01", "", 10.0)).is_none());
    }

    #[test]
    fn test_normalize_skips_zero_amount() {
        assert!(normalize_actual(&raw("100-01", "01", "invoice", 0.0)).is_none());
    }

    #[test]
    fn test_duplicate_ignores_line() {
        let mut a = normalize_actual(&raw("100-01", "01", "invoice", 10.0)).unwrap();
        let mut b = normalize_actual(&raw("100-01", "07", "invoice", 10.0)).unwrap();
        a.tr_date = Some("2023-03-15".to_string());
        b.tr_date = Some("2023-03-15".to_string());

        assert!(a.fingerprint().matches(&b.fingerprint()));
    }

    #[test]
    fn test_duplicate_amount_tolerance() {
        let a = normalize_actual(&raw("100-01", "01", "invoice", 10.0)).unwrap();
        let close = normalize_actual(&raw("100-01", "01", "invoice", 10.004)).unwrap();
        let far = normalize_actual(&raw("100-01", "01", "invoice", 10.01)).unwrap();

        assert!(a.fingerprint().matches(&close.fingerprint()));
        assert!(!a.fingerprint().matches(&far.fingerprint()));
    }

    #[test]
    fn test_duplicate_requires_matching_optionals() {
        let base = normalize_actual(&raw("100-01", "01", "invoice", 10.0)).unwrap();
        let mut dated = base.clone();
        dated.tr_date = Some("2023-03-15".to_string());
        let mut vendored = base.clone();
        vendored.vendor_name = Some("Acme".to_string());

        // Both absent matches; one absent does not.
        assert!(base.fingerprint().matches(&base.clone().fingerprint()));
        assert!(!base.fingerprint().matches(&dated.fingerprint()));
        assert!(!base.fingerprint().matches(&vendored.fingerprint()));
    }

    #[test]
    fn test_duplicate_description_exact() {
        let a = normalize_actual(&raw("100-01", "01", "invoice", 10.0)).unwrap();
        let b = normalize_actual(&raw("100-01", "01", "Invoice", 10.0)).unwrap();

        assert!(!a.fingerprint().matches(&b.fingerprint()));
    }
}
