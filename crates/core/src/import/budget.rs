//! Budget bulk-import filtering.

use serde::{Deserialize, Serialize};

use super::types::RawBudgetRow;

/// Trailing key suffix of placeholder/summary GL accounts. Rows whose
/// key ends with this carry no budget meaning and are skipped.
pub const PLACEHOLDER_SUFFIX: &str = "00-00-00-00-00";

/// Line number assigned to every bulk-imported budget row, reserved to
/// distinguish them from manually entered lines 01-99.
pub const BULK_IMPORT_LINE: &str = "00";

/// A raw budget row after normalization, ready for insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBudget {
    /// GL account key.
    pub acct5: String,
    /// Always [`BULK_IMPORT_LINE`].
    pub line: String,
    /// Budget description.
    pub description: String,
    /// Budgeted amount.
    pub amount: f64,
}

/// Normalizes a raw budget row.
///
/// Returns `None` for a blank account key or for a placeholder key
/// (trailing 14 characters equal to [`PLACEHOLDER_SUFFIX`]). Accepted
/// rows are assigned line "00".
#[must_use]
pub fn normalize_budget(row: &RawBudgetRow) -> Option<NormalizedBudget> {
    let acct5 = row.formattedglacctno.trim();

    if acct5.is_empty() || acct5.ends_with(PLACEHOLDER_SUFFIX) {
        return None;
    }

    Some(NormalizedBudget {
        acct5: acct5.to_string(),
        line: BULK_IMPORT_LINE.to_string(),
        description: row.description.trim().to_string(),
        amount: row.budgetamt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(key: &str, amount: f64) -> RawBudgetRow {
        RawBudgetRow {
            formattedglacctno: key.to_string(),
            budgetamt: amount,
            description: "dept total".to_string(),
        }
    }

    #[test]
    fn test_placeholder_suffix_skipped() {
        assert!(normalize_budget(&raw("52100-00-00-00-00-00", 100.0)).is_none());
    }

    #[test]
    fn test_near_placeholder_kept_with_line_zero_zero() {
        let norm = normalize_budget(&raw("52100-00-00-00-00-01", 100.0)).unwrap();

        assert_eq!(norm.acct5, "52100-00-00-00-00-01");
        assert_eq!(norm.line, "00");
        assert!((norm.amount - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_blank_key_skipped() {
        assert!(normalize_budget(&raw("", 100.0)).is_none());
        assert!(normalize_budget(&raw("   ", 100.0)).is_none());
    }

    #[test]
    fn test_suffix_length_is_fourteen() {
        assert_eq!(PLACEHOLDER_SUFFIX.len(), 14);
    }

    #[test]
    fn test_zero_amount_budget_row_kept() {
        // Unlike actuals, a zero budget amount is a legitimate row.
        assert!(normalize_budget(&raw("52100-03-31-01-01", 0.0)).is_some());
    }
}
