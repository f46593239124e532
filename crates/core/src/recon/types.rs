//! Reconciliation data types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A budget row as seen by the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    /// GL account code.
    pub acct5: String,
    /// Two-digit line number.
    pub line: String,
    /// Budget line description.
    pub description: String,
    /// Budgeted amount.
    pub amount: f64,
}

/// An actual transaction row as seen by the reconciliation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualRecord {
    /// GL account code.
    pub acct5: String,
    /// Two-digit line number.
    pub line: String,
    /// Transaction description.
    pub description: String,
    /// Posted amount.
    pub amount: f64,
    /// Vendor name, when known.
    pub vendor_name: Option<String>,
}

/// The slice of an account needed for manager resolution.
///
/// `manager_id` may reference a manager that no longer exists; the
/// engine treats a dangling reference the same as no reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    /// Unique GL account key.
    pub key: String,
    /// Primary manager reference, possibly dangling.
    pub manager_id: Option<String>,
}

/// Optional filters applied to reconciliation and listing views.
#[derive(Debug, Clone, Default)]
pub struct LineItemFilter {
    /// Exact account-key match.
    pub acct5: Option<String>,
    /// Case-insensitive substring match on description.
    pub description: Option<String>,
    /// Exact manager-id match, resolved through the account map.
    pub manager_id: Option<String>,
}

impl LineItemFilter {
    /// Returns true when a row with the given account key and
    /// description passes every configured predicate.
    ///
    /// The manager predicate resolves the row's account through
    /// `managers` (see [`super::engine::manager_map`]); a row whose
    /// account has no resolvable manager fails the predicate.
    #[must_use]
    pub fn matches(
        &self,
        acct5: &str,
        description: &str,
        managers: &HashMap<String, String>,
    ) -> bool {
        if let Some(want) = &self.acct5
            && want != acct5
        {
            return false;
        }

        if let Some(needle) = &self.description
            && !description.to_lowercase().contains(&needle.to_lowercase())
        {
            return false;
        }

        if let Some(want) = &self.manager_id
            && managers.get(acct5) != Some(want)
        {
            return false;
        }

        true
    }
}

/// One row of the joined budget-vs-actual view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemRow {
    /// GL account code.
    pub acct5: String,
    /// Two-digit line number.
    pub line: String,
    /// Budget description, absent when the key only appears in actuals.
    pub budget_desc: Option<String>,
    /// Budgeted amount (0.0 when the key only appears in actuals).
    pub budget: f64,
    /// Description of the last-processed actual row for this key.
    pub actual_desc: Option<String>,
    /// Accumulated actual amount.
    pub actual: f64,
    /// `budget - actual`.
    pub variance: f64,
}
