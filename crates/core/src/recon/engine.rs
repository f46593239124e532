//! The reconciliation engine: joins budget and actual rows by
//! (account, line) key into a unified variance view.

use std::collections::{BTreeMap, HashMap};

use ledgerline_shared::LineKey;

use super::types::{AccountRef, ActualRecord, BudgetRecord, LineItemFilter, LineItemRow};

/// Builds the account-key → manager-id lookup used by the manager
/// filter predicate. Accounts without a manager are absent.
#[must_use]
pub fn manager_map(accounts: &[AccountRef]) -> HashMap<String, String> {
    accounts
        .iter()
        .filter_map(|a| {
            a.manager_id
                .as_ref()
                .map(|m| (a.key.clone(), m.clone()))
        })
        .collect()
}

/// Working state for one joined row while both sources are folded in.
struct JoinedRow {
    budget_desc: Option<String>,
    budget: f64,
    actual_desc: Option<String>,
    actual: f64,
}

/// Joins budget and actual rows into the unified line-item view.
///
/// Budget rows are folded first, then actual rows. Filter predicates
/// are evaluated against each source row's own account and description.
/// A key seen only in actuals gets budget 0.0 and its budget
/// description backfilled from the (unfiltered) budget collection when
/// one exists. Repeated actual keys accumulate amounts; the actual
/// description is last-write-wins.
///
/// The output is sorted ascending by `(acct5, line)` as strings and
/// carries `variance = budget - actual` per row. Pure function, no
/// side effects.
#[must_use]
pub fn build_line_items(
    budget: &[BudgetRecord],
    actuals: &[ActualRecord],
    accounts: &[AccountRef],
    filter: &LineItemFilter,
) -> Vec<LineItemRow> {
    let managers = manager_map(accounts);

    // Backfill map over ALL budget rows, not just the filtered ones.
    let budget_lookup: HashMap<LineKey, String> = budget
        .iter()
        .map(|b| {
            (
                LineKey::new(b.acct5.clone(), b.line.clone()),
                b.description.clone(),
            )
        })
        .collect();

    let mut joined: BTreeMap<LineKey, JoinedRow> = BTreeMap::new();

    for b in budget {
        if !filter.matches(&b.acct5, &b.description, &managers) {
            continue;
        }
        let key = LineKey::new(b.acct5.clone(), b.line.clone());
        joined.insert(
            key,
            JoinedRow {
                budget_desc: Some(b.description.clone()),
                budget: b.amount,
                actual_desc: None,
                actual: 0.0,
            },
        );
    }

    for a in actuals {
        if !filter.matches(&a.acct5, &a.description, &managers) {
            continue;
        }
        let key = LineKey::new(a.acct5.clone(), a.line.clone());
        match joined.get_mut(&key) {
            Some(row) => {
                row.actual += a.amount;
                row.actual_desc = Some(a.description.clone());
            }
            None => {
                let budget_desc = budget_lookup.get(&key).cloned();
                joined.insert(
                    key,
                    JoinedRow {
                        budget_desc,
                        budget: 0.0,
                        actual_desc: Some(a.description.clone()),
                        actual: a.amount,
                    },
                );
            }
        }
    }

    // BTreeMap iteration order is the required (acct5, line) string order.
    joined
        .into_iter()
        .map(|(key, row)| LineItemRow {
            acct5: key.acct5,
            line: key.line,
            budget_desc: row.budget_desc,
            budget: row.budget,
            actual_desc: row.actual_desc,
            actual: row.actual,
            variance: row.budget - row.actual,
        })
        .collect()
}

/// Extra predicate for actual-only views: case-insensitive substring
/// match on the vendor name. Rows without a vendor fail a configured
/// predicate; no predicate passes everything.
#[must_use]
pub fn vendor_matches(vendor: Option<&str>, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) => vendor.is_some_and(|v| v.to_lowercase().contains(&n.to_lowercase())),
    }
}
