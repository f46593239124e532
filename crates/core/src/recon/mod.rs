//! Budget vs. actual reconciliation and listing views.

pub mod engine;
pub mod types;


pub use engine::{build_line_items, manager_map, vendor_matches};
pub use types::{AccountRef, ActualRecord, BudgetRecord, LineItemFilter, LineItemRow};
