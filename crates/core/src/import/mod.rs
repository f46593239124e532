//! Normalization and de-duplication for bulk imports.
//!
//! Raw rows arrive from an external GL system as loosely typed records;
//! these routines decide which rows become budget/actual items and how
//! their keys are normalized. Persistence of accepted rows happens in
//! the db crate; everything here is pure.

pub mod actuals;
pub mod budget;
pub mod types;

pub use actuals::{AMOUNT_TOLERANCE, ActualFingerprint, NormalizedActual, normalize_actual};
pub use budget::{BULK_IMPORT_LINE, NormalizedBudget, PLACEHOLDER_SUFFIX, normalize_budget};
pub use types::{ImportReport, RawActualRow, RawBudgetRow, RawGlRow};
