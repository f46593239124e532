//! Core business logic for Ledgerline.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain calculations live here.
//!
//! # Modules
//!
//! - `recon` - Budget vs. actual reconciliation and listing views
//! - `import` - Normalization and de-duplication for bulk imports

pub mod import;
pub mod recon;
