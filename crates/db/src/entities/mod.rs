//! `SeaORM` entity definitions.

pub mod account_managers;
pub mod accounts;
pub mod actual_items;
pub mod budget_items;
pub mod managers;
