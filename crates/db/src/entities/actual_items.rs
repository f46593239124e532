//! `SeaORM` Entity for the actual_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "actual_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// References `accounts.key` informally (no enforced foreign key).
    pub acct5: String,
    /// Two-digit line number.
    pub line: String,
    /// Transaction date, e.g. `2023-03-15`.
    pub tr_date: Option<String>,
    pub description: String,
    pub amount: f64,
    /// Sequence number, increments of 5 when auto-assigned.
    pub seq: Option<f64>,
    pub vendor_name: Option<String>,
    pub vouchno: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
