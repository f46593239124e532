//! `SeaORM` Entity for the budget_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// References `accounts.key` informally (no enforced foreign key).
    pub acct5: String,
    /// "01".."99" for manual entries, "00" reserved for bulk import.
    pub line: String,
    pub description: String,
    pub amount: f64,
    /// Optional date-range lower bound, e.g. `2023-01-01`.
    pub datefrom: Option<String>,
    /// Optional date-range upper bound, e.g. `2023-12-31`.
    pub dateto: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
