//! `SeaORM` Entity for the account_managers association table.
//!
//! Many-to-many association between account keys and managers, kept
//! distinct from the single `accounts.manager_id` reference. Both
//! relations are read independently elsewhere; neither is collapsed
//! into the other.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "account_managers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Account key (not the account id).
    pub key: String,
    pub manager_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
