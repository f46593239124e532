//! `SeaORM` Entity for the accounts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Unique GL account code, e.g. `52100-03-31-01-01`.
    #[sea_orm(unique)]
    pub key: String,
    pub description: String,
    /// Primary manager reference. Deleting a manager leaves this
    /// dangling; readers must tolerate it as absent.
    pub manager_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::managers::Entity",
        from = "Column::ManagerId",
        to = "super::managers::Column::Id"
    )]
    Managers,
}

impl Related<super::managers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Managers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
