//! Manager repository.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::managers;

/// Error types for manager operations.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    /// Manager not found.
    #[error("Manager not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a manager.
#[derive(Debug, Clone)]
pub struct CreateManagerInput {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// Manager name.
    pub name: String,
    /// "on" to mark as the organization default.
    pub is_default: Option<String>,
    /// Privilege indicator ("on" / "No" style).
    pub is_admin: Option<String>,
}

/// Input for updating a manager. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateManagerInput {
    /// New name.
    pub name: Option<String>,
    /// New default flag ("on" / "off").
    pub is_default: Option<String>,
    /// New privilege indicator.
    pub is_admin: Option<String>,
}

/// Manager repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ManagerRepository {
    db: DatabaseConnection,
}

impl ManagerRepository {
    /// Creates a new manager repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all managers ordered by name.
    pub async fn list(&self) -> Result<Vec<managers::Model>, ManagerError> {
        let rows = managers::Entity::find()
            .order_by_asc(managers::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Gets a manager by id.
    pub async fn get(&self, id: &str) -> Result<managers::Model, ManagerError> {
        managers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ManagerError::NotFound(id.to_string()))
    }

    /// Returns the manager currently marked as the organization
    /// default, if any.
    pub async fn default_manager(&self) -> Result<Option<managers::Model>, ManagerError> {
        let row = managers::Entity::find()
            .filter(managers::Column::IsDefault.eq("on"))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Creates a manager.
    ///
    /// When the new manager is marked default, every other manager's
    /// default flag is reset in the same transaction so exactly one
    /// default exists afterwards.
    pub async fn create(&self, input: CreateManagerInput) -> Result<managers::Model, ManagerError> {
        let id = input
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let set_default = input.is_default.as_deref() == Some("on");

        let active = managers::ActiveModel {
            id: Set(id),
            name: Set(input.name),
            is_default: Set(input.is_default.unwrap_or_else(|| "off".to_string())),
            is_admin: Set(input.is_admin.unwrap_or_else(|| "No".to_string())),
        };

        let txn = self.db.begin().await?;
        if set_default {
            Self::clear_other_defaults(&txn, None).await?;
        }
        let created = active.insert(&txn).await?;
        txn.commit().await?;

        info!(manager_id = %created.id, name = %created.name, "Manager created");
        Ok(created)
    }

    /// Updates a manager.
    ///
    /// Setting the default flag to "on" atomically resets every other
    /// manager's flag to "off" in the same transaction: either both the
    /// target update and the blanket reset happen, or neither.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateManagerInput,
    ) -> Result<managers::Model, ManagerError> {
        let existing = self.get(id).await?;
        let set_default = input.is_default.as_deref() == Some("on");

        let txn = self.db.begin().await?;

        if set_default {
            Self::clear_other_defaults(&txn, Some(id)).await?;
        }

        let mut active: managers::ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(is_default) = input.is_default {
            active.is_default = Set(is_default);
        }
        if let Some(is_admin) = input.is_admin {
            active.is_admin = Set(is_admin);
        }
        let updated = active.update(&txn).await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Deletes a manager. Accounts referencing it are left untouched;
    /// their manager reference dangles and reads tolerate it.
    pub async fn delete(&self, id: &str) -> Result<(), ManagerError> {
        let existing = self.get(id).await?;
        let active: managers::ActiveModel = existing.into();
        active.delete(&self.db).await?;
        Ok(())
    }

    /// Deletes all managers.
    pub async fn delete_all(&self) -> Result<u64, ManagerError> {
        let result = managers::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// Resets the default flag on every manager except `keep`.
    async fn clear_other_defaults<C: sea_orm::ConnectionTrait>(
        conn: &C,
        keep: Option<&str>,
    ) -> Result<(), DbErr> {
        let mut query = managers::Entity::update_many()
            .col_expr(managers::Column::IsDefault, Expr::value("off"));
        if let Some(id) = keep {
            query = query.filter(managers::Column::Id.ne(id));
        }
        query.exec(conn).await?;
        Ok(())
    }
}
