//! Account repository, including the account-manager association and
//! GL-listing import.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{info, warn};
use uuid::Uuid;

use ledgerline_core::import::{ImportReport, RawGlRow};

use crate::entities::{account_managers, accounts, managers};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(String),

    /// Account key already exists.
    #[error("Account key already exists: {0}")]
    DuplicateKey(String),

    /// Association already exists.
    #[error("Account {key} is already linked to manager {manager_id}")]
    AlreadyLinked {
        /// Account key.
        key: String,
        /// Manager id.
        manager_id: String,
    },

    /// Association not found.
    #[error("Account {key} is not linked to manager {manager_id}")]
    LinkNotFound {
        /// Account key.
        key: String,
        /// Manager id.
        manager_id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// Unique GL account key.
    pub key: String,
    /// Account description.
    pub description: String,
    /// Primary manager reference.
    pub manager_id: Option<String>,
}

/// Input for updating an account. Absent fields are left unchanged;
/// `manager_id` uses the double-`Option` pattern so the reference can
/// be cleared explicitly.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New key.
    pub key: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New manager reference (`Some(None)` clears it).
    pub manager_id: Option<Option<String>>,
}

/// Account repository for CRUD and association operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all accounts ordered by key.
    pub async fn list(&self) -> Result<Vec<accounts::Model>, AccountError> {
        let rows = accounts::Entity::find()
            .order_by_asc(accounts::Column::Key)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Gets an account by id.
    pub async fn get(&self, id: &str) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))
    }

    /// Gets an account by its unique GL key.
    pub async fn get_by_key(&self, key: &str) -> Result<Option<accounts::Model>, AccountError> {
        let row = accounts::Entity::find()
            .filter(accounts::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(row)
    }

    /// Creates an account.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, AccountError> {
        if self.get_by_key(&input.key).await?.is_some() {
            return Err(AccountError::DuplicateKey(input.key));
        }

        let active = accounts::ActiveModel {
            id: Set(input.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
            key: Set(input.key),
            description: Set(input.description),
            manager_id: Set(input.manager_id),
        };
        let created = active.insert(&self.db).await?;

        info!(account_id = %created.id, key = %created.key, "Account created");
        Ok(created)
    }

    /// Updates an account.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let existing = self.get(id).await?;

        if let Some(key) = &input.key
            && key != &existing.key
            && self.get_by_key(key).await?.is_some()
        {
            return Err(AccountError::DuplicateKey(key.clone()));
        }

        let mut active: accounts::ActiveModel = existing.into();
        if let Some(key) = input.key {
            active.key = Set(key);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(manager_id) = input.manager_id {
            active.manager_id = Set(manager_id);
        }
        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an account. Budget and actual items referencing its key
    /// are left untouched.
    pub async fn delete(&self, id: &str) -> Result<(), AccountError> {
        let existing = self.get(id).await?;
        let active: accounts::ActiveModel = existing.into();
        active.delete(&self.db).await?;
        Ok(())
    }

    /// Deletes all accounts.
    pub async fn delete_all(&self) -> Result<u64, AccountError> {
        let result = accounts::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    // ========================================================================
    // Account-manager association (kept separate from accounts.manager_id)
    // ========================================================================

    /// Lists all account-manager associations.
    pub async fn list_links(&self) -> Result<Vec<account_managers::Model>, AccountError> {
        let rows = account_managers::Entity::find()
            .order_by_asc(account_managers::Column::Key)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Lists the managers associated with one account key.
    pub async fn links_for_key(
        &self,
        key: &str,
    ) -> Result<Vec<account_managers::Model>, AccountError> {
        let rows = account_managers::Entity::find()
            .filter(account_managers::Column::Key.eq(key))
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Associates a manager with an account key.
    pub async fn link(
        &self,
        key: &str,
        manager_id: &str,
    ) -> Result<account_managers::Model, AccountError> {
        let existing = account_managers::Entity::find()
            .filter(account_managers::Column::Key.eq(key))
            .filter(account_managers::Column::ManagerId.eq(manager_id))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::AlreadyLinked {
                key: key.to_string(),
                manager_id: manager_id.to_string(),
            });
        }

        let active = account_managers::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            key: Set(key.to_string()),
            manager_id: Set(manager_id.to_string()),
        };
        let created = active.insert(&self.db).await?;
        Ok(created)
    }

    /// Removes an account-manager association.
    pub async fn unlink(&self, key: &str, manager_id: &str) -> Result<(), AccountError> {
        let result = account_managers::Entity::delete_many()
            .filter(account_managers::Column::Key.eq(key))
            .filter(account_managers::Column::ManagerId.eq(manager_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AccountError::LinkNotFound {
                key: key.to_string(),
                manager_id: manager_id.to_string(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // GL-listing import
    // ========================================================================

    /// Imports raw GL-listing rows as accounts, best effort.
    ///
    /// Blank keys and keys already present are skipped. New accounts
    /// get the current default manager as their primary reference when
    /// one is set. A database failure aborts the remaining rows but
    /// keeps earlier inserts; the report carries the first error.
    pub async fn import_gl_rows(&self, rows: &[RawGlRow]) -> ImportReport {
        let mut report = ImportReport::new(rows.len());

        let default_manager_id = match managers::Entity::find()
            .filter(managers::Column::IsDefault.eq("on"))
            .one(&self.db)
            .await
        {
            Ok(row) => row.map(|m| m.id),
            Err(e) => {
                report.error = Some(e.to_string());
                return report;
            }
        };

        for row in rows {
            let key = row.gl.trim();
            if key.is_empty() {
                report.skipped += 1;
                continue;
            }

            match self.get_by_key(key).await {
                Ok(Some(_)) => {
                    report.skipped += 1;
                    continue;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, key, "GL import aborted");
                    report.error = Some(e.to_string());
                    break;
                }
            }

            let input = CreateAccountInput {
                id: None,
                key: key.to_string(),
                description: row.description.trim().to_string(),
                manager_id: default_manager_id.clone(),
            };
            match self.create(input).await {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    warn!(error = %e, key, "GL import aborted");
                    report.error = Some(e.to_string());
                    break;
                }
            }
        }

        report
    }
}
