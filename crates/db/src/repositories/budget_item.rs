//! Budget-item repository, including the bulk GL import.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::warn;
use uuid::Uuid;

use ledgerline_core::import::{ImportReport, RawBudgetRow, normalize_budget};

use crate::entities::budget_items;

/// Error types for budget-item operations.
#[derive(Debug, thiserror::Error)]
pub enum BudgetItemError {
    /// Budget item not found.
    #[error("Budget item not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a budget item.
#[derive(Debug, Clone)]
pub struct CreateBudgetItemInput {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// GL account key.
    pub acct5: String,
    /// Two-digit line number.
    pub line: String,
    /// Description.
    pub description: String,
    /// Budgeted amount.
    pub amount: f64,
    /// Optional date-range lower bound.
    pub datefrom: Option<String>,
    /// Optional date-range upper bound.
    pub dateto: Option<String>,
}

/// Input for updating a budget item. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateBudgetItemInput {
    /// New account key.
    pub acct5: Option<String>,
    /// New line number.
    pub line: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<f64>,
    /// New lower bound (`Some(None)` clears it).
    pub datefrom: Option<Option<String>>,
    /// New upper bound (`Some(None)` clears it).
    pub dateto: Option<Option<String>>,
}

/// Budget-item repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct BudgetItemRepository {
    db: DatabaseConnection,
}

impl BudgetItemRepository {
    /// Creates a new budget-item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all budget items ordered by (acct5, line).
    pub async fn list(&self) -> Result<Vec<budget_items::Model>, BudgetItemError> {
        let rows = budget_items::Entity::find()
            .order_by_asc(budget_items::Column::Acct5)
            .order_by_asc(budget_items::Column::Line)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Gets a budget item by id.
    pub async fn get(&self, id: &str) -> Result<budget_items::Model, BudgetItemError> {
        budget_items::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| BudgetItemError::NotFound(id.to_string()))
    }

    /// Creates a budget item.
    pub async fn create(
        &self,
        input: CreateBudgetItemInput,
    ) -> Result<budget_items::Model, BudgetItemError> {
        let active = budget_items::ActiveModel {
            id: Set(input.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
            acct5: Set(input.acct5),
            line: Set(input.line),
            description: Set(input.description),
            amount: Set(input.amount),
            datefrom: Set(input.datefrom),
            dateto: Set(input.dateto),
        };
        let created = active.insert(&self.db).await?;
        Ok(created)
    }

    /// Updates a budget item.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateBudgetItemInput,
    ) -> Result<budget_items::Model, BudgetItemError> {
        let existing = self.get(id).await?;

        let mut active: budget_items::ActiveModel = existing.into();
        if let Some(acct5) = input.acct5 {
            active.acct5 = Set(acct5);
        }
        if let Some(line) = input.line {
            active.line = Set(line);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(amount) = input.amount {
            active.amount = Set(amount);
        }
        if let Some(datefrom) = input.datefrom {
            active.datefrom = Set(datefrom);
        }
        if let Some(dateto) = input.dateto {
            active.dateto = Set(dateto);
        }
        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes a budget item.
    pub async fn delete(&self, id: &str) -> Result<(), BudgetItemError> {
        let existing = self.get(id).await?;
        let active: budget_items::ActiveModel = existing.into();
        active.delete(&self.db).await?;
        Ok(())
    }

    /// Deletes all budget items.
    pub async fn delete_all(&self) -> Result<u64, BudgetItemError> {
        let result = budget_items::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// Next available line number for an account: integer-cast max
    /// existing line plus one, zero-padded to two digits.
    pub async fn next_line(&self, acct5: &str) -> Result<String, BudgetItemError> {
        let lines: Vec<String> = budget_items::Entity::find()
            .filter(budget_items::Column::Acct5.eq(acct5))
            .select_only()
            .column(budget_items::Column::Line)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(next_line_from(&lines))
    }

    /// Imports raw budget rows from the GL source, best effort.
    ///
    /// Placeholder/summary keys (trailing all-zero suffix) and blank
    /// keys are skipped; every imported row gets the reserved bulk
    /// import line "00". A database failure aborts the remaining rows
    /// but keeps earlier inserts; the report carries the first error.
    pub async fn import_rows(&self, rows: &[RawBudgetRow]) -> ImportReport {
        let mut report = ImportReport::new(rows.len());

        for row in rows {
            let Some(norm) = normalize_budget(row) else {
                report.skipped += 1;
                continue;
            };

            let input = CreateBudgetItemInput {
                id: None,
                acct5: norm.acct5,
                line: norm.line,
                description: norm.description,
                amount: norm.amount,
                datefrom: None,
                dateto: None,
            };
            match self.create(input).await {
                Ok(_) => report.imported += 1,
                Err(e) => {
                    warn!(error = %e, "Budget import aborted");
                    report.error = Some(e.to_string());
                    break;
                }
            }
        }

        report
    }
}

/// Computes the next two-digit line from the existing line numbers.
fn next_line_from(lines: &[String]) -> String {
    let max = lines
        .iter()
        .filter_map(|l| l.trim().parse::<i64>().ok())
        .max()
        .unwrap_or(0);
    format!("{:02}", max + 1)
}

#[cfg(test)]
mod tests {
    use super::next_line_from;

    #[test]
    fn test_next_line_empty_is_01() {
        assert_eq!(next_line_from(&[]), "01");
    }

    #[test]
    fn test_next_line_increments_max() {
        let lines = vec!["01".to_string(), "07".to_string(), "03".to_string()];
        assert_eq!(next_line_from(&lines), "08");
    }

    #[test]
    fn test_next_line_ignores_unparseable() {
        let lines = vec!["xx".to_string(), "04".to_string()];
        assert_eq!(next_line_from(&lines), "05");
    }
}
