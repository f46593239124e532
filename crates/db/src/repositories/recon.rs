//! Reconciliation repository: feeds the stored collections into the
//! pure engine and exposes the filtered listing views.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use ledgerline_core::recon::{
    self, AccountRef, ActualRecord, BudgetRecord, LineItemFilter, LineItemRow,
};

use crate::entities::{accounts, actual_items, budget_items};

/// Read-only repository producing the joined and filtered views.
#[derive(Debug, Clone)]
pub struct ReconRepository {
    db: DatabaseConnection,
}

impl ReconRepository {
    /// Creates a new reconciliation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The joined budget-vs-actual view: one row per (acct5, line) key
    /// observed in either source, with variance, sorted by string key.
    pub async fn line_items(&self, filter: &LineItemFilter) -> Result<Vec<LineItemRow>, DbErr> {
        let budget: Vec<BudgetRecord> = budget_items::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|b| BudgetRecord {
                acct5: b.acct5,
                line: b.line,
                description: b.description,
                amount: b.amount,
            })
            .collect();

        let actuals: Vec<ActualRecord> = actual_items::Entity::find()
            .all(&self.db)
            .await?
            .into_iter()
            .map(|a| ActualRecord {
                acct5: a.acct5,
                line: a.line,
                description: a.description,
                amount: a.amount,
                vendor_name: a.vendor_name,
            })
            .collect();

        let accounts = self.account_refs().await?;

        Ok(recon::build_line_items(&budget, &actuals, &accounts, filter))
    }

    /// Budget-only listing: filtered budget rows in (acct5, line)
    /// string order.
    pub async fn budget_view(
        &self,
        filter: &LineItemFilter,
    ) -> Result<Vec<budget_items::Model>, DbErr> {
        let managers = recon::manager_map(&self.account_refs().await?);

        let rows = budget_items::Entity::find()
            .order_by_asc(budget_items::Column::Acct5)
            .order_by_asc(budget_items::Column::Line)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter(|b| filter.matches(&b.acct5, &b.description, &managers))
            .collect())
    }

    /// Actual-only listing: filtered actual rows in (acct5, line)
    /// string order, with an extra vendor-substring predicate.
    pub async fn actuals_view(
        &self,
        filter: &LineItemFilter,
        vendor: Option<&str>,
    ) -> Result<Vec<actual_items::Model>, DbErr> {
        let managers = recon::manager_map(&self.account_refs().await?);

        let rows = actual_items::Entity::find()
            .order_by_asc(actual_items::Column::Acct5)
            .order_by_asc(actual_items::Column::Line)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter(|a| filter.matches(&a.acct5, &a.description, &managers))
            .filter(|a| recon::vendor_matches(a.vendor_name.as_deref(), vendor))
            .collect())
    }

    /// Loads the account slice the engine needs for manager resolution.
    async fn account_refs(&self) -> Result<Vec<AccountRef>, DbErr> {
        let rows = accounts::Entity::find().all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|a| AccountRef {
                key: a.key,
                manager_id: a.manager_id,
            })
            .collect())
    }
}
