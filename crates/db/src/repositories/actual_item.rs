//! Actual-item repository: CRUD with sequence assignment, duplicate
//! detection, and the bulk transaction import.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::warn;
use uuid::Uuid;

use ledgerline_core::import::{
    ActualFingerprint, ImportReport, RawActualRow, normalize_actual,
};

use crate::entities::actual_items;

/// Error types for actual-item operations.
#[derive(Debug, thiserror::Error)]
pub enum ActualItemError {
    /// Actual item not found.
    #[error("Actual item not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an actual item.
#[derive(Debug, Clone)]
pub struct CreateActualItemInput {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// GL account key.
    pub acct5: String,
    /// Two-digit line number.
    pub line: String,
    /// Description.
    pub description: String,
    /// Posted amount.
    pub amount: f64,
    /// Sequence number; auto-assigned (max + 5, or 1.0) when absent.
    pub seq: Option<f64>,
    /// Transaction date.
    pub tr_date: Option<String>,
    /// Vendor name.
    pub vendor_name: Option<String>,
    /// Voucher number.
    pub vouchno: Option<String>,
}

/// Input for updating an actual item. Absent fields are left
/// unchanged; in particular an absent `seq` keeps the stored sequence.
#[derive(Debug, Clone, Default)]
pub struct UpdateActualItemInput {
    /// New account key.
    pub acct5: Option<String>,
    /// New line number.
    pub line: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<f64>,
    /// New sequence number.
    pub seq: Option<f64>,
    /// New transaction date (`Some(None)` clears it).
    pub tr_date: Option<Option<String>>,
    /// New vendor name (`Some(None)` clears it).
    pub vendor_name: Option<Option<String>>,
    /// New voucher number (`Some(None)` clears it).
    pub vouchno: Option<Option<String>>,
}

/// Actual-item repository.
#[derive(Debug, Clone)]
pub struct ActualItemRepository {
    db: DatabaseConnection,
}

impl ActualItemRepository {
    /// Creates a new actual-item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all actual items ordered by (acct5, line).
    pub async fn list(&self) -> Result<Vec<actual_items::Model>, ActualItemError> {
        let rows = actual_items::Entity::find()
            .order_by_asc(actual_items::Column::Acct5)
            .order_by_asc(actual_items::Column::Line)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Gets an actual item by id.
    pub async fn get(&self, id: &str) -> Result<actual_items::Model, ActualItemError> {
        actual_items::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ActualItemError::NotFound(id.to_string()))
    }

    /// Creates an actual item.
    ///
    /// When no sequence number is supplied it is assigned as the table
    /// maximum plus 5, or 1.0 for an empty table. The increment leaves
    /// gaps for manual re-sequencing between entries.
    pub async fn create(
        &self,
        input: CreateActualItemInput,
    ) -> Result<actual_items::Model, ActualItemError> {
        let seq = match input.seq {
            Some(seq) => seq,
            None => self.next_seq().await?,
        };

        let active = actual_items::ActiveModel {
            id: Set(input.id.unwrap_or_else(|| Uuid::new_v4().to_string())),
            acct5: Set(input.acct5),
            line: Set(input.line),
            tr_date: Set(input.tr_date),
            description: Set(input.description),
            amount: Set(input.amount),
            seq: Set(Some(seq)),
            vendor_name: Set(input.vendor_name),
            vouchno: Set(input.vouchno),
        };
        let created = active.insert(&self.db).await?;
        Ok(created)
    }

    /// Updates an actual item.
    pub async fn update(
        &self,
        id: &str,
        input: UpdateActualItemInput,
    ) -> Result<actual_items::Model, ActualItemError> {
        let existing = self.get(id).await?;

        let mut active: actual_items::ActiveModel = existing.into();
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
        if let Some(seq) = input.seq {
            active.seq = Set(Some(seq));
        }
        if let Some(tr_date) = input.tr_date {
            active.tr_date = Set(tr_date);
        }
        if let Some(vendor_name) = input.vendor_name {
            active.vendor_name = Set(vendor_name);
        }
        if let Some(vouchno) = input.vouchno {
            active.vouchno = Set(vouchno);
        }
        let updated = active.update(&self.db).await?;
        Ok(updated)
    }

    /// Deletes an actual item.
    pub async fn delete(&self, id: &str) -> Result<(), ActualItemError> {
        let existing = self.get(id).await?;
        let active: actual_items::ActiveModel = existing.into();
        active.delete(&self.db).await?;
        Ok(())
    }

    /// Deletes all actual items.
    pub async fn delete_all(&self) -> Result<u64, ActualItemError> {
        let result = actual_items::Entity::delete_many().exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    /// Next available line number for an account: integer-cast max
    /// existing line plus one, zero-padded to two digits.
    pub async fn next_line(&self, acct5: &str) -> Result<String, ActualItemError> {
        let lines: Vec<String> = actual_items::Entity::find()
            .filter(actual_items::Column::Acct5.eq(acct5))
            .select_only()
            .column(actual_items::Column::Line)
            .into_tuple()
            .all(&self.db)
            .await?;

        let max = lines
            .iter()
            .filter_map(|l| l.trim().parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        Ok(format!("{:02}", max + 1))
    }

    /// True when an item matching the fingerprint already exists,
    /// regardless of its line number.
    pub async fn exists_duplicate(
        &self,
        fingerprint: &ActualFingerprint,
    ) -> Result<bool, ActualItemError> {
        let candidates = actual_items::Entity::find()
            .filter(actual_items::Column::Acct5.eq(fingerprint.acct5.clone()))
            .all(&self.db)
            .await?;

        Ok(candidates
            .iter()
            .any(|m| fingerprint.matches(&model_fingerprint(m))))
    }

    /// Imports raw actual rows from the GL source, best effort.
    ///
    /// Rows failing normalization (blank key/line/description, zero
    /// amount) and rows already present per the duplicate predicate are
    /// skipped. A database failure aborts the remaining rows but keeps
    /// earlier inserts; the report carries the first error.
    pub async fn import_rows(&self, rows: &[RawActualRow]) -> ImportReport {
        let mut report = ImportReport::new(rows.len());

        let mut seen: Vec<ActualFingerprint> = match self.list().await {
            Ok(existing) => existing.iter().map(model_fingerprint).collect(),
            Err(e) => {
                report.error = Some(e.to_string());
                return report;
            }
        };

        for row in rows {
            let Some(norm) = normalize_actual(row) else {
                report.skipped += 1;
                continue;
            };

            let fingerprint = norm.fingerprint();
            if seen.iter().any(|f| f.matches(&fingerprint)) {
                report.skipped += 1;
                continue;
            }

            let input = CreateActualItemInput {
                id: None,
                acct5: norm.acct5,
                line: norm.line,
                description: norm.description,
                amount: norm.amount,
                seq: norm.seq,
                tr_date: norm.tr_date,
                vendor_name: norm.vendor_name,
                vouchno: norm.vouchno,
            };
            match self.create(input).await {
                Ok(_) => {
                    seen.push(fingerprint);
                    report.imported += 1;
                }
                Err(e) => {
                    warn!(error = %e, "Actuals import aborted");
                    report.error = Some(e.to_string());
                    break;
                }
            }
        }

        report
    }

    /// Computes the next auto-assigned sequence number across the
    /// whole table.
    async fn next_seq(&self) -> Result<f64, ActualItemError> {
        let seqs: Vec<Option<f64>> = actual_items::Entity::find()
            .select_only()
            .column(actual_items::Column::Seq)
            .into_tuple()
            .all(&self.db)
            .await?;

        let max = seqs.into_iter().flatten().fold(None, |acc: Option<f64>, s| {
            Some(acc.map_or(s, |m| m.max(s)))
        });
        Ok(max.map_or(1.0, |m| m + 5.0))
    }
}

/// Projects a stored row onto the duplicate-detection fingerprint.
fn model_fingerprint(model: &actual_items::Model) -> ActualFingerprint {
    ActualFingerprint {
        acct5: model.acct5.clone(),
        description: model.description.clone(),
        amount: model.amount,
        tr_date: model.tr_date.clone(),
        vendor_name: model.vendor_name.clone(),
    }
}
