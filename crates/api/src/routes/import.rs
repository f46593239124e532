//! CSV and bulk JSON import routes.
//!
//! CSV uploads arrive as multipart files and create one row per
//! record. Bulk JSON endpoints take raw GL-source rows and run the
//! best-effort batch imports, returning the [`ImportReport`].

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;
use ledgerline_core::import::{ImportReport, RawActualRow, RawBudgetRow, RawGlRow};
use ledgerline_db::repositories::{
    AccountError, CreateAccountInput, CreateActualItemInput, CreateBudgetItemInput,
    CreateManagerInput,
};
use ledgerline_db::{
    AccountRepository, ActualItemRepository, BudgetItemRepository, ManagerRepository,
};
use ledgerline_shared::{AppError, pad2};

/// Creates the import router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/import/{kind}", post(import_csv))
        .route("/import/bulk/actuals", post(bulk_import_actuals))
        .route("/import/bulk/budget", post(bulk_import_budget))
        .route("/import/bulk/accounts", post(bulk_import_accounts))
}

/// A manager row in an uploaded CSV file.
#[derive(Debug, Deserialize)]
struct CsvManagerRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    is_default: Option<String>,
    #[serde(default)]
    is_admin: Option<String>,
}

/// An account row in an uploaded CSV file.
#[derive(Debug, Deserialize)]
struct CsvAccountRow {
    #[serde(default)]
    key: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    manager_id: Option<String>,
}

/// A budget item row in an uploaded CSV file.
#[derive(Debug, Deserialize)]
struct CsvBudgetRow {
    #[serde(default)]
    acct5: String,
    #[serde(default)]
    line: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    datefrom: Option<String>,
    #[serde(default)]
    dateto: Option<String>,
}

/// An actual item row in an uploaded CSV file.
#[derive(Debug, Deserialize)]
struct CsvActualRow {
    #[serde(default)]
    acct5: String,
    #[serde(default)]
    line: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    seq: Option<f64>,
    #[serde(default)]
    tr_date: Option<String>,
    #[serde(default)]
    vendor_name: Option<String>,
    #[serde(default)]
    vouchno: Option<String>,
}

/// Reads the first file field of a multipart upload.
async fn read_upload(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(AppError::Validation(format!("malformed upload: {e}"))))?
    {
        if field.file_name().is_some() || field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError(AppError::Validation(format!("malformed upload: {e}"))))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(ApiError(AppError::Validation(
        "missing file field in upload".to_string(),
    )))
}

/// Deserializes every CSV record into a row vector, failing on the
/// first malformed record.
fn parse_csv<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<Vec<T>, ApiError> {
    let mut reader = csv::Reader::from_reader(data);
    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| ApiError(AppError::Validation(format!("invalid CSV: {e}"))))
}

/// POST `/import/{kind}` - CSV upload for managers | accounts | budget | actuals.
///
/// Creates one item per record. Already committed rows stay committed
/// if a later row fails.
async fn import_csv(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let data = read_upload(&mut multipart).await?;

    let report = match kind.as_str() {
        "managers" => import_managers_csv(&state, &data).await?,
        "accounts" => import_accounts_csv(&state, &data).await?,
        "budget" => import_budget_csv(&state, &data).await?,
        "actuals" => import_actuals_csv(&state, &data).await?,
        other => {
            return Err(ApiError(AppError::Validation(format!(
                "unknown import kind: {other}"
            ))));
        }
    };

    info!(
        kind = %kind,
        total = report.total,
        imported = report.imported,
        skipped = report.skipped,
        user = %auth.username(),
        "CSV import finished"
    );

    Ok(Json(report).into_response())
}

async fn import_managers_csv(state: &AppState, data: &[u8]) -> Result<ImportReport, ApiError> {
    let rows: Vec<CsvManagerRow> = parse_csv(data)?;
    let repo = ManagerRepository::new((*state.db).clone());
    let mut report = ImportReport::new(rows.len());

    for row in rows {
        if row.name.trim().is_empty() {
            report.skipped += 1;
            continue;
        }
        repo.create(CreateManagerInput {
            id: None,
            name: row.name,
            is_default: row.is_default,
            is_admin: row.is_admin,
        })
        .await?;
        report.imported += 1;
    }
    Ok(report)
}

async fn import_accounts_csv(state: &AppState, data: &[u8]) -> Result<ImportReport, ApiError> {
    let rows: Vec<CsvAccountRow> = parse_csv(data)?;
    let repo = AccountRepository::new((*state.db).clone());
    let mut report = ImportReport::new(rows.len());

    for row in rows {
        if row.key.trim().is_empty() {
            report.skipped += 1;
            continue;
        }
        match repo
            .create(CreateAccountInput {
                id: None,
                key: row.key,
                description: row.description,
                manager_id: row.manager_id.filter(|m| !m.is_empty()),
            })
            .await
        {
            Ok(_) => report.imported += 1,
            // Re-uploads of the same listing skip known keys.
            Err(AccountError::DuplicateKey(_)) => report.skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(report)
}

async fn import_budget_csv(state: &AppState, data: &[u8]) -> Result<ImportReport, ApiError> {
    let rows: Vec<CsvBudgetRow> = parse_csv(data)?;
    let repo = BudgetItemRepository::new((*state.db).clone());
    let mut report = ImportReport::new(rows.len());

    for row in rows {
        if row.acct5.trim().is_empty() {
            report.skipped += 1;
            continue;
        }
        repo.create(CreateBudgetItemInput {
            id: None,
            acct5: row.acct5,
            line: pad2(&row.line),
            description: row.description,
            amount: row.amount,
            datefrom: row.datefrom.filter(|d| !d.is_empty()),
            dateto: row.dateto.filter(|d| !d.is_empty()),
        })
        .await?;
        report.imported += 1;
    }
    Ok(report)
}

async fn import_actuals_csv(state: &AppState, data: &[u8]) -> Result<ImportReport, ApiError> {
    let rows: Vec<CsvActualRow> = parse_csv(data)?;
    let repo = ActualItemRepository::new((*state.db).clone());
    let mut report = ImportReport::new(rows.len());

    for row in rows {
        if row.acct5.trim().is_empty() {
            report.skipped += 1;
            continue;
        }
        repo.create(CreateActualItemInput {
            id: None,
            acct5: row.acct5,
            line: pad2(&row.line),
            description: row.description,
            amount: row.amount,
            seq: row.seq,
            tr_date: row.tr_date.filter(|d| !d.is_empty()),
            vendor_name: row.vendor_name.filter(|v| !v.is_empty()),
            vouchno: row.vouchno.filter(|v| !v.is_empty()),
        })
        .await?;
        report.imported += 1;
    }
    Ok(report)
}

/// POST /import/bulk/actuals - Batch import of raw GL transaction rows.
///
/// Normalizes each row, skips duplicates within the batch and against
/// stored items, and reports how far the batch got.
async fn bulk_import_actuals(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(rows): Json<Vec<RawActualRow>>,
) -> Result<Response, ApiError> {
    let repo = ActualItemRepository::new((*state.db).clone());
    let report = repo.import_rows(&rows).await;

    info!(
        total = report.total,
        imported = report.imported,
        skipped = report.skipped,
        user = %auth.username(),
        "Bulk actuals import finished"
    );

    Ok(Json(report).into_response())
}

/// POST /import/bulk/budget - Batch import of raw budget rows.
///
/// Placeholder account numbers and blank rows are skipped; imported
/// rows land on the bulk-import line "00".
async fn bulk_import_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(rows): Json<Vec<RawBudgetRow>>,
) -> Result<Response, ApiError> {
    let repo = BudgetItemRepository::new((*state.db).clone());
    let report = repo.import_rows(&rows).await;

    info!(
        total = report.total,
        imported = report.imported,
        skipped = report.skipped,
        user = %auth.username(),
        "Bulk budget import finished"
    );

    Ok(Json(report).into_response())
}

/// POST /import/bulk/accounts - Batch import of a raw GL account listing.
///
/// New keys become accounts assigned to the default manager; known
/// keys are skipped.
async fn bulk_import_accounts(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(rows): Json<Vec<RawGlRow>>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let report = repo.import_gl_rows(&rows).await;

    info!(
        total = report.total,
        imported = report.imported,
        skipped = report.skipped,
        user = %auth.username(),
        "Bulk account import finished"
    );

    Ok(Json(report).into_response())
}
