//! Spreadsheet export routes.
//!
//! Downloads default to XLSX; `?format=csv` selects plain CSV with
//! the same columns. Amounts are rendered to cents in both formats.

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;
use ledgerline_db::{
    AccountRepository, ActualItemRepository, BudgetItemRepository, ManagerRepository,
};
use ledgerline_shared::AppError;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Creates the export router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/export/{kind}", get(export_table))
}

/// Query parameters for an export download.
#[derive(Debug, Deserialize, Default)]
pub struct ExportQuery {
    /// Output format: `xlsx` (default) or `csv`.
    pub format: Option<String>,
}

/// One exportable table: header row plus stringly-rendered data rows.
struct ExportTable {
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

/// GET `/export/{kind}` - Download managers | accounts | budget | actuals.
async fn export_table(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let table = load_table(&state, &kind).await?;

    let (data, content_type, filename) = match query.format.as_deref().unwrap_or("xlsx") {
        "xlsx" => (to_xlsx(&table)?, XLSX_CONTENT_TYPE, format!("{kind}.xlsx")),
        "csv" => (to_csv(&table)?, "text/csv", format!("{kind}.csv")),
        other => {
            return Err(ApiError(AppError::Validation(format!(
                "unknown export format: {other}"
            ))));
        }
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        data,
    )
        .into_response())
}

/// Loads and renders the rows for one export kind.
async fn load_table(state: &AppState, kind: &str) -> Result<ExportTable, ApiError> {
    let table = match kind {
        "managers" => {
            let rows = ManagerRepository::new((*state.db).clone()).list().await?;
            ExportTable {
                headers: &["id", "name", "is_default", "is_admin"],
                rows: rows
                    .into_iter()
                    .map(|m| vec![m.id, m.name, m.is_default, m.is_admin])
                    .collect(),
            }
        }
        "accounts" => {
            let rows = AccountRepository::new((*state.db).clone()).list().await?;
            ExportTable {
                headers: &["id", "GL", "description", "manager_id"],
                rows: rows
                    .into_iter()
                    .map(|a| {
                        vec![
                            a.id,
                            a.key,
                            a.description,
                            a.manager_id.unwrap_or_default(),
                        ]
                    })
                    .collect(),
            }
        }
        "budget" => {
            let rows = BudgetItemRepository::new((*state.db).clone())
                .list()
                .await?;
            ExportTable {
                headers: &["id", "GL", "line", "description", "amount"],
                rows: rows
                    .into_iter()
                    .map(|b| {
                        vec![
                            b.id,
                            b.acct5,
                            b.line,
                            b.description,
                            format!("{:.2}", b.amount),
                        ]
                    })
                    .collect(),
            }
        }
        "actuals" => {
            let rows = ActualItemRepository::new((*state.db).clone())
                .list()
                .await?;
            ExportTable {
                headers: &["id", "GL", "line", "description", "amount"],
                rows: rows
                    .into_iter()
                    .map(|a| {
                        vec![
                            a.id,
                            a.acct5,
                            a.line,
                            a.description,
                            format!("{:.2}", a.amount),
                        ]
                    })
                    .collect(),
            }
        }
        other => {
            return Err(ApiError(AppError::Validation(format!(
                "unknown export kind: {other}"
            ))));
        }
    };
    Ok(table)
}

/// Renders the table as a single-sheet XLSX workbook.
fn to_xlsx(table: &ExportTable) -> Result<Vec<u8>, ApiError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in table.headers.iter().enumerate() {
        worksheet
            .write_string(0, col_index(col)?, *name)
            .map_err(xlsx_error)?;
    }
    for (row, cells) in table.rows.iter().enumerate() {
        let row = u32::try_from(row + 1)
            .map_err(|_| ApiError(AppError::Internal("export too large".to_string())))?;
        for (col, cell) in cells.iter().enumerate() {
            worksheet
                .write_string(row, col_index(col)?, cell)
                .map_err(xlsx_error)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}

/// Renders the table as CSV.
fn to_csv(table: &ExportTable) -> Result<Vec<u8>, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.headers).map_err(csv_error)?;
    for row in &table.rows {
        writer.write_record(row).map_err(csv_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| ApiError(AppError::Internal(format!("CSV buffer error: {e}"))))
}

fn col_index(col: usize) -> Result<u16, ApiError> {
    u16::try_from(col).map_err(|_| ApiError(AppError::Internal("export too wide".to_string())))
}

fn csv_error(err: csv::Error) -> ApiError {
    ApiError(AppError::Internal(format!("CSV write error: {err}")))
}

fn xlsx_error(err: rust_xlsxwriter::XlsxError) -> ApiError {
    ApiError(AppError::Internal(format!("XLSX write error: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget_table() -> ExportTable {
        ExportTable {
            headers: &["id", "GL", "line", "description", "amount"],
            rows: vec![vec![
                "b-1".to_string(),
                "100-01".to_string(),
                "05".to_string(),
                "travel".to_string(),
                format!("{:.2}", 1234.5),
            ]],
        }
    }

    #[test]
    fn test_csv_headers_and_amount_format() {
        let data = to_csv(&budget_table()).expect("csv");
        let text = String::from_utf8(data).expect("utf8");

        assert_eq!(
            text,
            "id,GL,line,description,amount\nb-1,100-01,05,travel,1234.50\n"
        );
    }

    #[test]
    fn test_csv_rounds_to_cents() {
        let table = ExportTable {
            headers: &["id", "GL", "line", "description", "amount"],
            rows: vec![vec![
                "a-1".to_string(),
                "200-01".to_string(),
                "00".to_string(),
                "paper".to_string(),
                format!("{:.2}", 9.999),
            ]],
        };

        let data = to_csv(&table).expect("csv");
        assert!(String::from_utf8(data).expect("utf8").contains("10.00"));
    }

    #[test]
    fn test_xlsx_is_a_zip_workbook() {
        let data = to_xlsx(&budget_table()).expect("xlsx");

        // XLSX is a zip container: PK local-file-header magic.
        assert_eq!(&data[..4], b"PK\x03\x04");
    }
}
