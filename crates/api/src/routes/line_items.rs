//! Reconciliation and listing views, plus next-line lookups.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::AppState;
use ledgerline_core::recon::LineItemFilter;
use ledgerline_db::{ActualItemRepository, BudgetItemRepository, ReconRepository};
use ledgerline_shared::AppError;

/// Creates the view router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/line-items", get(line_items))
        .route("/budget-view", get(budget_view))
        .route("/actuals-view", get(actuals_view))
        .route("/next-line/{kind}/{acct5}", get(next_line))
}

/// Query parameters shared by the three views.
#[derive(Debug, Deserialize, Default)]
pub struct ViewQuery {
    /// Exact account key match.
    pub acct5: Option<String>,
    /// Case-insensitive description substring.
    pub description: Option<String>,
    /// Accounts assigned to this manager.
    pub manager_id: Option<String>,
    /// Case-insensitive vendor substring (actuals view only).
    pub vendor: Option<String>,
}

impl ViewQuery {
    fn filter(&self) -> LineItemFilter {
        LineItemFilter {
            acct5: self.acct5.clone().filter(|s| !s.is_empty()),
            description: self.description.clone().filter(|s| !s.is_empty()),
            manager_id: self.manager_id.clone().filter(|s| !s.is_empty()),
        }
    }
}

/// GET /line-items - Budget-vs-actual reconciliation.
///
/// One row per (acct5, line) key seen in either source, with the
/// budget total, accumulated actuals and variance, sorted by key.
async fn line_items(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
    let repo = ReconRepository::new((*state.db).clone());
    let rows = repo.line_items(&query.filter()).await?;

    Ok(Json(json!({ "line_items": rows })).into_response())
}

/// GET /budget-view - Filtered budget rows only.
async fn budget_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
    let repo = ReconRepository::new((*state.db).clone());
    let rows = repo.budget_view(&query.filter()).await?;

    Ok(Json(json!({ "budget_items": rows })).into_response())
}

/// GET /actuals-view - Filtered actual rows only.
async fn actuals_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Response, ApiError> {
    let repo = ReconRepository::new((*state.db).clone());
    let vendor = query.vendor.as_deref().filter(|v| !v.is_empty());
    let rows = repo.actuals_view(&query.filter(), vendor).await?;

    Ok(Json(json!({ "actual_items": rows })).into_response())
}

/// GET `/next-line/{kind}/{acct5}` - Next free two-digit line number
/// for an account, per item kind (`budget` or `actuals`).
async fn next_line(
    State(state): State<AppState>,
    Path((kind, acct5)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let line = match kind.as_str() {
        "budget" => {
            BudgetItemRepository::new((*state.db).clone())
                .next_line(&acct5)
                .await?
        }
        "actuals" => {
            ActualItemRepository::new((*state.db).clone())
                .next_line(&acct5)
                .await?
        }
        other => {
            return Err(ApiError(AppError::Validation(format!(
                "unknown item kind: {other}"
            ))));
        }
    };

    Ok(Json(json!({ "next_line": line })).into_response())
}
