//! Budget item routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::AppState;
use ledgerline_db::BudgetItemRepository;
use ledgerline_db::repositories::{CreateBudgetItemInput, UpdateBudgetItemInput};
use ledgerline_shared::pad2;

/// Creates the budget item router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget", get(list_budget_items).post(create_budget_item))
        .route(
            "/budget/{id}",
            axum::routing::put(update_budget_item).delete(delete_budget_item),
        )
}

/// Request body for creating a budget item.
#[derive(Debug, Deserialize)]
pub struct CreateBudgetItemRequest {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// GL account key.
    pub acct5: String,
    /// Line number; normalized to two digits.
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

/// Request body for updating a budget item. Absent fields keep their
/// value; empty date strings clear the bound.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateBudgetItemRequest {
    /// New account key.
    pub acct5: Option<String>,
    /// New line number; normalized to two digits.
    pub line: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<f64>,
    /// New lower bound; empty string clears it.
    pub datefrom: Option<String>,
    /// New upper bound; empty string clears it.
    pub dateto: Option<String>,
}

fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.is_empty() { None } else { Some(v) })
}

/// GET /budget - List all budget items in (acct5, line) order.
async fn list_budget_items(State(state): State<AppState>) -> Result<Response, ApiError> {
    let repo = BudgetItemRepository::new((*state.db).clone());
    let items = repo.list().await?;

    Ok(Json(json!({ "budget_items": items })).into_response())
}

/// POST /budget - Create a budget item.
async fn create_budget_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateBudgetItemRequest>,
) -> Result<Response, ApiError> {
    let repo = BudgetItemRepository::new((*state.db).clone());

    let item = repo
        .create(CreateBudgetItemInput {
            id: payload.id,
            acct5: payload.acct5,
            line: pad2(&payload.line),
            description: payload.description,
            amount: payload.amount,
            datefrom: payload.datefrom.filter(|d| !d.is_empty()),
            dateto: payload.dateto.filter(|d| !d.is_empty()),
        })
        .await?;

    info!(item_id = %item.id, acct5 = %item.acct5, line = %item.line, user = %auth.username(), "Budget item created");

    Ok((StatusCode::CREATED, Json(item)).into_response())
}

/// PUT `/budget/{id}` - Update a budget item.
async fn update_budget_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBudgetItemRequest>,
) -> Result<Response, ApiError> {
    let repo = BudgetItemRepository::new((*state.db).clone());

    let item = repo
        .update(
            &id,
            UpdateBudgetItemInput {
                acct5: payload.acct5,
                line: payload.line.map(|l| pad2(&l)),
                description: payload.description,
                amount: payload.amount,
                datefrom: clearable(payload.datefrom),
                dateto: clearable(payload.dateto),
            },
        )
        .await?;

    info!(item_id = %id, user = %auth.username(), "Budget item updated");

    Ok(Json(item).into_response())
}

/// DELETE `/budget/{id}` - Delete a budget item.
async fn delete_budget_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let repo = BudgetItemRepository::new((*state.db).clone());
    repo.delete(&id).await?;

    info!(item_id = %id, user = %auth.username(), "Budget item deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
