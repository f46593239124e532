//! Actual item routes.

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
use ledgerline_db::ActualItemRepository;
use ledgerline_db::repositories::{CreateActualItemInput, UpdateActualItemInput};
use ledgerline_shared::pad2;

/// Creates the actual item router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/actuals", get(list_actual_items).post(create_actual_item))
        .route(
            "/actuals/{id}",
            axum::routing::put(update_actual_item).delete(delete_actual_item),
        )
}

/// Request body for creating an actual item.
#[derive(Debug, Deserialize)]
pub struct CreateActualItemRequest {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// GL account key.
    pub acct5: String,
    /// Line number; normalized to two digits.
    pub line: String,
    /// Description.
    pub description: String,
    /// Posted amount.
    pub amount: f64,
    /// Sequence number; auto-assigned when absent.
    pub seq: Option<f64>,
    /// Transaction date.
    pub tr_date: Option<String>,
    /// Vendor name.
    pub vendor_name: Option<String>,
    /// Voucher number.
    pub vouchno: Option<String>,
}

/// Request body for updating an actual item. Absent fields keep their
/// value; empty strings clear the optional text fields.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateActualItemRequest {
    /// New account key.
    pub acct5: Option<String>,
    /// New line number; normalized to two digits.
    pub line: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New amount.
    pub amount: Option<f64>,
    /// New sequence number.
    pub seq: Option<f64>,
    /// New transaction date; empty string clears it.
    pub tr_date: Option<String>,
    /// New vendor name; empty string clears it.
    pub vendor_name: Option<String>,
    /// New voucher number; empty string clears it.
    pub vouchno: Option<String>,
}

fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.is_empty() { None } else { Some(v) })
}

/// GET /actuals - List all actual items in (acct5, line) order.
async fn list_actual_items(State(state): State<AppState>) -> Result<Response, ApiError> {
    let repo = ActualItemRepository::new((*state.db).clone());
    let items = repo.list().await?;

    Ok(Json(json!({ "actual_items": items })).into_response())
}

/// POST /actuals - Create an actual item.
///
/// When no sequence number is supplied the repository assigns the next
/// one (highest existing plus five, or 1.0 on an empty table).
async fn create_actual_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateActualItemRequest>,
) -> Result<Response, ApiError> {
    let repo = ActualItemRepository::new((*state.db).clone());

    let item = repo
        .create(CreateActualItemInput {
            id: payload.id,
            acct5: payload.acct5,
            line: pad2(&payload.line),
            description: payload.description,
            amount: payload.amount,
            seq: payload.seq,
            tr_date: payload.tr_date.filter(|d| !d.is_empty()),
            vendor_name: payload.vendor_name.filter(|v| !v.is_empty()),
            vouchno: payload.vouchno.filter(|v| !v.is_empty()),
        })
        .await?;

    info!(item_id = %item.id, acct5 = %item.acct5, line = %item.line, user = %auth.username(), "Actual item created");

    Ok((StatusCode::CREATED, Json(item)).into_response())
}

/// PUT `/actuals/{id}` - Update an actual item.
async fn update_actual_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateActualItemRequest>,
) -> Result<Response, ApiError> {
    let repo = ActualItemRepository::new((*state.db).clone());

    let item = repo
        .update(
            &id,
            UpdateActualItemInput {
                acct5: payload.acct5,
                line: payload.line.map(|l| pad2(&l)),
                description: payload.description,
                amount: payload.amount,
                seq: payload.seq,
                tr_date: clearable(payload.tr_date),
                vendor_name: clearable(payload.vendor_name),
                vouchno: clearable(payload.vouchno),
            },
        )
        .await?;

    info!(item_id = %id, user = %auth.username(), "Actual item updated");

    Ok(Json(item).into_response())
}

/// DELETE `/actuals/{id}` - Delete an actual item.
async fn delete_actual_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let repo = ActualItemRepository::new((*state.db).clone());
    repo.delete(&id).await?;

    info!(item_id = %id, user = %auth.username(), "Actual item deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
