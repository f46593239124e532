//! Manager management routes.

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
use ledgerline_db::ManagerRepository;
use ledgerline_db::repositories::{CreateManagerInput, UpdateManagerInput};

/// Creates the managers router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/managers", get(list_managers).post(create_manager))
        .route(
            "/managers/{id}",
            axum::routing::put(update_manager).delete(delete_manager),
        )
}

/// Request body for creating a manager.
#[derive(Debug, Deserialize)]
pub struct CreateManagerRequest {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// Manager name.
    pub name: String,
    /// "on" to mark as the organization default.
    pub is_default: Option<String>,
    /// Privilege indicator.
    pub is_admin: Option<String>,
}

/// Request body for updating a manager. Absent fields keep their value.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateManagerRequest {
    /// New name.
    pub name: Option<String>,
    /// New default flag ("on" / "off").
    pub is_default: Option<String>,
    /// New privilege indicator.
    pub is_admin: Option<String>,
}

/// GET /managers - List all managers.
async fn list_managers(State(state): State<AppState>) -> Result<Response, ApiError> {
    let repo = ManagerRepository::new((*state.db).clone());
    let managers = repo.list().await?;

    Ok(Json(json!({ "managers": managers })).into_response())
}

/// POST /managers - Create a manager.
async fn create_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateManagerRequest>,
) -> Result<Response, ApiError> {
    let repo = ManagerRepository::new((*state.db).clone());

    let manager = repo
        .create(CreateManagerInput {
            id: payload.id,
            name: payload.name,
            is_default: payload.is_default,
            is_admin: payload.is_admin,
        })
        .await?;

    info!(manager_id = %manager.id, user = %auth.username(), "Manager created");

    Ok((StatusCode::CREATED, Json(manager)).into_response())
}

/// PUT `/managers/{id}` - Update a manager.
async fn update_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateManagerRequest>,
) -> Result<Response, ApiError> {
    let repo = ManagerRepository::new((*state.db).clone());

    let manager = repo
        .update(
            &id,
            UpdateManagerInput {
                name: payload.name,
                is_default: payload.is_default,
                is_admin: payload.is_admin,
            },
        )
        .await?;

    info!(manager_id = %id, user = %auth.username(), "Manager updated");

    Ok(Json(manager).into_response())
}

/// DELETE `/managers/{id}` - Delete a manager.
///
/// Accounts referring to the deleted manager keep their dangling
/// reference; reconciliation treats them as unassigned.
async fn delete_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let repo = ManagerRepository::new((*state.db).clone());
    repo.delete(&id).await?;

    info!(manager_id = %id, user = %auth.username(), "Manager deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}
