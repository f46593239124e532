//! Account management routes, including manager associations.

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
use ledgerline_db::AccountRepository;
use ledgerline_db::repositories::{CreateAccountInput, UpdateAccountInput};

/// Creates the accounts router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{id}",
            axum::routing::put(update_account).delete(delete_account),
        )
        .route(
            "/accounts/{key}/managers",
            get(list_account_managers).post(link_manager),
        )
        .route(
            "/accounts/{key}/managers/{manager_id}",
            axum::routing::delete(unlink_manager),
        )
}

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// Explicit id; generated when absent.
    pub id: Option<String>,
    /// Unique GL account key.
    pub key: String,
    /// Account description.
    pub description: String,
    /// Primary manager reference.
    pub manager_id: Option<String>,
}

/// Request body for updating an account. Absent fields keep their
/// value; an empty `manager_id` clears the reference.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateAccountRequest {
    /// New key.
    pub key: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New manager reference; empty string clears it.
    pub manager_id: Option<String>,
}

/// Request body for linking a manager to an account.
#[derive(Debug, Deserialize)]
pub struct LinkManagerRequest {
    /// Manager id to associate.
    pub manager_id: String,
}

/// Maps a form-style optional field onto the repository's
/// clear-vs-keep update semantics.
fn clearable(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v.is_empty() { None } else { Some(v) })
}

/// GET /accounts - List all accounts.
async fn list_accounts(State(state): State<AppState>) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let accounts = repo.list().await?;

    Ok(Json(json!({ "accounts": accounts })).into_response())
}

/// POST /accounts - Create an account.
async fn create_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account = repo
        .create(CreateAccountInput {
            id: payload.id,
            key: payload.key,
            description: payload.description,
            manager_id: payload.manager_id.filter(|m| !m.is_empty()),
        })
        .await?;

    info!(account_id = %account.id, key = %account.key, user = %auth.username(), "Account created");

    Ok((StatusCode::CREATED, Json(account)).into_response())
}

/// PUT `/accounts/{id}` - Update an account.
async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());

    let account = repo
        .update(
            &id,
            UpdateAccountInput {
                key: payload.key,
                description: payload.description,
                manager_id: clearable(payload.manager_id),
            },
        )
        .await?;

    info!(account_id = %id, user = %auth.username(), "Account updated");

    Ok(Json(account).into_response())
}

/// DELETE `/accounts/{id}` - Delete an account.
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    repo.delete(&id).await?;

    info!(account_id = %id, user = %auth.username(), "Account deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// GET `/accounts/{key}/managers` - List associations for an account key.
async fn list_account_managers(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let links = repo.links_for_key(&key).await?;

    Ok(Json(json!({ "managers": links })).into_response())
}

/// POST `/accounts/{key}/managers` - Associate a manager with an account key.
async fn link_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(key): Path<String>,
    Json(payload): Json<LinkManagerRequest>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let link = repo.link(&key, &payload.manager_id).await?;

    info!(key = %key, manager_id = %payload.manager_id, user = %auth.username(), "Manager linked");

    Ok((StatusCode::CREATED, Json(link)).into_response())
}

/// DELETE `/accounts/{key}/managers/{manager_id}` - Remove an association.
async fn unlink_manager(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((key, manager_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    repo.unlink(&key, &manager_id).await?;

    info!(key = %key, manager_id = %manager_id, user = %auth.username(), "Manager unlinked");

    Ok(StatusCode::NO_CONTENT.into_response())
}
