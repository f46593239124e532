//! Maps repository errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DbErr;
use serde_json::json;
use tracing::error;

use ledgerline_db::repositories::{AccountError, ActualItemError, BudgetItemError, ManagerError};
use ledgerline_shared::AppError;

/// Handler-level error. Wraps the shared [`AppError`] so repository
/// errors convert with `?` and render as `{"error","message"}` JSON.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        let body = json!({
            "error": self.0.error_code(),
            "message": self.0.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::NotFound(id) => Self(AppError::NotFound(format!("manager {id}"))),
            ManagerError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(id) => Self(AppError::NotFound(format!("account {id}"))),
            AccountError::DuplicateKey(key) => {
                Self(AppError::Conflict(format!("account key {key} exists")))
            }
            AccountError::AlreadyLinked { key, manager_id } => Self(AppError::Conflict(format!(
                "account {key} already linked to manager {manager_id}"
            ))),
            AccountError::LinkNotFound { key, manager_id } => Self(AppError::NotFound(format!(
                "link between account {key} and manager {manager_id}"
            ))),
            AccountError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<BudgetItemError> for ApiError {
    fn from(err: BudgetItemError) -> Self {
        match err {
            BudgetItemError::NotFound(id) => Self(AppError::NotFound(format!("budget item {id}"))),
            BudgetItemError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<ActualItemError> for ApiError {
    fn from(err: ActualItemError) -> Self {
        match err {
            ActualItemError::NotFound(id) => Self(AppError::NotFound(format!("actual item {id}"))),
            ActualItemError::Database(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}
