//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod actuals;
pub mod budget;
pub mod export;
pub mod health;
pub mod import;
pub mod line_items;
pub mod managers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(managers::routes())
        .merge(accounts::routes())
        .merge(budget::routes())
        .merge(actuals::routes())
        .merge(line_items::routes())
        .merge(import::routes())
        .merge(export::routes())
}
