//! Shared types, errors, and configuration for Ledgerline.
//!
//! This crate provides common types used across all other crates:
//! - Line-key helpers for (account, line) ordering
//! - Request-scoped auth context decoded from cookies
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::AuthContext;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{LineKey, pad2};
