//! Request middleware.

pub mod context;

pub use context::AuthUser;
