//! Shared domain primitives.

pub mod line;

pub use line::{LineKey, pad2};
