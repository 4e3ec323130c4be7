//! Custom Axum extractors.

pub mod identity;

pub use identity::{AdminUser, AuthUser};
