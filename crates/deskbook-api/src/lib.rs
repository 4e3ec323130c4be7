//! # deskbook-api
//!
//! HTTP API layer for Deskbook built on Axum.
//!
//! Provides the REST endpoints, the identity extractors that read the
//! headers set by the upstream authenticating proxy, DTOs, CORS, and the
//! mapping from [`deskbook_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use state::AppState;
