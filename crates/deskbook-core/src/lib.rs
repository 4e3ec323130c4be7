//! # deskbook-core
//!
//! Core crate for Deskbook. Contains configuration schemas, calendar-date
//! helpers shared by every layer, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Deskbook crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
