//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling and its HTTP mapping
//! - The JSON response envelope
//! - Configuration structures

pub mod config;
pub mod error;
pub mod response;

pub use config::*;
pub use error::{
    error_details_exposed, expose_error_details, AppError, AppResult, OptionExt, StorageError,
};
pub use response::ApiResponse;
