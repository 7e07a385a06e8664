//! # Storefront Errors
//!
//! The app-level error, wrapping the core and config errors.
//!
//! ## Where Errors Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  satchel-core            apps/storefront                                │
//! │  ─────────────           ───────────────                                │
//! │  CoreError ──────┐                                                      │
//! │  ValidationError ┼──►  AppError  ──►  exit code / rejected command log  │
//! │  ConfigError ────┘        ▲                                             │
//! │  io / serde_json ─────────┘                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The reducer itself never fails; every variant here comes from the edges
//! (catalog loading, shopper input, config, script I/O).

use thiserror::Error;

use satchel_core::{CoreError, ValidationError};

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    UnknownShippingMethod(String),
}

impl AppError {
    /// Short code for logs and the replay report.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Core(CoreError::ProductNotFound(_)) => "PRODUCT_NOT_FOUND",
            AppError::Core(CoreError::CollectionNotFound(_)) => "COLLECTION_NOT_FOUND",
            AppError::Core(CoreError::Validation(_)) | AppError::Validation(_) => {
                "VALIDATION_ERROR"
            }
            AppError::Core(_) => "CATALOG_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "INVALID_JSON",
            AppError::UnknownShippingMethod(_) => "UNKNOWN_SHIPPING_METHOD",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
