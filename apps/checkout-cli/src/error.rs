//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  input line ──► Command::from_str ── bad syntax ──────────┐            │
//! │                      │                                    │            │
//! │                      ▼                                    ▼            │
//! │                 commands::execute                                      │
//! │                      │                                                  │
//! │   ValidationError ───┤ (sort field, quantity)  ──────► ApiError ──►    │
//! │   EngineError ───────┤ (catalog, quota, storage) ───►  "[CODE] msg"    │
//! │   ConfigError ───────┘ (startup only)                                  │
//! │                                                                         │
//! │  The shell prints the error and reads the next line.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Codes serialize as `SCREAMING_SNAKE_CASE`, and the printed `[CODE]`
//! prefix uses the same form:
//! ```json
//! { "code": "QUOTA_EXCEEDED", "message": "Cart not saved: ..." }
//! ```

use std::fmt;

use serde::Serialize;

use checkout_core::ValidationError;
use checkout_engine::EngineError;
use checkout_store::StoreError;

use crate::state::ConfigError;

/// Error returned from CLI commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product id
    NotFound,

    /// Input could not be parsed or was out of range
    ValidationError,

    /// Catalog could not be fetched or was invalid
    CatalogUnavailable,

    /// Snapshot larger than the storage quota
    QuotaExceeded,

    /// Storage backend failed
    StorageError,

    /// Startup configuration was unusable
    ConfigError,

    Internal,
}

/// Prints the serialized code, e.g. `NOT_FOUND`.
impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(code)) => f.write_str(&code),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::CatalogUnavailable(e) => {
                ApiError::new(ErrorCode::CatalogUnavailable, format!("Could not load products: {}", e))
            }
            EngineError::StorageQuotaExceeded { size, limit } => ApiError::new(
                ErrorCode::QuotaExceeded,
                format!(
                    "Cart not saved: it needs {} bytes but storage allows less than {}",
                    size, limit
                ),
            ),
            EngineError::Storage(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Storage failed: {}", e);
                match e {
                    StoreError::Io(_) => ApiError::new(ErrorCode::StorageError, "Could not access saved cart"),
                    other => ApiError::new(ErrorCode::StorageError, other.to_string()),
                }
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_engine::CatalogError;

    #[test]
    fn test_quota_error_maps_to_code() {
        let err: ApiError = EngineError::StorageQuotaExceeded {
            size: 6_000_000,
            limit: 5_242_880,
        }
        .into();
        assert_eq!(err.code, ErrorCode::QuotaExceeded);
        assert!(err.message.contains("6000000"));
    }

    #[test]
    fn test_catalog_error_maps_to_code() {
        let err: ApiError = EngineError::CatalogUnavailable(CatalogError::Unavailable("down".into())).into();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }

    #[test]
    fn test_display_includes_code() {
        let err = ApiError::not_found("Product", 42);
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 42");
    }

    #[test]
    fn test_serialized_code_matches_display() {
        let err = ApiError::new(ErrorCode::CatalogUnavailable, "down");
        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["code"], "CATALOG_UNAVAILABLE");
        assert_eq!(json["message"], "down");

        for code in [
            ErrorCode::NotFound,
            ErrorCode::ValidationError,
            ErrorCode::QuotaExceeded,
            ErrorCode::StorageError,
            ErrorCode::ConfigError,
            ErrorCode::Internal,
        ] {
            assert_eq!(serde_json::to_value(code).unwrap(), code.to_string());
        }
        assert_eq!(ErrorCode::QuotaExceeded.to_string(), "QUOTA_EXCEEDED");
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ApiError = ValidationError::Required {
            field: "code".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
