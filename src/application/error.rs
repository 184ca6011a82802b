//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur while executing the
//! shipment operations: domain rule violations, provider failures,
//! repository failures and plain input validation.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)           - business rule violations
//! ├── Provider(ProviderError)       - carrier provider failures
//! ├── Repository(RepositoryError)   - document store failures
//! ├── Aggregation(AggregationError) - rate fan-out failures
//! ├── Validation(String)            - input validation failures
//! └── NotFound { .. }               - referenced document missing
//! ```

use crate::application::services::rate_aggregation::AggregationError;
use crate::domain::errors::DomainError;
use crate::infrastructure::persistence::traits::RepositoryError;
use crate::infrastructure::providers::error::ProviderError;
use thiserror::Error;

/// Error type for application operations.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Business rule violation.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Carrier provider failure.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Document store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Rate aggregation failure.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    /// Input validation failure.
    #[error("validation error: {0}")]
    Validation(String),

    /// A referenced document does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Type of the missing document.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Returns true if this error should map to a 404 response.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Repository(err) => err.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if this error is caused by the request rather than the
    /// system.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::Validation(_) | Self::NotFound { .. }
        )
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
