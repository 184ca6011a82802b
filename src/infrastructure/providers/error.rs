//! # Provider Errors
//!
//! Error types for carrier provider operations.
//!
//! This module provides error types for provider adapter operations
//! including rate requests, booking creation, label retrieval and tracking
//! queries.
//!
//! # Examples
//!
//! ```
//! use parcelgate::infrastructure::providers::error::ProviderError;
//!
//! let error = ProviderError::timeout("request timed out after 5000ms");
//! assert!(error.is_retryable());
//!
//! let error = ProviderError::authentication("invalid API key");
//! assert!(!error.is_retryable());
//! ```

use crate::domain::value_objects::ProviderId;
use thiserror::Error;

/// Error type for provider adapter operations.
///
/// Represents errors that can occur when talking to carrier-aggregation
/// services, including network issues, authentication failures and
/// provider-side rejections.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Request timed out.
    #[error("provider timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error.
    #[error("provider connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Authentication or authorization failure.
    #[error("provider authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("provider rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
        /// Retry-after duration in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// Invalid request parameters.
    #[error("provider invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The provider returned no usable rates.
    #[error("provider rates unavailable: {message}")]
    RatesUnavailable {
        /// Error message.
        message: String,
    },

    /// Booking creation failed.
    #[error("provider booking failed: {message}")]
    BookingFailed {
        /// Error message.
        message: String,
        /// Provider-specific error code.
        error_code: Option<String>,
    },

    /// The provider is unavailable or unhealthy.
    #[error("provider unavailable: {provider_id} - {message}")]
    ProviderUnavailable {
        /// The provider id.
        provider_id: ProviderId,
        /// Error message.
        message: String,
    },

    /// Protocol or format error.
    #[error("provider protocol error: {message}")]
    ProtocolError {
        /// Error message.
        message: String,
    },

    /// Internal adapter error.
    #[error("provider internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },

    /// Unknown or unclassified error.
    #[error("provider unknown error: {message}")]
    Unknown {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms: None,
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a rates unavailable error.
    #[must_use]
    pub fn rates_unavailable(message: impl Into<String>) -> Self {
        Self::RatesUnavailable {
            message: message.into(),
        }
    }

    /// Creates a booking failed error.
    #[must_use]
    pub fn booking_failed(message: impl Into<String>) -> Self {
        Self::BookingFailed {
            message: message.into(),
            error_code: None,
        }
    }

    /// Creates a booking failed error with a provider error code.
    #[must_use]
    pub fn booking_failed_with_code(
        message: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self::BookingFailed {
            message: message.into(),
            error_code: Some(error_code.into()),
        }
    }

    /// Creates a provider unavailable error.
    #[must_use]
    pub fn provider_unavailable(provider_id: ProviderId, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider_id,
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol_error(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Creates an unknown error.
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Returns true if this error is transient and may succeed on retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::Connection { .. }
                | Self::RateLimited { .. }
                | Self::ProviderUnavailable { .. }
        )
    }

    /// Returns true if this error is a client error (bad request).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequest { .. } | Self::Authentication { .. }
        )
    }

    /// Returns the retry delay in milliseconds, if applicable.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }

    /// Returns the provider error code, if any.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::BookingFailed { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
