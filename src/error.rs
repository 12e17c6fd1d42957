//! Error types for the storefront
//!
//! Provides unified error handling using thiserror. Every error declares one
//! of a closed set of categories which decides the message the shopper sees.

use std::time::Duration;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::error_log::ReportedError;
use crate::models::ErrorResponse;
use crate::notice::Notice;

// == Error Category ==
/// User-facing error category.
///
/// The mapping to a message is keyed off the category an error declares,
/// never off the error's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Network,
    Validation,
    Timeout,
    Unknown,
}

impl ErrorCategory {
    /// Fixed message shown to the shopper for this category.
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorCategory::Network => "Please check your network connection.",
            ErrorCategory::Validation => "Please check your input and try again.",
            ErrorCategory::Timeout => "The request timed out. Please try again.",
            ErrorCategory::Unknown => "Something went wrong. Please refresh the page.",
        }
    }
}

// == Storage Error ==
/// Failure of the durable key-value storage.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

// == Submission Error ==
/// Failure reported by a form submitter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Network unavailable: {0}")]
    Network(String),

    #[error("Rejected by server validation: {0}")]
    Validation(String),

    #[error("Submission timed out after {0:?}")]
    Timeout(Duration),

    #[error("Server error: {0}")]
    Server(String),
}

impl SubmissionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SubmissionError::Network(_) => ErrorCategory::Network,
            SubmissionError::Validation(_) => ErrorCategory::Validation,
            SubmissionError::Timeout(_) => ErrorCategory::Timeout,
            SubmissionError::Server(_) => ErrorCategory::Unknown,
        }
    }
}

// == Shop Error Enum ==
/// Unified error type for the storefront service.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Key not present in the cache (or expired on read)
    #[error("Cache key not found: {0}")]
    CacheMiss(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Checkout attempted with nothing in the cart
    #[error("Cart is empty")]
    EmptyCart,

    /// No form registered under this id
    #[error("Unknown form: {0}")]
    UnknownForm(String),

    /// Durable storage failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Submitter failure
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl ShopError {
    /// Category used to pick the user-facing message.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShopError::InvalidRequest(_) | ShopError::EmptyCart => ErrorCategory::Validation,
            ShopError::Submission(err) => err.category(),
            ShopError::CacheMiss(_) | ShopError::UnknownForm(_) | ShopError::Storage(_) => {
                ErrorCategory::Unknown
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ShopError::CacheMiss(_) | ShopError::UnknownForm(_) => StatusCode::NOT_FOUND,
            ShopError::InvalidRequest(_) | ShopError::EmptyCart => StatusCode::BAD_REQUEST,
            ShopError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ShopError::Submission(SubmissionError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ShopError::Submission(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for ShopError {
    fn from(rejection: JsonRejection) -> Self {
        ShopError::InvalidRequest(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
/// The response carries a [`ReportedError`] extension for the error-log
/// middleware to record.
impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let notice = Notice::danger(self.category().user_message());
        let body = Json(ErrorResponse::new(self.to_string(), notice));

        let mut response = (self.status(), body).into_response();
        response
            .extensions_mut()
            .insert(ReportedError::from_error(&self));
        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for the storefront.
pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_messages_are_distinct() {
        let messages = [
            ErrorCategory::Network.user_message(),
            ErrorCategory::Validation.user_message(),
            ErrorCategory::Timeout.user_message(),
            ErrorCategory::Unknown.user_message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_submission_error_categories() {
        assert_eq!(
            SubmissionError::Network("offline".into()).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            SubmissionError::Timeout(Duration::from_secs(10)).category(),
            ErrorCategory::Timeout
        );
        assert_eq!(
            SubmissionError::Server("boom".into()).category(),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_category_ignores_message_text() {
        // A server error mentioning the network is still "unknown"
        let err = ShopError::from(SubmissionError::Server("network down".into()));
        assert_eq!(err.category(), ErrorCategory::Unknown);
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ShopError::EmptyCart.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ShopError::CacheMiss("k".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ShopError::from(SubmissionError::Timeout(Duration::from_secs(1))).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
    }

    #[test]
    fn test_response_carries_reported_error() {
        let response = ShopError::EmptyCart.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let reported = response.extensions().get::<ReportedError>().unwrap();
        assert_eq!(reported.category, ErrorCategory::Validation);
        assert_eq!(reported.message, "Cart is empty");
    }
}
