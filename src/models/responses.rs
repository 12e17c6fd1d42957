//! Response DTOs for the storefront API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::cart::{CartLine, CartStore, OrderSummary};
use crate::error_log::ErrorRecord;
use crate::notice::Notice;
use crate::reviews::{Comment, Inquiry, ProductReviews, RatingSummary};
use crate::validation::FieldReport;

/// Current cart contents (GET /cart)
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub total: u64,
    /// Sum of quantities, for the cart badge
    pub item_count: u64,
}

impl From<&CartStore> for CartResponse {
    fn from(cart: &CartStore) -> Self {
        Self {
            lines: cart.lines().to_vec(),
            total: cart.total(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart after a mutation, plus the notice to show
#[derive(Debug, Clone, Serialize)]
pub struct CartUpdateResponse {
    pub cart: CartResponse,
    pub notice: Notice,
}

impl CartUpdateResponse {
    pub fn new(cart: &CartStore, notice: Notice) -> Self {
        Self {
            cart: CartResponse::from(cart),
            notice,
        }
    }
}

/// Completed order (POST /cart/checkout, POST /cart/buy-now)
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order: OrderSummary,
    pub notice: Notice,
}

/// Cached value (GET /cache/:key)
#[derive(Debug, Clone, Serialize)]
pub struct CacheValueResponse {
    pub key: String,
    pub value: serde_json::Value,
}

impl CacheValueResponse {
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /cache
#[derive(Debug, Clone, Serialize)]
pub struct SetCacheResponse {
    pub message: String,
    pub key: String,
}

impl SetCacheResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' cached", key),
            key,
        }
    }
}

/// Response body for GET /cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Outcome of POST /forms/:form_id/submit
#[derive(Debug, Clone, Serialize)]
pub struct SubmitFormResponse {
    pub form_id: String,
    pub submitted: bool,
    pub notice: Notice,
    /// Per-field visual state after the attempt
    pub fields: Vec<FieldReport>,
}

/// Response body for POST /products/rating
#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub name: String,
    pub rating: RatingSummary,
    pub notice: Notice,
}

/// Response body for GET /products/reviews
#[derive(Debug, Clone, Serialize)]
pub struct ReviewsResponse {
    pub name: String,
    /// Average rounded to one decimal place
    pub rating: RatingSummary,
    pub comment_count: usize,
    pub comments: Vec<Comment>,
    pub inquiries: Vec<Inquiry>,
}

impl ReviewsResponse {
    pub fn new(name: impl Into<String>, reviews: ProductReviews) -> Self {
        Self {
            name: name.into(),
            rating: reviews.rating.rounded(),
            comment_count: reviews.comments.len(),
            comments: reviews.comments,
            inquiries: reviews.inquiries,
        }
    }
}

/// Response body for GET /errors
#[derive(Debug, Clone, Serialize)]
pub struct ErrorLogResponse {
    pub entries: Vec<ErrorRecord>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Notice to show the shopper
    pub notice: Notice,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, notice: Notice) -> Self {
        Self {
            error: error.into(),
            notice,
        }
    }
}
