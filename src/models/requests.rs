//! Request DTOs for the storefront API
//!
//! Defines the structure of incoming HTTP request bodies and queries.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;
use crate::cart::MAX_ADD_QUANTITY;
use crate::reviews::{MAX_STARS, MIN_STARS};

/// Request body for adding to the cart (POST /cart/items) and for
/// buying now (POST /cart/buy-now)
///
/// # Fields
/// - `name`: Product name
/// - `price`: Unit price in won; negative or fractional prices are rejected
///   by deserialization
/// - `quantity`: Optional, defaults to 1, at most 99
#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub name: String,
    pub price: u64,
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl AddToCartRequest {
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Product name cannot be empty".to_string());
        }
        let quantity = self.quantity();
        if quantity == 0 || quantity > MAX_ADD_QUANTITY {
            return Some(format!(
                "Quantity must be between 1 and {}",
                MAX_ADD_QUANTITY
            ));
        }
        None
    }
}

/// Request body for PUT /cart/items/:name
///
/// Zero or negative quantities remove the line.
#[derive(Debug, Clone, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

/// Request body for PUT /cache
#[derive(Debug, Clone, Deserialize)]
pub struct SetCacheRequest {
    pub key: String,
    pub value: serde_json::Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<u64>,
}

impl SetCacheRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Request body for POST /forms/:form_id/submit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitFormRequest {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Product the comment or inquiry is about; defaults to the default
    /// product
    #[serde(default)]
    pub product: Option<String>,
}

/// Request body for POST /products/rating
#[derive(Debug, Clone, Deserialize)]
pub struct RateProductRequest {
    pub name: String,
    pub rating: u8,
}

impl RateProductRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("Product name cannot be empty".to_string());
        }
        if !(MIN_STARS..=MAX_STARS).contains(&self.rating) {
            return Some(format!(
                "Rating must be between {} and {}",
                MIN_STARS, MAX_STARS
            ));
        }
        None
    }
}

/// Query for GET /products/reviews
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsQuery {
    #[serde(default)]
    pub name: Option<String>,
}

/// Query for GET /products
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}
