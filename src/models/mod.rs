//! Request and Response models for the storefront API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    AddToCartRequest, RateProductRequest, ReviewsQuery, SearchQuery, SetCacheRequest,
    SetQuantityRequest, SubmitFormRequest,
};
pub use responses::{
    CacheStatsResponse, CacheValueResponse, CartResponse, CartUpdateResponse, CheckoutResponse,
    ErrorLogResponse, ErrorResponse, HealthResponse, RatingResponse, ReviewsResponse,
    SetCacheResponse, SubmitFormResponse,
};
