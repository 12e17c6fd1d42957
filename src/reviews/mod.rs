//! Reviews Module
//!
//! Per-product shopper ratings, comments and inquiries, persisted the same
//! way as the cart.

mod board;
mod entry;

pub use board::ReviewBoard;
pub use entry::{Comment, Inquiry, InquiryStatus, ProductReviews, RatingSummary};

// == Public Constants ==
/// Storage key holding the serialized review board
pub const REVIEWS_STORAGE_KEY: &str = "ssaldagi_reviews";

/// Accepted star range
pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

/// Author shown on every comment
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";
