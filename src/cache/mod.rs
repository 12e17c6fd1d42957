//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and insertion-order
//! eviction.

mod entry;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::ExpiringCache;

// == Public Constants ==
/// Default capacity
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default TTL in milliseconds (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 300_000;

/// Maximum allowed key length in bytes at the service boundary
pub const MAX_KEY_LENGTH: usize = 256;
