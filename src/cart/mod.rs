//! Cart Module
//!
//! Locally persisted shopping cart.

mod line;
mod order;
mod store;


pub use line::CartLine;
pub use order::{OrderItem, OrderSummary};
pub use store::CartStore;

// == Public Constants ==
/// Storage key holding the serialized cart
pub const CART_STORAGE_KEY: &str = "ssaldagi_cart";

/// Largest quantity the shop front accepts in one add (the store itself
/// has no upper bound)
pub const MAX_ADD_QUANTITY: u32 = 99;
