//! API Module
//!
//! HTTP handlers and routing for the storefront REST API. Every user
//! action (browsing, cart changes, checkout, form submission) is an
//! endpoint here.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use extract::AppJson;
pub use handlers::*;
pub use routes::create_router;
