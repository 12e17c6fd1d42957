//! ssaldagi - storefront core for a novelty shop
//!
//! Provides a persisted shopping cart, an expiring cache with insertion-order
//! eviction, declarative form validation, a simulated form submitter,
//! product reviews and a persisted error log, all served over an HTTP API.

pub mod api;
pub mod cache;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod error_log;
pub mod models;
pub mod notice;
pub mod reviews;
pub mod storage;
pub mod submission;
pub mod validation;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, ShopError};
