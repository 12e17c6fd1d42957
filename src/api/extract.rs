//! Request extractors
//!
//! Body extraction whose rejections answer like any other [`ShopError`].

use axum::extract::FromRequest;

use crate::error::ShopError;

/// `axum::Json` with a [`ShopError`] rejection, so a malformed body gets the
/// usual `{"error", "notice"}` response.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ShopError))]
pub struct AppJson<T>(pub T);
