//! API Routes
//!
//! Configures the Axum router with all storefront endpoints.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_to_cart_handler, buy_now_handler, cache_stats_handler, checkout_handler,
    clear_cache_handler, clear_error_log_handler, error_log_handler, get_cached_handler,
    get_cart_handler, health_handler, list_products_handler, product_detail_handler,
    product_reviews_handler, rate_product_handler, remove_from_cart_handler, set_cached_handler,
    set_quantity_handler, submit_form_handler, AppState,
};
use super::middleware::record_errors;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /products` - Catalog listing, optional `?q=` search
/// - `GET /products/detail` - Product detail by `?name=&price=`
/// - `GET /products/reviews` - Rating, comments and inquiries by `?name=`
/// - `POST /products/rating` - Rate a product 1 to 5 stars
/// - `GET /cart` - Cart contents and total
/// - `POST /cart/items` - Add a product
/// - `PUT /cart/items/:name` - Set a line's quantity
/// - `DELETE /cart/items/:name` - Remove a line
/// - `POST /cart/checkout` - Complete the order
/// - `POST /cart/buy-now` - Add and complete in one step
/// - `GET /cache/:key`, `PUT /cache`, `DELETE /cache`, `GET /cache/stats`
/// - `POST /forms/:form_id/submit` - Validate and submit a form
/// - `GET /errors`, `DELETE /errors` - Persisted error log
/// - `GET /health` - Health check endpoint
///
/// Every error response is recorded in the error log on its way out.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products", get(list_products_handler))
        .route("/products/detail", get(product_detail_handler))
        .route("/products/reviews", get(product_reviews_handler))
        .route("/products/rating", post(rate_product_handler))
        .route("/cart", get(get_cart_handler))
        .route("/cart/items", post(add_to_cart_handler))
        .route(
            "/cart/items/:name",
            put(set_quantity_handler).delete(remove_from_cart_handler),
        )
        .route("/cart/checkout", post(checkout_handler))
        .route("/cart/buy-now", post(buy_now_handler))
        .route("/cache", put(set_cached_handler).delete(clear_cache_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/cache/:key", get(get_cached_handler))
        .route("/forms/:form_id/submit", post(submit_form_handler))
        .route(
            "/errors",
            get(error_log_handler).delete(clear_error_log_handler),
        )
        .route("/health", get(health_handler))
        .layer(middleware::from_fn_with_state(state.clone(), record_errors))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
