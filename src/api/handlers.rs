//! API Handlers
//!
//! HTTP request handlers for each storefront endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    Json,
};
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::cache::ExpiringCache;
use super::extract::AppJson;
use crate::cart::CartStore;
use crate::catalog::{self, DetailQuery, Product, DEFAULT_PRODUCT_NAME};
use crate::config::Config;
use crate::error::{ErrorCategory, Result, ShopError};
use crate::error_log::{ErrorHandler, ErrorLog, RequestOrigin, DEFAULT_LOG_CAPACITY};
use crate::models::{
    AddToCartRequest, CacheStatsResponse, CacheValueResponse, CartResponse, CartUpdateResponse,
    CheckoutResponse, ErrorLogResponse, HealthResponse, RateProductRequest, RatingResponse,
    ReviewsQuery, ReviewsResponse, SearchQuery, SetCacheRequest, SetCacheResponse,
    SetQuantityRequest, SubmitFormRequest, SubmitFormResponse,
};
use crate::notice::{Notice, DEFAULT_DISMISS_MS};
use crate::reviews::ReviewBoard;
use crate::storage::KeyValueStorage;
use crate::submission::{FormHandler, FormSubmitter, SimulatedSubmitter, SubmitError};
use crate::validation::FormRegistry;

/// Message shown once an order completes.
pub const ORDER_COMPLETE_MESSAGE: &str =
    "Your order is complete! Thank you for choosing ssaldagi.";

/// Application state shared across all handlers.
///
/// The cart and cache are explicit objects owned here rather than globals;
/// each sits behind its own lock so mutations are serialized.
#[derive(Clone)]
pub struct AppState {
    /// Persisted shopping cart
    pub cart: Arc<Mutex<CartStore>>,
    /// Persisted ratings, comments and inquiries
    pub reviews: Arc<Mutex<ReviewBoard>>,
    /// Expiring cache of arbitrary JSON values
    pub cache: Arc<RwLock<ExpiringCache<serde_json::Value>>>,
    /// Declared form schemas
    pub forms: Arc<FormRegistry>,
    /// Submission pipeline
    pub form_handler: FormHandler,
    /// Central error funnel
    pub errors: Arc<ErrorHandler>,
    /// Simulated order processing time
    pub checkout_delay: Duration,
    /// Auto-dismiss delay for notices
    pub notice_dismiss_ms: u64,
}

impl AppState {
    /// Creates a new AppState.
    ///
    /// The cart is restored from `storage`; the error log shares it.
    pub fn new(
        storage: Arc<dyn KeyValueStorage>,
        cache: ExpiringCache<serde_json::Value>,
        submitter: Arc<dyn FormSubmitter>,
    ) -> Self {
        let errors = Arc::new(ErrorHandler::new(ErrorLog::new(
            storage.clone(),
            DEFAULT_LOG_CAPACITY,
        )));

        Self {
            cart: Arc::new(Mutex::new(CartStore::restore(storage.clone()))),
            reviews: Arc::new(Mutex::new(ReviewBoard::restore(storage))),
            cache: Arc::new(RwLock::new(cache)),
            forms: Arc::new(FormRegistry::with_shop_forms()),
            form_handler: FormHandler::new(submitter, errors.clone()),
            errors,
            checkout_delay: Duration::ZERO,
            notice_dismiss_ms: DEFAULT_DISMISS_MS,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, storage: Arc<dyn KeyValueStorage>) -> Self {
        let errors = Arc::new(
            ErrorHandler::new(ErrorLog::new(storage.clone(), config.error_log_capacity))
                .with_notice_dismiss_ms(config.notice_dismiss_ms),
        );
        let submitter = Arc::new(SimulatedSubmitter::new(
            config.submit_success_rate,
            config.submit_latency(),
        ));

        Self {
            cart: Arc::new(Mutex::new(CartStore::restore(storage.clone()))),
            reviews: Arc::new(Mutex::new(ReviewBoard::restore(storage))),
            cache: Arc::new(RwLock::new(ExpiringCache::new(
                config.cache_max_entries,
                config.cache_default_ttl(),
            ))),
            forms: Arc::new(FormRegistry::with_shop_forms()),
            form_handler: FormHandler::new(submitter, errors.clone())
                .with_notice_dismiss_ms(config.notice_dismiss_ms),
            errors,
            checkout_delay: config.checkout_delay(),
            notice_dismiss_ms: config.notice_dismiss_ms,
        }
    }

    fn notice(&self, notice: Notice) -> Notice {
        notice.dismiss_after(self.notice_dismiss_ms)
    }

    /// Waits out the order processing time, then empties the cart.
    async fn complete_order(&self) -> Result<CheckoutResponse> {
        if self.cart.lock().await.is_empty() {
            return Err(ShopError::EmptyCart);
        }

        tokio::time::sleep(self.checkout_delay).await;

        let order = self
            .cart
            .lock()
            .await
            .checkout()
            .ok_or(ShopError::EmptyCart)?;
        info!(
            "Order completed: {} items, total {}",
            order.item_count, order.total
        );

        Ok(CheckoutResponse {
            order,
            notice: self.notice(Notice::success(ORDER_COMPLETE_MESSAGE)),
        })
    }
}

// == Catalog ==

/// Handler for GET /products
pub async fn list_products_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Product>> {
    let mut products = match query.q {
        Some(q) => catalog::search(&q),
        None => catalog::list(),
    };

    let reviews = state.reviews.lock().await;
    for product in &mut products {
        reviews.apply_rating(product);
    }
    Json(products)
}

/// Handler for GET /products/detail
///
/// Falls back to the default product when `name` or `price` is missing.
pub async fn product_detail_handler(
    State(state): State<AppState>,
    Query(query): Query<DetailQuery>,
) -> Json<Product> {
    let mut product = catalog::detail(&query);
    state.reviews.lock().await.apply_rating(&mut product);
    Json(product)
}

/// Handler for GET /products/reviews
pub async fn product_reviews_handler(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Json<ReviewsResponse> {
    let name = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(DEFAULT_PRODUCT_NAME);

    let reviews = state.reviews.lock().await.reviews(name);
    Json(ReviewsResponse::new(name, reviews))
}

/// Handler for POST /products/rating
pub async fn rate_product_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<RateProductRequest>,
) -> Result<Json<RatingResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ShopError::InvalidRequest(error_msg));
    }

    let name = req.name.trim();
    let summary = state
        .reviews
        .lock()
        .await
        .rate(name, req.rating)
        .ok_or_else(|| ShopError::InvalidRequest(format!("Invalid rating {}", req.rating)))?;

    Ok(Json(RatingResponse {
        name: name.to_string(),
        rating: summary.rounded(),
        notice: state.notice(Notice::success(format!(
            "Thank you for rating it {} stars!",
            req.rating
        ))),
    }))
}

// == Cart ==

/// Handler for GET /cart
pub async fn get_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart.lock().await;
    Json(CartResponse::from(&*cart))
}

/// Handler for POST /cart/items
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<AddToCartRequest>,
) -> Result<Json<CartUpdateResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ShopError::InvalidRequest(error_msg));
    }

    let mut cart = state.cart.lock().await;
    cart.add_quantity(&req.name, req.price, req.quantity());

    let notice = state.notice(Notice::success(format!(
        "{} x{} added to your cart!",
        req.name,
        req.quantity()
    )));
    Ok(Json(CartUpdateResponse::new(&cart, notice)))
}

/// Handler for PUT /cart/items/:name
pub async fn set_quantity_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    AppJson(req): AppJson<SetQuantityRequest>,
) -> Json<CartUpdateResponse> {
    let mut cart = state.cart.lock().await;
    let present = cart.line(&name).is_some();
    cart.set_quantity(&name, req.quantity);

    let notice = if !present {
        Notice::info(format!("{} is not in your cart.", name))
    } else if req.quantity <= 0 {
        Notice::danger(format!("{} removed from your cart.", name))
    } else {
        Notice::info(format!("{} quantity set to {}.", name, req.quantity))
    };
    Json(CartUpdateResponse::new(&cart, state.notice(notice)))
}

/// Handler for DELETE /cart/items/:name
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<CartUpdateResponse> {
    let mut cart = state.cart.lock().await;
    cart.remove(&name);

    let notice = state.notice(Notice::danger(format!("{} removed from your cart.", name)));
    Json(CartUpdateResponse::new(&cart, notice))
}

/// Handler for POST /cart/checkout
pub async fn checkout_handler(State(state): State<AppState>) -> Result<Json<CheckoutResponse>> {
    state.complete_order().await.map(Json)
}

/// Handler for POST /cart/buy-now
///
/// Adds the product to the cart and completes the order right away.
pub async fn buy_now_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<AddToCartRequest>,
) -> Result<Json<CheckoutResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ShopError::InvalidRequest(error_msg));
    }

    state
        .cart
        .lock()
        .await
        .add_quantity(&req.name, req.price, req.quantity());

    state.complete_order().await.map(Json)
}

// == Cache ==

/// Handler for GET /cache/:key
pub async fn get_cached_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheValueResponse>> {
    // Write lock: an expired entry is removed on read
    let mut cache = state.cache.write().await;
    let value = cache.get(&key).ok_or_else(|| ShopError::CacheMiss(key.clone()))?;

    Ok(Json(CacheValueResponse::new(key, value)))
}

/// Handler for PUT /cache
pub async fn set_cached_handler(
    State(state): State<AppState>,
    AppJson(req): AppJson<SetCacheRequest>,
) -> Result<Json<SetCacheResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(ShopError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    cache.set(req.key.clone(), req.value, req.ttl_ms.map(Duration::from_millis));

    Ok(Json(SetCacheResponse::new(req.key)))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> StatusCode {
    state.cache.write().await.clear();
    StatusCode::NO_CONTENT
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let cache = state.cache.read().await;
    Json(CacheStatsResponse::from(cache.stats()))
}

// == Forms ==

/// Handler for POST /forms/:form_id/submit
///
/// Always answers with a notice. Invalid input is 422; a failed
/// submission is 502 after going through the error handler.
pub async fn submit_form_handler(
    State(state): State<AppState>,
    Path(form_id): Path<String>,
    headers: HeaderMap,
    uri: Uri,
    AppJson(req): AppJson<SubmitFormRequest>,
) -> Result<(StatusCode, Json<SubmitFormResponse>)> {
    let schema = state
        .forms
        .get(&form_id)
        .ok_or_else(|| ShopError::UnknownForm(form_id.clone()))?;

    let mut form = schema.instantiate();
    form.fill(req.fields);
    let product = req
        .product
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_PRODUCT_NAME)
        .to_string();

    let origin = RequestOrigin::from_http(&headers, &uri);
    // The form is reset on success, so keep what was sent
    let values = form.values();

    let (status, submitted, notice) = match state.form_handler.submit(&mut form, &origin).await {
        Ok(notice) => {
            state
                .reviews
                .lock()
                .await
                .record_submission(&form_id, &product, &values);
            (StatusCode::OK, true, notice)
        }
        Err(err @ SubmitError::Invalid { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, false, err.notice().clone())
        }
        Err(SubmitError::Failed { error, notice, .. }) => {
            let status = match error.category() {
                ErrorCategory::Timeout => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, false, notice)
        }
    };

    Ok((
        status,
        Json(SubmitFormResponse {
            form_id,
            submitted,
            notice,
            fields: form.report(),
        }),
    ))
}

// == Errors ==

/// Handler for GET /errors
pub async fn error_log_handler(State(state): State<AppState>) -> Json<ErrorLogResponse> {
    Json(ErrorLogResponse {
        entries: state.errors.log().entries(),
    })
}

/// Handler for DELETE /errors
pub async fn clear_error_log_handler(State(state): State<AppState>) -> Result<StatusCode> {
    state.errors.log().clear()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use axum::http::header::USER_AGENT;

    fn test_state(success_rate: f64) -> AppState {
        AppState::new(
            Arc::new(MemoryStorage::new()),
            ExpiringCache::new(100, Duration::from_secs(300)),
            Arc::new(SimulatedSubmitter::new(success_rate, Duration::ZERO)),
        )
    }

    fn add_request(name: &str, price: u64, quantity: Option<u32>) -> AddToCartRequest {
        AddToCartRequest {
            name: name.to_string(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_add_and_get_cart() {
        let state = test_state(1.0);

        add_to_cart_handler(State(state.clone()), AppJson(add_request("Umbrella", 12000, None)))
            .await
            .unwrap();
        let response = add_to_cart_handler(
            State(state.clone()),
            AppJson(add_request("Umbrella", 12000, None)),
        )
        .await
        .unwrap();

        assert_eq!(response.cart.total, 24000);
        assert_eq!(response.cart.lines[0].quantity, 2);

        let cart = get_cart_handler(State(state)).await;
        assert_eq!(cart.item_count, 2);
    }

    #[tokio::test]
    async fn test_add_rejects_out_of_range_quantity() {
        let state = test_state(1.0);

        let result =
            add_to_cart_handler(State(state), AppJson(add_request("Umbrella", 12000, Some(100)))).await;
        assert!(matches!(result, Err(ShopError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_set_quantity_zero_removes() {
        let state = test_state(1.0);
        add_to_cart_handler(State(state.clone()), AppJson(add_request("Clock", 25000, None)))
            .await
            .unwrap();

        let response = set_quantity_handler(
            State(state),
            Path("Clock".to_string()),
            AppJson(SetQuantityRequest { quantity: 0 }),
        )
        .await;

        assert!(response.cart.lines.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let state = test_state(1.0);
        let result = checkout_handler(State(state)).await;
        assert!(matches!(result, Err(ShopError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_buy_now_clears_cart() {
        let state = test_state(1.0);

        let response = buy_now_handler(
            State(state.clone()),
            AppJson(add_request("Holey Socks", 5000, Some(3))),
        )
        .await
        .unwrap();

        assert_eq!(response.order.total, 15000);
        assert!(state.cart.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_cache_miss() {
        let state = test_state(1.0);
        let result = get_cached_handler(State(state), Path("absent".to_string())).await;
        assert!(matches!(result, Err(ShopError::CacheMiss(_))));
    }

    #[tokio::test]
    async fn test_unknown_form() {
        let state = test_state(1.0);
        let result = submit_form_handler(
            State(state),
            Path("newsletter".to_string()),
            HeaderMap::new(),
            Uri::from_static("/forms/newsletter/submit"),
            AppJson(SubmitFormRequest::default()),
        )
        .await;
        assert!(matches!(result, Err(ShopError::UnknownForm(_))));
    }

    #[tokio::test]
    async fn test_failed_submission_is_logged() {
        let state = test_state(0.0);
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, "test-agent".parse().unwrap());

        let (status, response) = submit_form_handler(
            State(state.clone()),
            Path("comment".to_string()),
            headers,
            Uri::from_static("/forms/comment/submit"),
            AppJson(SubmitFormRequest {
                fields: [("comment_text".to_string(), "Useless and great".to_string())].into(),
                product: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!response.submitted);

        let log = error_log_handler(State(state)).await;
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].user_agent.as_deref(), Some("test-agent"));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_successful_comment_lands_on_product() {
        let state = test_state(1.0);

        let (status, response) = submit_form_handler(
            State(state.clone()),
            Path("comment".to_string()),
            HeaderMap::new(),
            Uri::from_static("/forms/comment/submit"),
            AppJson(SubmitFormRequest {
                fields: [("comment_text".to_string(), "It really squeaks".to_string())].into(),
                product: Some("Squeaky Slippers".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert!(response.submitted);

        let reviews = product_reviews_handler(
            State(state),
            Query(ReviewsQuery {
                name: Some("Squeaky Slippers".to_string()),
            }),
        )
        .await;
        assert_eq!(reviews.comment_count, 1);
        assert_eq!(reviews.comments[0].text, "It really squeaks");
    }

    #[tokio::test]
    async fn test_rating_shows_on_detail() {
        let state = test_state(1.0);

        let response = rate_product_handler(
            State(state.clone()),
            AppJson(RateProductRequest {
                name: "Silent Bell".to_string(),
                rating: 5,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.rating.count, 1);

        let product = product_detail_handler(
            State(state),
            Query(DetailQuery {
                name: Some("Silent Bell".to_string()),
                price: Some("18000".to_string()),
            }),
        )
        .await;
        assert_eq!(product.rating, 5.0);
        assert_eq!(product.rating_count, 1);
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let state = test_state(1.0);
        let result = rate_product_handler(
            State(state),
            AppJson(RateProductRequest {
                name: "Silent Bell".to_string(),
                rating: 9,
            }),
        )
        .await;
        assert!(matches!(result, Err(ShopError::InvalidRequest(_))));
    }
}
