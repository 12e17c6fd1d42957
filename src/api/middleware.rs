//! API Middleware
//!
//! Records every error response in the error log.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::handlers::AppState;
use crate::error_log::{ReportedError, RequestOrigin};

/// Sends errors that left a handler through the central error handler,
/// with the route as context.
pub async fn record_errors(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let origin = RequestOrigin::from_http(request.headers(), request.uri());
    let context = format!("{} {}", request.method(), request.uri().path());

    let response = next.run(request).await;

    if let Some(reported) = response.extensions().get::<ReportedError>() {
        state.errors.report(reported, &context, &origin);
    }
    response
}
