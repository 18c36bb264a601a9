use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;

/// Only allow cross origin requests from `allowed_origin`.
pub fn add<S: Clone + Send + Sync + 'static>(
    allowed_origin: HeaderValue,
) -> impl FnOnce(Router<S>) -> Router<S> {
    let layer = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    |router| router.layer(layer)
}
