// CORS layer for the browser front-end
use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Status pages are public; any origin may POST JSON to the proxy.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
