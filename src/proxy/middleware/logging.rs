// Request logging middleware
use axum::{extract::Request, middleware::Next, response::Response};
use tokio::time::Instant;

/// Logs method, URI, resulting status and latency for every request.
///
/// Bodies and headers are left out: the inbound body may carry parameters
/// the caller considers private.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    tracing::info!("Request: {} {}", method, uri);

    let response = next.run(request).await;

    tracing::info!(
        "Response: {} {} -> {} ({} ms)",
        method,
        uri,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_passes_response_through() {
        let app = Router::new()
            .route("/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
            .layer(axum::middleware::from_fn(logging_middleware));

        let response = app
            .oneshot(
                http::Request::builder()
                    .uri("/teapot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    }
}
