use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::error::{AppError, AppResult};
use crate::proxy::config::ProxyConfig;
use crate::proxy::credential::CredentialProvider;
use crate::proxy::upstream::UpstreamClient;

/// Inbound bodies are small JSON objects of getMonitors parameters
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Axum application state, read-only once the server is up
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub credentials: Arc<dyn CredentialProvider>,
    pub upstream: Arc<UpstreamClient>,
}

impl AppState {
    pub fn new(config: ProxyConfig, credentials: Arc<dyn CredentialProvider>) -> AppResult<Self> {
        let upstream = UpstreamClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            credentials,
            upstream: Arc::new(upstream),
        })
    }
}

/// Build the router with all routes and layers applied
pub fn build_router(state: AppState) -> Router {
    use crate::proxy::handlers;

    let allow_cors = state.config.allow_cors;

    let app = Router::new()
        .route(
            "/api/get-monitors",
            post(handlers::monitors::handle_get_monitors),
        )
        .route("/healthz", get(health_check_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            crate::proxy::middleware::logging_middleware,
        ));

    let app = if allow_cors {
        app.layer(crate::proxy::middleware::cors_layer())
    } else {
        app
    };

    app.with_state(state)
}

/// Axum server instance
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
    local_addr: SocketAddr,
}

impl AxumServer {
    /// Start Axum server
    pub async fn start(
        config: ProxyConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> AppResult<(Self, tokio::task::JoinHandle<()>)> {
        // Bind address
        let addr = format!("{}:{}", config.get_bind_address(), config.port);

        let state = AppState::new(config, credentials)?;
        tracing::info!("Upstream endpoint: {}", state.upstream.endpoint());
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
            AppError::Config(format!("Failed to bind address {}: {}", addr, e))
        })?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Uptime status proxy started at http://{}", local_addr);

        // Create shutdown channel
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let server_instance = Self {
            shutdown_tx: Some(shutdown_tx),
            local_addr,
        };

        // Start server in new task
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("Connection handling finished or errored: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("Failed to accept connection: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Uptime status proxy stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((server_instance, handle))
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Health check handler
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}
