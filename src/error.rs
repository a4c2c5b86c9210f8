use thiserror::Error;

/// Errors raised while bootstrapping the service (config, logging, binding).
///
/// Request-path failures use [`crate::proxy::ProxyError`] instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

// Implement alias for Result to simplify usage
pub type AppResult<T> = Result<T, AppError>;
