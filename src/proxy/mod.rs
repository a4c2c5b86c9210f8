// proxy module - UptimeRobot getMonitors proxy

pub mod config;
pub mod credential;
pub mod error;
pub mod server;

pub mod handlers; // API endpoint handlers
pub mod mappers; // Inbound JSON -> upstream form parameters
pub mod middleware; // Axum middleware
pub mod upstream; // Upstream client

pub use config::ProxyConfig;
pub use credential::{CredentialProvider, EnvCredential};
pub use error::ProxyError;
pub use server::{build_router, AppState, AxumServer};
