pub mod error;
pub mod modules;
pub mod proxy; // Proxy service module
mod utils;

use std::sync::Arc;

use modules::env::SystemEnv;
use modules::logger;
use proxy::{AxumServer, CredentialProvider, EnvCredential};
use tracing::{info, warn};

/// Load configuration, start the proxy and run until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    let env = SystemEnv;

    // Logging first so config errors end up in the log file too
    let data_dir = modules::get_data_dir(&env).ok();
    let _log_guard = logger::init_logger(data_dir.as_deref());

    let config = modules::load_app_config(&env)?;

    let credentials = Arc::new(EnvCredential::new(SystemEnv, config.api_key_env.clone()));
    if credentials.api_key().is_none() {
        // Not fatal: requests answer 500 until the key is provided
        warn!(
            "{} is not set; /api/get-monitors will fail until it is",
            credentials.var_name()
        );
    }

    let (server, handle) = AxumServer::start(config, credentials).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    server.stop();
    handle.await?;
    Ok(())
}
