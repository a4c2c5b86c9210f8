use reqwest::{Client, Proxy};

use crate::proxy::config::UpstreamProxyConfig;

const USER_AGENT: &str = concat!("uptime-status-proxy/", env!("CARGO_PKG_VERSION"));

/// Create an HTTP client with specified proxy configuration
///
/// An invalid proxy address is logged and skipped rather than failing startup.
pub fn create_client_with_proxy(
    timeout_secs: u64,
    proxy_config: Option<&UpstreamProxyConfig>,
) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT);

    if let Some(config) = proxy_config {
        if config.enabled && !config.url.is_empty() {
            match Proxy::all(&config.url) {
                Ok(proxy) => {
                    builder = builder.proxy(proxy);
                    tracing::info!("HTTP client upstream proxy enabled: {}", config.url);
                }
                Err(e) => {
                    tracing::error!("Invalid proxy address: {}, error: {}", config.url, e);
                }
            }
        }
    }

    builder.build()
}
