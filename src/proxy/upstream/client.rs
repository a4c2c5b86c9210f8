// Upstream client implementation
// Single outbound call to UptimeRobot, no retries

use reqwest::{header, Client, Response};

use crate::error::{AppError, AppResult};
use crate::proxy::config::ProxyConfig;
use crate::proxy::mappers::UpstreamParameters;
use crate::utils::http::create_client_with_proxy;

pub struct UpstreamClient {
    http_client: Client,
    endpoint: url::Url,
}

impl UpstreamClient {
    pub fn new(config: &ProxyConfig) -> AppResult<Self> {
        let endpoint = url::Url::parse(&config.upstream_url).map_err(|e| {
            AppError::Config(format!(
                "Invalid upstream URL {}: {}",
                config.upstream_url, e
            ))
        })?;

        let http_client =
            create_client_with_proxy(config.request_timeout, Some(&config.upstream_proxy))?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// POST the form-encoded parameters to getMonitors.
    ///
    /// Any HTTP status is returned as `Ok`; only transport failures are errors.
    pub async fn get_monitors(&self, params: &UpstreamParameters) -> reqwest::Result<Response> {
        self.http_client
            .post(self.endpoint.clone())
            .header(
                header::CONTENT_TYPE,
                header::HeaderValue::from_static("application/x-www-form-urlencoded"),
            )
            .body(params.to_form())
            .send()
            .await
    }
}
