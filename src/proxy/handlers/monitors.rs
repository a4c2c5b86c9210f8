// getMonitors Handler
use axum::{extract::State, response::Json};
use bytes::Bytes;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::proxy::error::ProxyError;
use crate::proxy::mappers::{ClientRequest, UpstreamParameters};
use crate::proxy::server::AppState;

/// Handle `POST /api/get-monitors`
///
/// The body is taken as raw bytes so malformed JSON ends up as a
/// [`ProxyError::Unexpected`] instead of axum's own rejection.
pub async fn handle_get_monitors(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    get_monitors(&state, &body)
        .await
        .map(Json)
        .inspect_err(|e| {
            if let ProxyError::Unexpected(msg) = e {
                error!("Proxy function error: {}", msg);
            }
        })
}

async fn get_monitors(state: &AppState, body: &[u8]) -> Result<Value, ProxyError> {
    // 1. API key, checked before anything else touches the request
    let Some(api_key) = state.credentials.api_key() else {
        warn!(
            "UptimeRobot API key is not configured ({})",
            state.config.api_key_env
        );
        return Err(ProxyError::missing_api_key(&state.config.api_key_env));
    };

    // 2. Inbound JSON
    let client_request = ClientRequest::from_slice(body)?;

    // 3. Fixed parameters + client overrides
    let mut params = UpstreamParameters::new(&api_key);
    params.merge(&client_request, state.config.lock_api_key);
    debug!("Forwarding getMonitors with parameters: {:?}", params);

    // 4. Upstream call
    let response = state.upstream.get_monitors(&params).await?;

    // 5. Non-2xx is passed through with the same status
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await?;
        error!("UptimeRobot API Error: {} {}", status.as_u16(), error_text);
        return Err(ProxyError::Upstream {
            status: status.as_u16(),
            body: error_text,
        });
    }

    // 6. Parse so that a non-JSON success body is reported, not relayed
    let data: Value = response.json().await?;
    Ok(data)
}
