use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::warn;

use crate::core::{AppError, Result};

/// Shared outbound HTTP client
pub fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("payrelay/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// Send a gateway request and decode its JSON body.
///
/// Transport failures and non-2xx answers become `AppError::Upstream`
/// carrying the gateway's body (JSON when it parses, raw text otherwise).
/// A 2xx answer that is not JSON is `AppError::Gateway`.
pub async fn send_json(request: RequestBuilder, gateway: &str, action: &str) -> Result<Value> {
    let response = request.send().await.map_err(|e| {
        let reason = if e.is_timeout() {
            "timeout"
        } else if e.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        AppError::upstream(
            format!("{} {}: {}", gateway, action, reason),
            Value::String(e.to_string()),
        )
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|e| {
        AppError::upstream(
            format!("Failed to read {} response", gateway),
            Value::String(e.to_string()),
        )
    })?;
    let parsed = serde_json::from_str::<Value>(&body).ok();

    if !status.is_success() {
        warn!(
            gateway = gateway,
            action = action,
            status = status.as_u16(),
            "Gateway returned an error response"
        );
        return Err(AppError::upstream(
            format!("{} {} failed - HTTP {}", gateway, action, status.as_u16()),
            parsed.unwrap_or(Value::String(body)),
        ));
    }

    parsed.ok_or_else(|| {
        AppError::gateway(format!("{} {} returned a non-JSON body", gateway, action))
    })
}

/// Join an API base and an absolute path without doubling the slash
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
