use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{debug, error, info, warn};

/// What happened to a notification; never surfaced to HTTP callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    /// No webhook URL configured
    Disabled,
    /// HTTP 429 from Discord; the body is logged
    RateLimited,
    Rejected(u16),
    Failed(String),
}

/// Posts plain-text messages to a Discord webhook
#[derive(Clone)]
pub struct DiscordNotifier {
    client: Client,
    webhook_url: Option<String>,
}

impl DiscordNotifier {
    pub fn new(client: Client, webhook_url: Option<String>) -> Self {
        Self {
            client,
            webhook_url,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Send `content`; failures are logged, not returned
    pub async fn send(&self, content: &str) -> NotificationOutcome {
        let Some(url) = &self.webhook_url else {
            debug!("Discord webhook not configured, skipping notification");
            return NotificationOutcome::Disabled;
        };

        let response = match self
            .client
            .post(url)
            .json(&json!({ "content": content }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Error sending Discord notification");
                return NotificationOutcome::Failed(e.to_string());
            }
        };

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), "Discord notification sent");
            NotificationOutcome::Sent
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            warn!(body = %body, "Discord notification rate limited");
            NotificationOutcome::RateLimited
        } else {
            error!(status = status.as_u16(), "Discord rejected notification");
            NotificationOutcome::Rejected(status.as_u16())
        }
    }
}

impl std::fmt::Debug for DiscordNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordNotifier")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
