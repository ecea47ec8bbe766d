use crate::core::{AppError, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use url::Url;

pub mod server;

pub use server::ServerConfig;

/// Variable lookup used by the loaders; `env::var` in production
pub(crate) type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub urls: PublicUrls,
    pub cors: CorsConfig,
    pub http: HttpClientConfig,
    pub gateway: GatewayConfig,
    pub webhook: WebhookConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// Public base URLs used to build callback and redirect targets
#[derive(Debug, Clone)]
pub struct PublicUrls {
    /// Where the gateway sends the browser back to (this service)
    pub backend: Url,
    /// Where this service sends the browser after a status check
    pub frontend: Url,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout_secs: u64,
}

/// Which gateway authentication strategy is active
#[derive(Debug, Clone)]
pub enum GatewayConfig {
    /// Client-credentials token exchange, bearer-authenticated checkout v2
    OAuth(OAuthGatewayConfig),
    /// Salted SHA-256 `X-VERIFY` header, pg v1 API
    Checksum(ChecksumGatewayConfig),
}

impl GatewayConfig {
    pub fn strategy(&self) -> &'static str {
        match self {
            GatewayConfig::OAuth(_) => "oauth",
            GatewayConfig::Checksum(_) => "checksum",
        }
    }
}

#[derive(Clone)]
pub struct OAuthGatewayConfig {
    pub client_id: String,
    pub client_secret: String,
    pub client_version: Option<String>,
    pub oauth_url: String,
    pub pg_base_url: String,
    pub order_expiry_secs: u32,
}

#[derive(Clone)]
pub struct ChecksumGatewayConfig {
    pub merchant_id: String,
    pub salt_key: String,
    pub salt_index: u32,
    pub base_url: String,
}

/// Credential pair the gateway uses to authenticate its webhook calls
#[derive(Clone)]
pub struct WebhookConfig {
    pub username: String,
    pub password: String,
}

/// The Discord webhook URL embeds its token
#[derive(Clone)]
pub struct NotificationConfig {
    pub discord_webhook_url: Option<String>,
    pub mode: NotifyMode,
}

// Secrets are left out of the Debug output of the config structs

impl fmt::Debug for OAuthGatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthGatewayConfig")
            .field("client_id", &self.client_id)
            .field("client_version", &self.client_version)
            .field("oauth_url", &self.oauth_url)
            .field("pg_base_url", &self.pg_base_url)
            .field("order_expiry_secs", &self.order_expiry_secs)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ChecksumGatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChecksumGatewayConfig")
            .field("merchant_id", &self.merchant_id)
            .field("salt_index", &self.salt_index)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for NotificationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationConfig")
            .field("discord_enabled", &self.discord_webhook_url.is_some())
            .field("mode", &self.mode)
            .finish()
    }
}

/// How a status notification is dispatched relative to the redirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyMode {
    /// Spawned on the runtime; the redirect does not wait for it
    Background,
    /// Awaited before redirecting; failures are still swallowed
    Inline,
}

impl FromStr for NotifyMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "background" => Ok(NotifyMode::Background),
            "inline" => Ok(NotifyMode::Inline),
            other => Err(AppError::configuration(format!(
                "Invalid NOTIFY_MODE '{}' (expected background or inline)",
                other
            ))),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        let server = ServerConfig::from_lookup(lookup)?;

        let backend = lookup("APP_BE_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", server.port));
        let frontend =
            lookup("APP_FE_URL").unwrap_or_else(|| "http://localhost:3000".to_string());

        let gateway = match lookup("PHONEPE_AUTH_MODE")
            .unwrap_or_else(|| "oauth".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "oauth" => GatewayConfig::OAuth(OAuthGatewayConfig {
                client_id: required(lookup, "PHONEPE_CLIENT_ID")?,
                client_secret: required(lookup, "PHONEPE_CLIENT_SECRET")?,
                client_version: lookup("PHONEPE_CLIENT_VERSION"),
                oauth_url: lookup("PHONEPE_OAUTH_URL").unwrap_or_else(|| {
                    "https://api.phonepe.com/apis/identity-manager/v1/oauth/token".to_string()
                }),
                pg_base_url: lookup("PHONEPE_PG_BASE_URL")
                    .unwrap_or_else(|| "https://api.phonepe.com/apis/pg".to_string()),
                order_expiry_secs: parse_or(lookup, "PHONEPE_ORDER_EXPIRY_SECS", 1200u32)?,
            }),
            "checksum" => GatewayConfig::Checksum(ChecksumGatewayConfig {
                merchant_id: required(lookup, "PHONEPE_MERCHANT_ID")?,
                salt_key: required(lookup, "PHONEPE_SALT_KEY")?,
                salt_index: parse_or(lookup, "PHONEPE_SALT_INDEX", 1u32)?,
                base_url: lookup("PHONEPE_HERMES_BASE_URL")
                    .unwrap_or_else(|| "https://api.phonepe.com/apis/hermes".to_string()),
            }),
            other => {
                return Err(AppError::configuration(format!(
                    "Invalid PHONEPE_AUTH_MODE '{}' (expected oauth or checksum)",
                    other
                )))
            }
        };

        let config = Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
                log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            },
            server,
            urls: PublicUrls {
                backend: parse_base_url("APP_BE_URL", &backend)?,
                frontend: parse_base_url("APP_FE_URL", &frontend)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| "*".to_string())
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect(),
            },
            http: HttpClientConfig {
                timeout_secs: parse_or(lookup, "HTTP_TIMEOUT_SECS", 30u64)?,
            },
            gateway,
            webhook: WebhookConfig {
                username: required(lookup, "PHONEPE_USERNAME")?,
                password: required(lookup, "PHONEPE_PASSWORD")?,
            },
            notifications: NotificationConfig {
                discord_webhook_url: lookup("DISCORD_WEBHOOK_URL")
                    .filter(|url| !url.trim().is_empty()),
                mode: lookup("NOTIFY_MODE")
                    .map(|mode| mode.parse())
                    .transpose()?
                    .unwrap_or(NotifyMode::Background),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(AppError::configuration(
                "HTTP_TIMEOUT_SECS must be greater than 0",
            ));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(AppError::configuration(
                "CORS_ALLOWED_ORIGINS must list at least one origin",
            ));
        }

        match &self.gateway {
            GatewayConfig::OAuth(oauth) => {
                if oauth.order_expiry_secs == 0 {
                    return Err(AppError::configuration(
                        "PHONEPE_ORDER_EXPIRY_SECS must be greater than 0",
                    ));
                }
                parse_base_url("PHONEPE_OAUTH_URL", &oauth.oauth_url)?;
                parse_base_url("PHONEPE_PG_BASE_URL", &oauth.pg_base_url)?;
            }
            GatewayConfig::Checksum(checksum) => {
                if checksum.salt_index == 0 {
                    return Err(AppError::configuration(
                        "PHONEPE_SALT_INDEX must be greater than 0",
                    ));
                }
                parse_base_url("PHONEPE_HERMES_BASE_URL", &checksum.base_url)?;
            }
        }

        if let Some(url) = &self.notifications.discord_webhook_url {
            parse_base_url("DISCORD_WEBHOOK_URL", url)?;
        }

        Ok(())
    }
}

fn required(lookup: &Lookup<'_>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| AppError::configuration(format!("{} not set", key)))
}

pub(crate) fn parse_or<T: FromStr>(lookup: &Lookup<'_>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}

fn parse_base_url(key: &str, raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::configuration(format!("Invalid {}: {}", key, e)))?;

    if url.cannot_be_a_base() {
        return Err(AppError::configuration(format!(
            "Invalid {}: not a base URL",
            key
        )));
    }

    Ok(url)
}
