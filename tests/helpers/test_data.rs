// Test Data Helpers
//
// Configuration builders pointing the application at mock servers, plus
// canned PhonePe response bodies.

use payrelay::config::{
    AppConfig, ChecksumGatewayConfig, Config, CorsConfig, GatewayConfig, HttpClientConfig,
    NotificationConfig, NotifyMode, OAuthGatewayConfig, PublicUrls, ServerConfig, WebhookConfig,
};
use payrelay::gateways::services::compute_static_token;
use serde_json::{json, Value};
use url::Url;

pub const FRONTEND_URL: &str = "https://store.example.com";
pub const BACKEND_URL: &str = "https://pay.example.com";

pub const WEBHOOK_USERNAME: &str = "phonepe-hooks";
pub const WEBHOOK_PASSWORD: &str = "s3cret-pass";

pub const CLIENT_ID: &str = "TEST_CLIENT";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const ACCESS_TOKEN: &str = "test-access-token";

pub const MERCHANT_ID: &str = "MERCHANTUAT";
pub const SALT_KEY: &str = "099eb0cd-02cf-4e2a-8aca-3e6c6aff0399";
pub const SALT_INDEX: u32 = 1;

/// Paths served by the gateway mock
pub const TOKEN_PATH: &str = "/identity/oauth/token";
pub const PG_PATH: &str = "/pg";
pub const DISCORD_PATH: &str = "/discord/webhook";

/// Base configuration shared by every test; the gateway is supplied by the caller
fn base_config(gateway: GatewayConfig, discord_uri: Option<&str>, mode: NotifyMode) -> Config {
    Config {
        app: AppConfig {
            env: "test".to_string(),
            log_level: "debug".to_string(),
        },
        server: ServerConfig::new("127.0.0.1".to_string(), 0),
        urls: PublicUrls {
            backend: Url::parse(BACKEND_URL).expect("valid backend URL"),
            frontend: Url::parse(FRONTEND_URL).expect("valid frontend URL"),
        },
        cors: CorsConfig {
            allowed_origins: vec![FRONTEND_URL.to_string()],
        },
        http: HttpClientConfig { timeout_secs: 5 },
        gateway,
        webhook: WebhookConfig {
            username: WEBHOOK_USERNAME.to_string(),
            password: WEBHOOK_PASSWORD.to_string(),
        },
        notifications: NotificationConfig {
            discord_webhook_url: discord_uri.map(|uri| format!("{}{}", uri, DISCORD_PATH)),
            mode,
        },
    }
}

/// OAuth-strategy configuration against a mock gateway at `gateway_uri`
pub fn oauth_config(gateway_uri: &str, discord_uri: Option<&str>, mode: NotifyMode) -> Config {
    base_config(
        GatewayConfig::OAuth(OAuthGatewayConfig {
            client_id: CLIENT_ID.to_string(),
            client_secret: CLIENT_SECRET.to_string(),
            client_version: Some("1".to_string()),
            oauth_url: format!("{}{}", gateway_uri, TOKEN_PATH),
            pg_base_url: format!("{}{}", gateway_uri, PG_PATH),
            order_expiry_secs: 1200,
        }),
        discord_uri,
        mode,
    )
}

/// Checksum-strategy configuration against a mock gateway at `gateway_uri`
pub fn checksum_config(gateway_uri: &str, discord_uri: Option<&str>, mode: NotifyMode) -> Config {
    base_config(
        GatewayConfig::Checksum(ChecksumGatewayConfig {
            merchant_id: MERCHANT_ID.to_string(),
            salt_key: SALT_KEY.to_string(),
            salt_index: SALT_INDEX,
            base_url: gateway_uri.to_string(),
        }),
        discord_uri,
        mode,
    )
}

/// The header value PhonePe sends on webhook calls
pub fn webhook_authorization() -> String {
    compute_static_token(WEBHOOK_USERNAME, WEBHOOK_PASSWORD)
}

pub fn token_response() -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "encrypted_access_token": ACCESS_TOKEN,
        "expires_in": null,
        "issued_at": 1706073005,
        "expires_at": 1706697605,
        "session_expires_at": 1706697605,
        "token_type": "O-Bearer"
    })
}

pub fn checkout_response(merchant_order_id_hint: &str) -> Value {
    json!({
        "orderId": format!("OMO{}", merchant_order_id_hint),
        "state": "PENDING",
        "expireAt": 1703756259307u64,
        "redirectUrl": "https://mercury-uat.phonepe.com/transact/uat_v2?token=abc123"
    })
}

/// A v2 order status body for `state`; only `COMPLETED` carries a transaction
pub fn order_status_response(merchant_order_id: &str, state: &str, amount: i64) -> Value {
    let details = if state == "COMPLETED" {
        json!([
            {
                "paymentMode": "UPI_QR",
                "transactionId": "OM_FAILED_ATTEMPT",
                "state": "FAILED",
                "amount": amount
            },
            {
                "paymentMode": "UPI_QR",
                "transactionId": format!("OM{}", merchant_order_id),
                "state": "COMPLETED",
                "amount": amount
            }
        ])
    } else {
        json!([])
    };

    json!({
        "orderId": format!("OMO{}", merchant_order_id),
        "state": state,
        "amount": amount,
        "expireAt": 1724866793837u64,
        "paymentDetails": details
    })
}

/// A pg v1 status body
pub fn legacy_status_response(merchant_order_id: &str, code: &str, amount: i64) -> Value {
    json!({
        "success": code == "PAYMENT_SUCCESS",
        "code": code,
        "message": "Status fetched",
        "data": {
            "merchantId": MERCHANT_ID,
            "merchantTransactionId": merchant_order_id,
            "transactionId": format!("T{}", merchant_order_id),
            "amount": amount,
            "state": "COMPLETED"
        }
    })
}

/// A pg v1 pay body
pub fn legacy_pay_response() -> Value {
    json!({
        "success": true,
        "code": "PAYMENT_INITIATED",
        "message": "Payment initiated",
        "data": {
            "merchantId": MERCHANT_ID,
            "instrumentResponse": {
                "type": "PAY_PAGE",
                "redirectInfo": {
                    "url": "https://mercury-uat.phonepe.com/transact/simulator?token=xyz",
                    "method": "GET"
                }
            }
        }
    })
}
