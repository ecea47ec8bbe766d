use super::auth_verifier::RequestAuth;
use super::gateway_trait::PaymentGateway;
use super::http::{join_url, send_json};
use crate::config::OAuthGatewayConfig;
use crate::core::{AppError, Result};
use crate::modules::gateways::models::{
    transaction_id_from_details, CheckoutOrder, OrderStatus, PaymentStatus, TokenOutcome,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

const GATEWAY_NAME: &str = "phonepe";
const CHECKOUT_PATH: &str = "/checkout/v2/pay";

/// PhonePe checkout v2 client
///
/// Every call first exchanges the client credentials for an access token and
/// then sends `Authorization: O-Bearer <token>`. Tokens are not cached.
pub struct PhonePeClient {
    client: Client,
    config: OAuthGatewayConfig,
}

impl PhonePeClient {
    pub fn new(client: Client, config: OAuthGatewayConfig) -> Self {
        Self { client, config }
    }

    /// Client-credentials exchange against the identity endpoint
    pub async fn fetch_token(&self) -> Result<TokenOutcome> {
        let mut form = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];
        if let Some(version) = &self.config.client_version {
            form.push(("client_version", version.as_str()));
        }

        let body = send_json(
            self.client.post(&self.config.oauth_url).form(&form),
            GATEWAY_NAME,
            "token exchange",
        )
        .await?;

        Ok(TokenOutcome::from_response(body))
    }

    async fn authorize(&self) -> Result<RequestAuth> {
        match self.fetch_token().await? {
            TokenOutcome::Success {
                access_token,
                expires_at,
            } => {
                debug!(expires_at = ?expires_at, "Obtained PhonePe access token");
                Ok(RequestAuth::Bearer(access_token))
            }
            TokenOutcome::Failure { details } => Err(AppError::upstream(
                "PhonePe token exchange returned no access token",
                details,
            )),
        }
    }

    fn checkout_request(&self, order: &CheckoutOrder) -> CheckoutRequest {
        CheckoutRequest {
            merchant_order_id: order.merchant_order_id.clone(),
            amount: order.amount.to_paise(),
            currency: "INR",
            expire_after: self.config.order_expiry_secs,
            payment_flow: PaymentFlow {
                flow_type: "PG_CHECKOUT",
                message: "Payment message used for collect requests",
                merchant_urls: MerchantUrls {
                    redirect_url: order.redirect_url.clone(),
                },
            },
        }
    }

    fn status_url(&self, merchant_order_id: &str) -> String {
        join_url(
            &self.config.pg_base_url,
            &format!("/checkout/v2/order/{}/status", merchant_order_id),
        )
    }
}

#[async_trait]
impl PaymentGateway for PhonePeClient {
    async fn create_checkout(&self, order: &CheckoutOrder) -> Result<Value> {
        let auth = self.authorize().await?;
        let request = self.checkout_request(order);
        let (header, value) = auth.header();

        debug!(
            merchant_order_id = %order.merchant_order_id,
            payload = ?serde_json::to_string(&request).ok(),
            "Sending PhonePe checkout request"
        );

        let response = send_json(
            self.client
                .post(join_url(&self.config.pg_base_url, CHECKOUT_PATH))
                .header(header, value)
                .json(&request),
            GATEWAY_NAME,
            "checkout",
        )
        .await?;

        info!(
            merchant_order_id = %order.merchant_order_id,
            amount = %order.amount,
            "PhonePe checkout created"
        );

        Ok(response)
    }

    async fn order_status(&self, merchant_order_id: &str) -> Result<OrderStatus> {
        let auth = self.authorize().await?;
        let (header, value) = auth.header();

        let body = send_json(
            self.client
                .get(self.status_url(merchant_order_id))
                .header(header, value),
            GATEWAY_NAME,
            "order status",
        )
        .await?;

        decode_status(merchant_order_id, body)
    }

    fn name(&self) -> &str {
        GATEWAY_NAME
    }
}

/// Decode a checkout v2 order-status body
pub fn decode_status(merchant_order_id: &str, body: Value) -> Result<OrderStatus> {
    if !body.is_object() {
        return Err(AppError::gateway(
            "Unexpected PhonePe status response: not a JSON object",
        ));
    }

    let decoded: CheckoutStatusResponse = serde_json::from_value(body.clone())
        .map_err(|e| AppError::gateway(format!("Unexpected PhonePe status response: {}", e)))?;

    let status = decoded
        .state
        .as_deref()
        .map(PaymentStatus::from_gateway)
        .unwrap_or(PaymentStatus::Unknown);

    Ok(OrderStatus {
        merchant_order_id: merchant_order_id.to_string(),
        status,
        amount: decoded.amount,
        transaction_id: transaction_id_from_details(&decoded.payment_details),
        raw_response: body,
    })
}

// PhonePe checkout v2 request/response structures

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest {
    merchant_order_id: String,
    amount: i64,
    currency: &'static str,
    expire_after: u32,
    payment_flow: PaymentFlow,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentFlow {
    #[serde(rename = "type")]
    flow_type: &'static str,
    message: &'static str,
    merchant_urls: MerchantUrls,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MerchantUrls {
    redirect_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutStatusResponse {
    state: Option<String>,
    amount: Option<i64>,
    #[serde(default)]
    payment_details: Value,
}
