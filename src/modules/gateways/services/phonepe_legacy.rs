use super::auth_verifier::{ChecksumSigner, RequestAuth};
use super::gateway_trait::PaymentGateway;
use super::http::{join_url, send_json};
use crate::config::ChecksumGatewayConfig;
use crate::core::{AppError, Result};
use crate::modules::gateways::models::{CheckoutOrder, OrderStatus, PaymentStatus};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

const GATEWAY_NAME: &str = "phonepe-legacy";
const PAY_PATH: &str = "/pg/v1/pay";

/// PhonePe pg v1 client (checksum-signed)
///
/// Request bodies are sent as `{"request": base64(json)}` and every call
/// carries `X-VERIFY: sha256(body + path + salt_key)###salt_index`.
pub struct PhonePeLegacyClient {
    client: Client,
    merchant_id: String,
    base_url: String,
    signer: ChecksumSigner,
}

impl PhonePeLegacyClient {
    pub fn new(client: Client, config: ChecksumGatewayConfig) -> Self {
        Self {
            client,
            signer: ChecksumSigner::new(config.salt_key, config.salt_index),
            merchant_id: config.merchant_id,
            base_url: config.base_url,
        }
    }

    fn pay_request(&self, order: &CheckoutOrder) -> PayRequest {
        PayRequest {
            merchant_id: self.merchant_id.clone(),
            merchant_transaction_id: order.merchant_order_id.clone(),
            merchant_user_id: format!("MUID-{}", order.merchant_order_id),
            amount: order.amount.to_paise(),
            redirect_url: order.redirect_url.clone(),
            redirect_mode: "POST",
            callback_url: order.callback_url.clone(),
            payment_instrument: PaymentInstrument {
                instrument_type: "PAY_PAGE",
            },
        }
    }

    fn status_path(&self, merchant_order_id: &str) -> String {
        format!("/pg/v1/status/{}/{}", self.merchant_id, merchant_order_id)
    }
}

#[async_trait]
impl PaymentGateway for PhonePeLegacyClient {
    async fn create_checkout(&self, order: &CheckoutOrder) -> Result<Value> {
        let payload = self.pay_request(order);
        let signed = self.signer.sign_payload(&payload, PAY_PATH)?;
        let (header, value) = RequestAuth::Checksum(signed.x_verify).header();

        debug!(
            merchant_order_id = %order.merchant_order_id,
            "Sending PhonePe pg v1 pay request"
        );

        let response = send_json(
            self.client
                .post(join_url(&self.base_url, PAY_PATH))
                .header(header, value)
                .json(&json!({ "request": signed.encoded_payload })),
            GATEWAY_NAME,
            "pay",
        )
        .await?;

        info!(
            merchant_order_id = %order.merchant_order_id,
            amount = %order.amount,
            "PhonePe pg v1 payment initiated"
        );

        Ok(response)
    }

    async fn order_status(&self, merchant_order_id: &str) -> Result<OrderStatus> {
        let path = self.status_path(merchant_order_id);
        let (header, value) = RequestAuth::Checksum(self.signer.sign_path(&path)).header();

        let body = send_json(
            self.client
                .get(join_url(&self.base_url, &path))
                .header(header, value)
                .header("X-MERCHANT-ID", self.merchant_id.as_str()),
            GATEWAY_NAME,
            "status check",
        )
        .await?;

        decode_status(merchant_order_id, body)
    }

    fn name(&self) -> &str {
        GATEWAY_NAME
    }
}

/// Decode a pg v1 status body.
///
/// `code` is authoritative; `data.state` is used when `code` is absent.
pub fn decode_status(merchant_order_id: &str, body: Value) -> Result<OrderStatus> {
    if !body.is_object() {
        return Err(AppError::gateway(
            "Unexpected PhonePe pg v1 status response: not a JSON object",
        ));
    }

    let decoded: StatusResponse = serde_json::from_value(body.clone()).map_err(|e| {
        AppError::gateway(format!("Unexpected PhonePe pg v1 status response: {}", e))
    })?;
    let data = decoded.data.unwrap_or_default();

    let status = decoded
        .code
        .as_deref()
        .or(data.state.as_deref())
        .map(PaymentStatus::from_gateway)
        .unwrap_or(PaymentStatus::Unknown);

    Ok(OrderStatus {
        merchant_order_id: merchant_order_id.to_string(),
        status,
        amount: data.amount,
        transaction_id: data.transaction_id.filter(|id| !id.is_empty()),
        raw_response: body,
    })
}

// PhonePe pg v1 request/response structures

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PayRequest {
    merchant_id: String,
    merchant_transaction_id: String,
    merchant_user_id: String,
    amount: i64,
    redirect_url: String,
    redirect_mode: &'static str,
    callback_url: String,
    payment_instrument: PaymentInstrument,
}

#[derive(Debug, Serialize)]
struct PaymentInstrument {
    #[serde(rename = "type")]
    instrument_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    code: Option<String>,
    data: Option<StatusData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusData {
    state: Option<String>,
    amount: Option<i64>,
    transaction_id: Option<String>,
}
