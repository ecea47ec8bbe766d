use base64::prelude::*;
use serde::Deserialize;
use serde_json::Value;

use crate::core::{AppError, Result};
use crate::modules::gateways::models::PaymentStatus;

/// Inbound gateway webhook body
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    #[serde(default)]
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub state: Option<String>,
    pub order_id: Option<String>,
    pub original_merchant_order_id: Option<String>,
    pub merchant_order_id: Option<String>,
    pub amount: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// What a webhook means for the order it refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    OrderCompleted,
    OrderFailed,
    /// Any other event/state combination; logged only
    Received,
}

impl WebhookEvent {
    pub fn outcome(&self) -> WebhookOutcome {
        let status = self
            .payload
            .state
            .as_deref()
            .map(PaymentStatus::from_gateway);

        match (self.event.as_str(), status) {
            ("checkout.order.completed", Some(PaymentStatus::Completed)) => {
                WebhookOutcome::OrderCompleted
            }
            ("checkout.order.failed", Some(PaymentStatus::Failed)) => WebhookOutcome::OrderFailed,
            _ => WebhookOutcome::Received,
        }
    }

    /// Gateway order id, falling back to the merchant's ids
    pub fn order_id(&self) -> Option<&str> {
        self.payload
            .order_id
            .as_deref()
            .or(self.payload.original_merchant_order_id.as_deref())
            .or(self.payload.merchant_order_id.as_deref())
    }
}

/// Body of a pg v1 server-to-server callback
#[derive(Debug, Clone, Deserialize)]
pub struct ChecksumCallback {
    /// Base64 of the JSON status report; covered by `X-VERIFY`
    pub response: String,
}

/// Decoded pg v1 callback report
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChecksumCallbackReport {
    pub code: Option<String>,
    #[serde(default)]
    pub data: ChecksumCallbackData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecksumCallbackData {
    pub merchant_transaction_id: Option<String>,
    pub transaction_id: Option<String>,
    pub amount: Option<i64>,
    pub state: Option<String>,
}

impl ChecksumCallback {
    pub fn decode(&self) -> Result<ChecksumCallbackReport> {
        let raw = BASE64_STANDARD
            .decode(self.response.trim())
            .map_err(|e| AppError::validation(format!("Invalid callback response: {}", e)))?;
        serde_json::from_slice(&raw)
            .map_err(|e| AppError::validation(format!("Invalid callback response: {}", e)))
    }
}

impl ChecksumCallbackReport {
    /// `code` is authoritative; `data.state` is used when it is absent
    pub fn status(&self) -> PaymentStatus {
        self.code
            .as_deref()
            .or(self.data.state.as_deref())
            .map(PaymentStatus::from_gateway)
            .unwrap_or(PaymentStatus::Unknown)
    }

    pub fn outcome(&self) -> WebhookOutcome {
        match self.status() {
            PaymentStatus::Completed => WebhookOutcome::OrderCompleted,
            PaymentStatus::Failed => WebhookOutcome::OrderFailed,
            PaymentStatus::Pending | PaymentStatus::Unknown => WebhookOutcome::Received,
        }
    }

    pub fn order_id(&self) -> Option<&str> {
        self.data.merchant_transaction_id.as_deref()
    }
}
