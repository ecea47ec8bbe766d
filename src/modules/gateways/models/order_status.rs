use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Outcome of a payment as reported by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Completed,
    Failed,
    Pending,
    Unknown,
}

impl PaymentStatus {
    /// Map a gateway state or response code.
    ///
    /// Checkout v2 reports `state` (`COMPLETED`, `FAILED`, `PENDING`); the
    /// legacy API reports `code` (`PAYMENT_SUCCESS`, `PAYMENT_ERROR`,
    /// `PAYMENT_PENDING`, ...). Anything else is `Unknown`.
    pub fn from_gateway(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "COMPLETED" | "PAYMENT_SUCCESS" => PaymentStatus::Completed,
            "FAILED" | "PAYMENT_ERROR" | "PAYMENT_DECLINED" | "TIMED_OUT" => PaymentStatus::Failed,
            "PENDING" | "PAYMENT_PENDING" => PaymentStatus::Pending,
            _ => PaymentStatus::Unknown,
        }
    }

    /// Path segment of the frontend status page
    pub fn redirect_segment(&self) -> &'static str {
        match self {
            PaymentStatus::Completed => "PAYMENT_SUCCESS",
            PaymentStatus::Failed => "PAYMENT_ERROR",
            PaymentStatus::Pending => "PAYMENT_PENDING",
            PaymentStatus::Unknown => "ERROR",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Completed => write!(f, "completed"),
            PaymentStatus::Failed => write!(f, "failed"),
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Decoded order-status response
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatus {
    pub merchant_order_id: String,
    pub status: PaymentStatus,
    /// Amount in paise, when reported
    pub amount: Option<i64>,
    pub transaction_id: Option<String>,
    /// Full gateway response (JSON)
    pub raw_response: Value,
}

impl OrderStatus {
    /// Transaction id to expose to the frontend; only meaningful on success
    pub fn redirect_transaction_id(&self) -> Option<&str> {
        match self.status {
            PaymentStatus::Completed => self.transaction_id.as_deref(),
            _ => None,
        }
    }
}

/// Pull `transactionId` out of a `paymentDetails` field.
///
/// The field is an array of attempts on checkout v2 (the last attempt that
/// carries an id wins) and a plain object on some older responses.
pub fn transaction_id_from_details(details: &Value) -> Option<String> {
    match details {
        Value::Array(attempts) => attempts.iter().rev().find_map(transaction_id_of),
        Value::Object(_) => transaction_id_of(details),
        _ => None,
    }
}

fn transaction_id_of(value: &Value) -> Option<String> {
    value
        .get("transactionId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
