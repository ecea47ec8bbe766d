use url::Url;
use uuid::Uuid;

use crate::core::{Amount, AppError, Result};

/// A checkout to be created with the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutOrder {
    pub merchant_order_id: String,
    pub amount: Amount,
    /// Where the gateway sends the browser once the payment is done
    pub redirect_url: String,
    /// Server-to-server notification target (`<backend>/webhooks/checksum`)
    pub callback_url: String,
}

impl CheckoutOrder {
    /// Build an order with a fresh merchant order id, returning to
    /// `<backend>/payment/status/<merchant order id>`
    pub fn new(amount: Amount, backend: &Url) -> Result<Self> {
        let merchant_order_id = generate_merchant_order_id();
        let redirect_url = status_callback_url(backend, &merchant_order_id)?;
        let callback_url = checksum_callback_url(backend)?;

        Ok(Self {
            merchant_order_id,
            amount,
            redirect_url,
            callback_url,
        })
    }
}

/// `ORDER-<unix millis>-<8 hex chars>`; at most 63 characters of `[A-Za-z0-9_-]`
pub fn generate_merchant_order_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "ORDER-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        &suffix[..8]
    )
}

/// Whether `id` is a merchant order id the gateway would accept
pub fn is_valid_merchant_order_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 63
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `<backend>/payment/status/<merchant order id>`
pub fn status_callback_url(backend: &Url, merchant_order_id: &str) -> Result<String> {
    append_segments(backend, &["payment", "status", merchant_order_id])
}

/// `<backend>/webhooks/checksum`, where signed pg v1 callbacks land
pub fn checksum_callback_url(backend: &Url) -> Result<String> {
    append_segments(backend, &["webhooks", "checksum"])
}

fn append_segments(base: &Url, segments: &[&str]) -> Result<String> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| AppError::internal("Backend URL cannot be a base"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}
