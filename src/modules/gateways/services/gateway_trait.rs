use crate::core::Result;
use crate::modules::gateways::models::{CheckoutOrder, OrderStatus};
use async_trait::async_trait;
use serde_json::Value;

/// Payment gateway trait for creating checkouts and polling their status
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a checkout and return the gateway's response body unchanged
    async fn create_checkout(&self, order: &CheckoutOrder) -> Result<Value>;

    /// Fetch and decode the status of a previously created order
    async fn order_status(&self, merchant_order_id: &str) -> Result<OrderStatus>;

    /// Get gateway name
    fn name(&self) -> &str;
}
