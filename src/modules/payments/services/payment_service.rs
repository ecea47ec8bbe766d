use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};
use url::Url;

use crate::config::{NotifyMode, PublicUrls};
use crate::core::{Amount, Result};
use crate::modules::gateways::models::{is_valid_merchant_order_id, CheckoutOrder, OrderStatus};
use crate::modules::gateways::PaymentGateway;
use crate::modules::notifications::{status_message, DiscordNotifier};

/// Caller-facing context of every `/pay` upstream failure
pub const INITIATE_FAILURE: &str = "Failed to initiate payment";

/// Segment of the generic error status page
const ERROR_SEGMENT: &str = "ERROR";

/// Placeholder the frontend expects when there is no transaction id
const NULL_TXN_ID: &str = "Null";

/// Relays checkout creation and status checks to the configured gateway
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    notifier: DiscordNotifier,
    notify_mode: NotifyMode,
    urls: PublicUrls,
}

impl PaymentService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        notifier: DiscordNotifier,
        notify_mode: NotifyMode,
        urls: PublicUrls,
    ) -> Self {
        Self {
            gateway,
            notifier,
            notify_mode,
            urls,
        }
    }

    /// Create a checkout and return the gateway's response unchanged
    pub async fn initiate(&self, amount: Amount) -> Result<Value> {
        let order = CheckoutOrder::new(amount, &self.urls.backend)?;

        info!(
            gateway = self.gateway.name(),
            merchant_order_id = %order.merchant_order_id,
            amount = %order.amount,
            "Initiating payment"
        );

        self.gateway.create_checkout(&order).await.map_err(|e| {
            error!(
                gateway = self.gateway.name(),
                merchant_order_id = %order.merchant_order_id,
                error = %e,
                "Payment initiation failed"
            );
            e.into_upstream(INITIATE_FAILURE)
        })
    }

    /// Check an order's status, notify, and return the frontend URL to
    /// redirect the browser to. Never fails: upstream errors land on the
    /// generic error page.
    pub async fn status_redirect(&self, merchant_order_id: &str) -> String {
        if !is_valid_merchant_order_id(merchant_order_id) {
            warn!(merchant_order_id = merchant_order_id, "Rejecting malformed merchant order id");
            return self.error_redirect(None);
        }

        let status = match self.gateway.order_status(merchant_order_id).await {
            Ok(status) => status,
            Err(e) => {
                error!(
                    gateway = self.gateway.name(),
                    merchant_order_id = merchant_order_id,
                    error = %e,
                    "Payment status check failed"
                );
                return self.error_redirect(Some(merchant_order_id));
            }
        };

        info!(
            gateway = self.gateway.name(),
            merchant_order_id = merchant_order_id,
            status = %status.status,
            "Payment status retrieved"
        );

        self.notify(&status).await;

        frontend_status_url(
            &self.urls.frontend,
            status.status.redirect_segment(),
            Some((
                status.redirect_transaction_id().unwrap_or(NULL_TXN_ID),
                merchant_order_id,
            )),
        )
    }

    /// Generic error page, with the order id when one is known
    pub fn error_redirect(&self, merchant_order_id: Option<&str>) -> String {
        frontend_status_url(
            &self.urls.frontend,
            ERROR_SEGMENT,
            merchant_order_id.map(|id| (NULL_TXN_ID, id)),
        )
    }

    async fn notify(&self, status: &OrderStatus) {
        if !self.notifier.is_enabled() {
            return;
        }

        let content = status_message(status, chrono::Local::now());
        match self.notify_mode {
            NotifyMode::Inline => {
                self.notifier.send(&content).await;
            }
            NotifyMode::Background => {
                let notifier = self.notifier.clone();
                actix_web::rt::spawn(async move {
                    notifier.send(&content).await;
                });
            }
        }
    }
}

/// `<frontend>/payment/status/<segment>[?TxnId=..&merchantOrderId=..]`
pub fn frontend_status_url(
    frontend: &Url,
    segment: &str,
    query: Option<(&str, &str)>,
) -> String {
    let mut url = frontend.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(["payment", "status", segment]);
    }

    url.set_query(None);
    if let Some((txn_id, merchant_order_id)) = query {
        url.query_pairs_mut()
            .append_pair("TxnId", txn_id)
            .append_pair("merchantOrderId", merchant_order_id);
    }

    url.to_string()
}
