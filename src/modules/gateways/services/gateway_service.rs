use std::sync::Arc;

use reqwest::Client;
use tracing::info;

use super::gateway_trait::PaymentGateway;
use super::phonepe::PhonePeClient;
use super::phonepe_legacy::PhonePeLegacyClient;
use crate::config::GatewayConfig;

/// Build the gateway client for the configured authentication strategy
pub fn build_gateway(config: &GatewayConfig, client: Client) -> Arc<dyn PaymentGateway> {
    let gateway: Arc<dyn PaymentGateway> = match config {
        GatewayConfig::OAuth(oauth) => Arc::new(PhonePeClient::new(client, oauth.clone())),
        GatewayConfig::Checksum(checksum) => {
            Arc::new(PhonePeLegacyClient::new(client, checksum.clone()))
        }
    };

    info!(
        gateway = gateway.name(),
        strategy = config.strategy(),
        "Payment gateway configured"
    );

    gateway
}
