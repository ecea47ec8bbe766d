use std::time::Duration;

use actix_web::web;

use crate::config::{Config, GatewayConfig};
use crate::core::Result;
use crate::modules::gateways::services::{
    build_client, build_gateway, ChecksumSigner, WebhookAuthenticator,
};
use crate::modules::health::ServiceInfo;
use crate::modules::notifications::DiscordNotifier;
use crate::modules::payments::PaymentService;

/// Shared, read-only state built once at startup and handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub payments: web::Data<PaymentService>,
    pub webhook_auth: web::Data<WebhookAuthenticator>,
    pub service_info: web::Data<ServiceInfo>,
    /// Present only for the checksum strategy; verifies pg v1 callbacks
    pub checksum_signer: Option<web::Data<ChecksumSigner>>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_client(Duration::from_secs(config.http.timeout_secs))?;

        let gateway = build_gateway(&config.gateway, client.clone());
        let notifier = DiscordNotifier::new(client, config.notifications.discord_webhook_url.clone());

        let service_info = ServiceInfo {
            environment: config.app.env.clone(),
            gateway: gateway.name().to_string(),
            gateway_strategy: config.gateway.strategy().to_string(),
            notifications_enabled: notifier.is_enabled(),
        };

        let payments = PaymentService::new(
            gateway,
            notifier,
            config.notifications.mode,
            config.urls.clone(),
        );

        let checksum_signer = match &config.gateway {
            GatewayConfig::Checksum(checksum) => Some(web::Data::new(ChecksumSigner::new(
                checksum.salt_key.clone(),
                checksum.salt_index,
            ))),
            GatewayConfig::OAuth(_) => None,
        };

        Ok(Self {
            payments: web::Data::new(payments),
            webhook_auth: web::Data::new(WebhookAuthenticator::from_config(&config.webhook)),
            service_info: web::Data::new(service_info),
            checksum_signer,
        })
    }

    /// Register app data and all routes
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.payments.clone())
            .app_data(self.webhook_auth.clone())
            .app_data(self.service_info.clone());
        if let Some(signer) = &self.checksum_signer {
            cfg.app_data(signer.clone());
        }
        cfg.configure(crate::modules::configure);
    }
}
