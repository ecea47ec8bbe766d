pub mod gateways;
pub mod health;
pub mod notifications;
pub mod payments;
pub mod webhooks;

use actix_web::web;

/// Register every module's routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(payments::configure)
        .configure(webhooks::configure);
}
