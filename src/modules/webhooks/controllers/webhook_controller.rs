use actix_web::{http::header, web, HttpRequest, HttpResponse};
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::gateways::{ChecksumSigner, WebhookAuthenticator};
use crate::modules::webhooks::models::{ChecksumCallback, WebhookEvent, WebhookOutcome};

const X_VERIFY: &str = "X-VERIFY";

/// Receive a gateway webhook
/// POST /webhooks
///
/// # Headers
/// * `Authorization` - `sha256_hex(username:password)` of the configured pair
///
/// # Returns
/// * `200 OK` - `Webhook received`
/// * `400 Bad Request` - Body is not a webhook event
/// * `401 Unauthorized` - Header missing or mismatched
pub async fn receive_webhook(
    req: HttpRequest,
    body: web::Bytes,
    authenticator: web::Data<WebhookAuthenticator>,
) -> Result<HttpResponse> {
    let received = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if !authenticator.verify(received) {
        warn!("Unauthorized webhook attempt");
        return Err(AppError::unauthorized("Invalid webhook credentials"));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Invalid webhook payload: {}", e)))?;

    let order_id = event.order_id().unwrap_or("unknown");
    info!(
        event = %event.event,
        state = ?event.payload.state,
        order_id = order_id,
        "Received PhonePe webhook"
    );

    log_outcome(event.outcome(), order_id);

    Ok(HttpResponse::Ok().body("Webhook received"))
}

/// Receive a pg v1 server-to-server callback
/// POST /webhooks/checksum
///
/// Only routable when the checksum strategy is configured.
///
/// # Headers
/// * `X-VERIFY` - `sha256_hex(response + salt_key)###salt_index`
///
/// # Returns
/// * `200 OK` - `Webhook received`
/// * `400 Bad Request` - Body or decoded response is malformed
/// * `401 Unauthorized` - Header missing or mismatched, or no checksum gateway
pub async fn receive_checksum_callback(
    req: HttpRequest,
    body: web::Bytes,
    signer: Option<web::Data<ChecksumSigner>>,
) -> Result<HttpResponse> {
    let Some(signer) = signer else {
        warn!("Checksum callback received without a checksum gateway");
        return Err(AppError::unauthorized("Invalid webhook credentials"));
    };

    let received = req.headers().get(X_VERIFY).and_then(|h| h.to_str().ok());
    if received.is_none() {
        warn!("Unauthorized checksum callback attempt");
        return Err(AppError::unauthorized("Invalid webhook credentials"));
    }

    let callback: ChecksumCallback = serde_json::from_slice(&body)
        .map_err(|e| AppError::validation(format!("Invalid callback payload: {}", e)))?;

    if !signer.verify_response(received, &callback.response) {
        warn!("Unauthorized checksum callback attempt");
        return Err(AppError::unauthorized("Invalid webhook credentials"));
    }

    let report = callback.decode()?;
    let order_id = report.order_id().unwrap_or("unknown");
    info!(
        code = ?report.code,
        state = ?report.data.state,
        transaction_id = ?report.data.transaction_id,
        order_id = order_id,
        "Received PhonePe checksum callback"
    );

    log_outcome(report.outcome(), order_id);

    Ok(HttpResponse::Ok().body("Webhook received"))
}

fn log_outcome(outcome: WebhookOutcome, order_id: &str) {
    match outcome {
        WebhookOutcome::OrderCompleted => {
            info!(order_id = order_id, "Payment completed for order")
        }
        WebhookOutcome::OrderFailed => warn!(order_id = order_id, "Payment failed for order"),
        WebhookOutcome::Received => {}
    }
}

/// Configure webhook routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/webhooks", web::post().to(receive_webhook))
        .route(
            "/webhooks/checksum",
            web::post().to(receive_checksum_callback),
        );
}
