use actix_web::{http::header, web, Either, HttpResponse};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::core::{Amount, Result};
use crate::modules::payments::services::PaymentService;

/// JSON body of `POST /pay`
#[derive(Debug, Deserialize)]
pub struct PayRequest {
    #[serde(default)]
    pub amount: Option<Value>,
}

/// Form body of `POST /pay`
#[derive(Debug, Deserialize)]
pub struct PayForm {
    pub amount: Option<String>,
}

/// Initiate a payment
/// POST /pay
///
/// Returns the gateway's checkout response unchanged. 400 when the amount is
/// missing, non-numeric or not positive; 500 with `details` when the gateway
/// call chain fails.
pub async fn initiate_payment(
    service: web::Data<PaymentService>,
    body: Either<web::Json<PayRequest>, web::Form<PayForm>>,
) -> Result<HttpResponse> {
    let amount = match body {
        Either::Left(json) => json.into_inner().amount,
        Either::Right(form) => form.into_inner().amount.map(Value::String),
    };

    let amount = Amount::from_json(amount.as_ref()).map_err(|e| {
        warn!(amount = ?amount, "Invalid amount");
        e
    })?;

    let response = service.initiate(amount).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Check a payment and send the browser to the frontend status page
/// GET|POST /payment/status/{merchant_order_id}
pub async fn payment_status(
    service: web::Data<PaymentService>,
    path: web::Path<String>,
) -> HttpResponse {
    let merchant_order_id = path.into_inner();
    let location = service.status_redirect(&merchant_order_id).await;
    redirect(location)
}

/// Status callback without an order id
/// GET|POST /payment/status
pub async fn missing_order_id(service: web::Data<PaymentService>) -> HttpResponse {
    warn!("Missing merchantOrderId");
    redirect(service.error_redirect(None))
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Configure payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/pay", web::post().to(initiate_payment))
        .service(
            web::resource("/payment/status/{merchant_order_id}")
                .route(web::get().to(payment_status))
                .route(web::post().to(payment_status)),
        )
        .service(
            web::resource(["/payment/status", "/payment/status/"])
                .route(web::get().to(missing_order_id))
                .route(web::post().to(missing_order_id)),
        );
}
