use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

/// Static facts about this deployment, reported by `/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub environment: String,
    pub gateway: String,
    pub gateway_strategy: String,
    pub notifications_enabled: bool,
}

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: ServiceInfo,
}

/// GET / - Welcome banner
pub async fn index() -> impl Responder {
    HttpResponse::Ok().body("Welcome to the PhonePe Payment API")
}

/// GET /health - Liveness probe
/// Returns 200 if the application is alive (can respond to requests).
/// Does not call the gateway.
pub async fn health_check(info: web::Data<ServiceInfo>) -> impl Responder {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: info.get_ref().clone(),
    };

    HttpResponse::Ok().json(response)
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health_check));
}
