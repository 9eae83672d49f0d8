use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;

use crate::models::AppName;

pub struct AppState {
    pub app_name: String,
    pub app_version: String,
}

// ==================== Health Check ====================

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

// ==================== App Metadata ====================

/// Static app metadata for the client shell.
pub async fn app_name(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(AppName {
        name: state.app_name.clone(),
        version: state.app_version.clone(),
        is_beta: true,
    })
}

// ==================== Route Configuration ====================

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/api/name", web::get().to(app_name));
}
