use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Ready once a model API key can be resolved.
#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let has_key = state.api_keys.resolve().await.is_some();

    let response = serde_json::json!({
        "status": if has_key { "ready" } else { "not_ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment.to_string(),
        "dependencies": {
            "model_api_key": if has_key { "ok" } else { "missing" }
        }
    });

    if has_key {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
