use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Liveness probe; does not touch the store.
#[get("/api/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": product_core::core_version(),
    }))
}
