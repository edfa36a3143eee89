use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;

use crate::constants::START_TIME;

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the plog API",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health")]
pub async fn health() -> impl Responder {
    let uptime_secs = (Utc::now() - *START_TIME).num_seconds();

    HttpResponse::Ok().json(serde_json::json!({
        "status": "Ok",
        "uptime_secs": uptime_secs,
    }))
}
