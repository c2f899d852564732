//! Rutas de la API
//!
//! Este módulo arma el router principal con los sub-routers por recurso.

pub mod poi_routes;
pub mod route_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/about", get(about_endpoint))
        .nest("/pois", poi_routes::create_poi_router())
        .nest("/routes", route_routes::create_route_router())
}

/// Información del servicio
async fn about_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "poi-routing-api",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
