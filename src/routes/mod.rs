//! Tabla de rutas
//!
//! Cada recurso expone su propio router; aquí se combinan bajo el estado
//! compartido junto con las capas de trazas y CORS.

pub mod booking_routes;
pub mod car_routes;
pub mod customer_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::cors_middleware;
use crate::state::AppState;

/// Crear el router principal de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/customers", customer_routes::create_customer_router())
        .nest("/cars", car_routes::create_car_router())
        .nest("/bookings", booking_routes::create_booking_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Endpoint de salud
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
