pub mod routes;

use crate::errors::PricingError;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use std::sync::Arc;

/// API routes plus the static dashboard, with CORS and request tracing.
pub fn build_router(state: Arc<AppState>) -> axum::Router {
    let dashboard_dir = state.config.dashboard_dir.clone();
    let index = dashboard_dir.join("index.html");

    axum::Router::new()
        .route("/api/price", get(routes::get_price))
        .route("/api/heatmap", get(routes::get_heatmap))
        .route("/api/validate", get(routes::get_validate))
        .route("/api/counters", get(routes::get_counters))
        .fallback_service(
            tower_http::services::ServeDir::new(dashboard_dir)
                .fallback(tower_http::services::ServeFile::new(index)),
        )
        .layer(
            tower::ServiceBuilder::new()
                .layer(tower_http::trace::TraceLayer::new_for_http())
                .layer(
                    tower_http::cors::CorsLayer::new()
                        .allow_origin(tower_http::cors::Any)
                        .allow_methods(tower_http::cors::Any)
                        .allow_headers(tower_http::cors::Any),
                ),
        )
        .with_state(state)
}

/// Bad user input is a 400 with the message; anything else is a 500.
impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let status = match self {
            PricingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            PricingError::Config(_) | PricingError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
