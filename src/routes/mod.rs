//! HTTP routes
//! Router construction, shared state and error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::service::{AdpError, AdpService};

pub mod adp;
pub mod health;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AdpService>,
}

pub fn build_router(service: AdpService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/adp", get(adp::adp_handler))
        .route("/health", get(health::health_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

impl IntoResponse for AdpError {
    fn into_response(self) -> Response {
        let status = match self {
            AdpError::NotFound => StatusCode::NOT_FOUND,
            AdpError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
