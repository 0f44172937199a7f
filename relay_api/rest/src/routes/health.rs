use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, routing, Router};
use relay_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

use crate::errors::json;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let HealthStatus { email } = service.get_status().await;

    let status = if email {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    json(status, HealthResponse { http: true, email })
}
