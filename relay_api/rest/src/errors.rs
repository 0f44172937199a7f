use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::ApiSubmissionResult;

/// Generic message shown whenever the request could not be processed.
pub const SEND_FAILED_MESSAGE: &str = "Erreur lors de l'envoi. Réessaie plus tard.";

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    json(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiSubmissionResult::failure(SEND_FAILED_MESSAGE),
    )
}

/// Json response with an explicit charset that browsers must not sniff.
pub fn json(status: StatusCode, body: impl Serialize) -> Response {
    (
        status,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            ),
            (
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ),
        ],
        Json(body),
    )
        .into_response()
}
