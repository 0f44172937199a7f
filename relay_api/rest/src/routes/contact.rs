use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::Response,
    routing, Router,
};
use relay_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactSubmitOutcome,
};
use tracing::debug;

use crate::{
    errors::{internal_server_error, json, SEND_FAILED_MESSAGE},
    extractors::contact_form::ContactForm,
    models::ApiSubmissionResult,
};

/// Largest accepted request body. Bigger bodies are read as an empty form.
pub const BODY_LIMIT: usize = 16 * 1024;

pub fn router(path: &str, service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(path, routing::post(submit).fallback(method_not_allowed))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    ContactForm(form): ContactForm,
) -> Response {
    match service.submit(form.into()).await {
        Ok(ContactSubmitOutcome::Delivered) => json(
            StatusCode::OK,
            ApiSubmissionResult::success("Message envoyé avec succès."),
        ),
        Ok(ContactSubmitOutcome::Discarded) => {
            json(StatusCode::OK, ApiSubmissionResult::discarded())
        }
        Err(ContactSubmitError::Validation(violations)) => {
            debug!("rejecting invalid submission: {violations}");
            json(
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiSubmissionResult::failure(violations.to_string()),
            )
        }
        Err(ContactSubmitError::Send) => json(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiSubmissionResult::failure(SEND_FAILED_MESSAGE),
        ),
        Err(ContactSubmitError::Other(err)) => internal_server_error(err),
    }
}

async fn method_not_allowed() -> Response {
    json(
        StatusCode::METHOD_NOT_ALLOWED,
        ApiSubmissionResult::failure("Méthode non autorisée."),
    )
}
