//! HTTP surface: `GET /uid` answers with a fresh id as plain text.

use crate::IdGenerator;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tracing::debug;

/// Build the router serving ids from `generator`.
pub fn router(generator: Arc<IdGenerator>) -> Router {
    Router::new()
        .route("/uid", get(generate_uid))
        .with_state(generator)
}

/// `200` with the decimal id on success, `204` with an empty body on any failure.
async fn generate_uid(State(generator): State<Arc<IdGenerator>>) -> Response {
    match generator.generate_uid() {
        Ok(id) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            id.to_string(),
        )
            .into_response(),
        Err(e) => {
            debug!(error = %e, "could not generate id");
            StatusCode::NO_CONTENT.into_response()
        }
    }
}
