use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use log::{error, warn};
use serde::Serialize;

use crate::common::CleaningResult;
use crate::error::UnaffiliateError;
use crate::link_utils::Fetcher;
use crate::unaffiliator::Unaffiliator;

/// Bodies over the unaffiliator's size limit are cut off while buffering,
/// so they never get held in memory whole.
pub fn router<F: Fetcher + 'static>(unaffiliator: Unaffiliator<F>) -> Router {
    let body_limit = unaffiliator.max_request_size();

    Router::new()
        .route("/health", get(health))
        .route("/api/unaffiliate", post(unaffiliate::<F>))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(Arc::new(unaffiliator))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

async fn unaffiliate<F: Fetcher + 'static>(
    State(unaffiliator): State<Arc<Unaffiliator<F>>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CleaningResult>, ApiError> {
    let body = body.map_err(|rejection| body_error(rejection, unaffiliator.max_request_size()))?;
    let result = unaffiliator.handle(&body).await?;
    Ok(Json(result))
}

fn body_error(rejection: BytesRejection, limit: usize) -> UnaffiliateError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UnaffiliateError::BodyTooLarge { limit }
    } else {
        UnaffiliateError::UnreadableBody(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] UnaffiliateError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status =
            StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!("Failed to process request: {}", err);
        } else {
            warn!("Rejected request: {}", err);
        }

        let body = ErrorBody {
            error: err.public_message(),
        };
        (status, Json(body)).into_response()
    }
}
