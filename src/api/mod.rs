//! HTTP surface: `POST /classify-ticket/`.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::context::AppContext;
use crate::domain::ticket::{ClassificationResult, TicketInput};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/classify-ticket/", post(classify_ticket))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// POST /classify-ticket/
async fn classify_ticket(
    State(ctx): State<AppContext>,
    payload: Result<Json<TicketInput>, JsonRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let Json(input) = payload?;
    let result = ctx.classifier.classify(&input.ticket_text).await?;
    Ok(Json(result))
}

/// Every failure leaves the handler as an `{"error": ...}` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(JsonRejection),
    Classification(AppError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection)
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError::Classification(err)
    }
}

impl ApiError {
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ApiError::Classification(err) => classification_failure(err),
        }
    }
}

pub fn classification_failure(err: &AppError) -> (StatusCode, String) {
    match err {
        AppError::Configuration(message) => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        AppError::Provider(_) | AppError::Parse { .. } | AppError::Validation { .. } => {
            (StatusCode::BAD_GATEWAY, unexpected(err))
        }
        AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, unexpected(err)),
    }
}

fn unexpected(err: &AppError) -> String {
    format!("An unexpected error occurred: {err}")
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        warn!(status = status.as_u16(), %error, "classification request failed");
        (status, Json(ErrorResponse { error })).into_response()
    }
}
