use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("movie not found")]
    NotFound,

    #[error("not enough seats available ({available} < {requested})")]
    InsufficientSeats { available: i32, requested: i32 },

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

/// JSON body extractor whose rejection is reported through the same
/// error envelope as every other 400.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "Movie not found" })),
            AppError::InsufficientSeats { available, requested } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "Not enough seats available",
                    "available_seats": available,
                    "requested": requested,
                }),
            ),
            AppError::Db(err) => {
                tracing::error!(error = %err, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal server error" }))
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
