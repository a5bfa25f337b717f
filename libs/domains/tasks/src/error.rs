use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i32),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            TaskError::InvalidArgument(msg) => AppError::BadRequest(msg),
            TaskError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
        }
    }
}

/// Not-found and invalid-argument keep the bodies existing clients parse:
/// an empty 404 and `{"Erro": "..."}`. Everything else goes through
/// [`AppError`].
impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        match self {
            TaskError::NotFound(id) => {
                tracing::info!(task_id = id, "Task not found");
                StatusCode::NOT_FOUND.into_response()
            }
            TaskError::InvalidArgument(msg) => {
                tracing::info!("Rejected task: {}", msg);
                (StatusCode::BAD_REQUEST, Json(json!({ "Erro": msg }))).into_response()
            }
            other => AppError::from(other).into_response(),
        }
    }
}

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Database(err.to_string())
    }
}
