use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Template(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Renders an AppError as the API's `{"result": "error", "message": ...}` envelope.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) | AppError::Auth(msg) => {
                msg.clone()
            }
            AppError::MethodNotAllowed => self.to_string(),
            AppError::Database(_)
            | AppError::Storage(_)
            | AppError::Template(_)
            | AppError::Internal(_) => {
                tracing::error!("{self}");
                self.to_string()
            }
        };

        let body = serde_json::json!({
            "result": "error",
            "message": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Router fallback for a known path hit with the wrong verb.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
