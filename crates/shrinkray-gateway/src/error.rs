use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shrinkray_core::Status;
use shrinkray_shortener::LinkError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// A failed operation, rendered as a plain-text response.
#[derive(Debug)]
pub struct AppError {
    status: Status,
    error: LinkError,
}

impl AppError {
    pub fn new(status: Status, error: LinkError) -> Self {
        Self { status, error }
    }

    pub fn status_code(&self) -> StatusCode {
        status_code(self.status)
    }
}

pub fn status_code(status: Status) -> StatusCode {
    match status {
        Status::Success | Status::LinkFound => StatusCode::OK,
        Status::LinkNotFound => StatusCode::NOT_FOUND,
        Status::BadKey | Status::BadLink => StatusCode::BAD_REQUEST,
        Status::RetrievalError | Status::Uncategorized => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if code.is_server_error() {
            error!(status = %self.status, error = %self.error, "request failed");
        }
        (code, format!("{}: {}", self.status, self.error)).into_response()
    }
}
