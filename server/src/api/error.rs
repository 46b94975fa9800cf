//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use stackset_status_common::{error::StatusError, protocol::ErrorResponse};
use tracing::{error, warn};

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub StatusError);

impl From<StatusError> for AppError {
    fn from(err: StatusError) -> Self {
        AppError(err)
    }
}

impl AppError {
    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            StatusError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StatusError::Scheduling(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StatusError::NoSuccessfulProbe { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StatusError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = self.0.to_string();

        if self.0.is_client_error() {
            warn!(error_type = self.0.error_type(), "{}", message);
        } else {
            error!(error_type = self.0.error_type(), "{}", message);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
