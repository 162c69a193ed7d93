use crate::error::GuideError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// ハンドラのエラー。`{"error": "..."}` とステータスコードで返す
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

pub fn status_for(err: &GuideError) -> StatusCode {
    match err {
        GuideError::RemoteNotFound(_)
        | GuideError::OrganizationNotFound(_)
        | GuideError::ProposalNotFound { .. } => StatusCode::NOT_FOUND,
        GuideError::InvalidFileName(_) | GuideError::Common(_) => StatusCode::BAD_REQUEST,
        GuideError::Metadata(_) | GuideError::RemoteStatus { .. } | GuideError::Http(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<GuideError> for ApiError {
    fn from(err: GuideError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            error!(error = %err, "リクエスト処理に失敗");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
