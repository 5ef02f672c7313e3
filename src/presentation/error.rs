// HTTP error mapping
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("pet not found: {0}")]
    PetNotFound(String),

    #[error("unknown severity: {0}")]
    InvalidSeverity(String),

    #[error("telemetry source unavailable: {0}")]
    Upstream(#[from] anyhow::Error),

    #[error("failed to encode response")]
    Encoding,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::PetNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidSeverity(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Encoding => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::PetNotFound("9".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::InvalidSeverity("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Upstream(anyhow::anyhow!("down")).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ApiError::PetNotFound("9".into()).to_string(), "pet not found: 9");
    }
}
