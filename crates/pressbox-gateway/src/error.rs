use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pressbox_index::{ExtractError, IndexError};
use pressbox_report::GenerationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind {0}: {1}")]
    Bind(String, std::io::Error),
    #[error("server error: {0}")]
    Server(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("no document has been uploaded yet")]
    NoActiveSession,

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NoActiveSession => StatusCode::CONFLICT,
            Self::Extraction(ExtractError::FileTooLarge(_)) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Index(IndexError::Embed(_)) | Self::Generation(_) => StatusCode::BAD_GATEWAY,
            Self::Index(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request failed");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NoActiveSession.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Extraction(ExtractError::NoText).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Extraction(ExtractError::FileTooLarge(99)).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::Index(IndexError::EmptyBuild).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_serializes() {
        let body = ErrorBody {
            error: "boom".into(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
