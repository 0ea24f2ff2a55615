use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use datamarket_common::MarketError;
use tracing::{error, warn};

use crate::types::ErrorResponse;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// HTTP adapter for [`MarketError`]
///
/// Full detail goes to the log; the body only carries the sanitized message.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub MarketError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed ({}): {}", status, self.0);
        } else {
            warn!("Request rejected ({}): {}", status, self.0);
        }

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            error: self.0.public_message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_error_body_is_sanitized() {
        let err = ApiError(MarketError::llm("401 Unauthorized: key sk-live-123 revoked"));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(!json["error"].as_str().unwrap().contains("sk-live-123"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(MarketError::invalid_input("bad")).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(MarketError::provider_unavailable("429")).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
