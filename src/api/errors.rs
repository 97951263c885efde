use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::warn;
use crate::errors::DentalError;

impl DentalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DentalError::InvalidArgument(_) | DentalError::Config(_) => StatusCode::BAD_REQUEST,
            DentalError::Authentication(_) => StatusCode::UNAUTHORIZED,
            DentalError::Permission(_) => StatusCode::FORBIDDEN,
            DentalError::NotFound(_) => StatusCode::NOT_FOUND,
            DentalError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            DentalError::LLMApi(_) | DentalError::Network(_) => StatusCode::BAD_GATEWAY,
            DentalError::ChatUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DentalError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(error_type = self.error_type(), error = %self, "Request failed");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
