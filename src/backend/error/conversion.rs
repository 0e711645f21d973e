/**
 * Error Conversion
 *
 * This module converts `ApiError` into HTTP responses. Handlers return
 * `Result<_, ApiError>` and the error is rendered as a JSON body with the
 * appropriate status code:
 *
 * ```json
 * {
 *   "success": false,
 *   "error": "Story not found",
 *   "status": 404
 * }
 * ```
 *
 * Internal failures (database, serialization) are logged with their full
 * detail here and rendered with a generic message.
 */

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal failures with full detail before it is discarded
        match &self {
            ApiError::Database(e) => tracing::error!("Database error: {:?}", e),
            ApiError::Serialization(e) => tracing::error!("Serialization error: {:?}", e),
            ApiError::Internal { message } => tracing::error!("Internal error: {}", message),
            other => tracing::debug!("Request failed: {}", other),
        }

        let message = self.client_message();
        let body = serde_json::json!({
            "success": false,
            "error": message,
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap_or_else(|_| {
                format!(r#"{{"success":false,"error":"{}","status":{}}}"#, message, status.as_u16())
            })))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_status() {
        let response = ApiError::not_found("Story").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_into_response_content_type() {
        let response = ApiError::validation("bad").into_response();
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }
}
