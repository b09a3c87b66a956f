//! Error conversions - HTTP rendering of [`AppError`]

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut body = serde_json::json!({
            "status": self.status_code(),
            "error": self.kind().as_str(),
            "message": self.message(),
        });
        if let Some(action) = self.action() {
            body["action"] = serde_json::Value::from(action);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_into_response_body_shape() {
        let response = AppError::unauthorized("Invalid credentials").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], 401);
        assert_eq!(json["error"], "Unauthorized");
        assert_eq!(json["message"], "Invalid credentials");
        assert!(json.get("action").is_none());
    }

    #[tokio::test]
    async fn test_into_response_with_action() {
        let response = AppError::too_many_requests("Too many login attempts")
            .with_action("Wait before retrying")
            .into_response();
        assert_eq!(response.status().as_u16(), 429);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["action"], "Wait before retrying");
    }
}
