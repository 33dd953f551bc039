//! Response construction helpers.
//!
//! The bridge never rewrites child responses; this module only builds the
//! JSON bodies the bridge produces itself.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// JSON error body with the given status.
pub fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// 503 returned when the child cannot be reached on the pass-through path.
pub fn child_unreachable() -> Response {
    json_error(StatusCode::SERVICE_UNAVAILABLE, "application not ready")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_status() {
        let response = json_error(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_child_unreachable_is_503() {
        assert_eq!(
            child_unreachable().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
