//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use sbtet_api::error::AppError;
use sbtet_core::error::CoreError;
use sbtet_upstream::FetchError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn exhausted(last: FetchError) -> AppError {
    AppError::Upstream(FetchError::Exhausted {
        attempts: 2,
        last: Box::new(last),
    })
}

#[tokio::test]
async fn missing_parameter_returns_400() {
    let (status, json) = error_to_response(AppError::MissingParameter("pin")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Missing pin parameter");
}

#[tokio::test]
async fn core_not_found_returns_404_with_message() {
    let err = AppError::Core(CoreError::NotFound("No data".into()));
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No data");
}

#[tokio::test]
async fn timeout_returns_504() {
    let err = AppError::Upstream(FetchError::Timeout { url: "u".into() });
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(json["error"], "Request timeout. Please try again.");
}

#[tokio::test]
async fn results_page_not_found_returns_404() {
    let err = AppError::Upstream(FetchError::NotFound { url: "u".into() });
    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exhausted_404_returns_404() {
    let err = exhausted(FetchError::Http {
        url: "u".into(),
        status: 404,
    });
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Student not found. Please check the PIN.");
}

#[tokio::test]
async fn exhausted_http_error_passes_status_through() {
    let err = exhausted(FetchError::Http {
        url: "u".into(),
        status: 500,
    });
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "HTTP Error: 500");
}

#[tokio::test]
async fn empty_page_returns_502() {
    let err = AppError::Upstream(FetchError::EmptyPage {
        url: "u".into(),
        len: 10,
    });
    let (status, _) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn unknown_upstream_failure_returns_500() {
    let (status, json) = error_to_response(AppError::Upstream(FetchError::Unknown)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Server error: unknown upstream failure");
}

#[tokio::test]
async fn invalid_query_returns_400() {
    let reason = "Failed to deserialize query string: duplicate field `pin`";
    let err = AppError::InvalidQuery(reason.into());
    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], reason);
}
