#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use httpmock::MockServer;
use tower::ServiceExt;

use sbtet_api::config::ServerConfig;
use sbtet_api::router::build_app_router;
use sbtet_api::state::AppState;
use sbtet_upstream::UpstreamConfig;

pub const ATTENDANCE_PATH: &str = "/api/api/PreExamination/getAttendanceReport";
pub const ATTENDANCE_FALLBACK_PATH: &str = "/api/PreExamination/getAttendanceReport";
pub const RESULTS_PATH: &str = "/api/api/Results/GetConsolidatedResults";
pub const RESULTS_FALLBACK_PATH: &str = "/api/Results/GetConsolidatedResults";

/// Build a test `ServerConfig` pointing every upstream template at `upstream_base`.
///
/// Uses `http://localhost:5173` as the only CORS origin and the default
/// 45-second request timeout.
pub fn test_config(upstream_base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 45,
        upstream: UpstreamConfig::with_base_url(upstream_base),
    }
}

/// Build the full application router against a mock upstream.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the whole middleware
/// stack (CORS, request ID, timeout, tracing, panic recovery) is exercised.
pub fn build_test_app(upstream: &MockServer) -> Router {
    let config = test_config(&upstream.base_url());
    let state = AppState::new(config.clone());
    build_app_router(state, &config)
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A results page long enough to pass the empty-page check.
pub fn results_page() -> String {
    r#"<html><body>
<div><strong>Name:</strong> RAVI KUMAR<br><strong>PIN:</strong> 24054-CPS-020<br><strong>Branch:</strong> CPS</div>
<div><strong>CGPA:</strong> 8.12</div>
<div><strong>Credits:</strong> 40.0/40.0</div>
<table class="data-table">
<tr><th>Semester</th><th>Subject</th><th>Code</th><th>Type</th><th>Marks</th><th>Grade</th><th>Grade Point</th><th>Credits</th></tr>
<tr><td>1SEM</td><td>English</td><td>101</td><td>T</td><td>78</td><td>A</td><td>8</td><td>2.5</td></tr>
</table>
<script>const sgpaData = [{"credits": 20.0, "sem_id": 1, "semester": "1SEM", "sgpa": 7.88, "total_grade_points": 157.5}];</script>
</body></html>"#
        .to_string()
}
