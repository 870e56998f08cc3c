//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error response with the given status and a message containing `needle`
pub fn assert_json_error(response: &TestResponse, expected: StatusCode, needle: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"].as_u64(), Some(expected.as_u16() as u64));
    let message = json["error"].as_str().unwrap_or_default();
    assert!(
        message.contains(needle),
        "Expected error containing {:?}, got {:?}",
        needle,
        message
    );
}
