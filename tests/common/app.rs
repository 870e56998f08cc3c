//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use stixis::assets::AssetLoader;
use stixis::models::AppConfig;
use stixis::server::{app_state_from_config, build_router, create_app_state, AppState};

use super::fixtures::MultipartForm;

/// Test application wrapping the production router
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Create a new test application using the embedded config
    pub fn new() -> Self {
        let asset_loader = Arc::new(AssetLoader::new(None));
        let state = create_app_state(asset_loader).expect("Failed to create app state");
        Self::from_state(state)
    }

    /// Create a test application around a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self::from_state(app_state_from_config(Arc::new(config)))
    }

    fn from_state(state: AppState) -> Self {
        let router = build_router(state.clone());
        Self { router, state }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a multipart form, optionally asking for JSON
    pub async fn post_form(&self, path: &str, form: MultipartForm, json: bool) -> TestResponse {
        let (content_type, body) = form.build();
        let mut builder = Request::post(path).header("Content-Type", content_type);
        if json {
            builder = builder.header("Accept", "application/json");
        }
        self.request(builder.body(Body::from(body)).unwrap()).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
