use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use halftone::{ConfigError, HalftoneError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unsupported file type: {0} (expected png, jpg or jpeg)")]
    UnsupportedExtension(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: String, value: String },

    #[error("Malformed upload: {0}")]
    Multipart(String),

    #[error("Upload too large: {0}")]
    TooLarge(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(e: axum::extract::multipart::MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::TooLarge(e.body_text())
        } else {
            ApiError::Multipart(e.body_text())
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("{0}")]
    Halftone(#[from] HalftoneError),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for RenderError {
    fn from(e: ConfigError) -> Self {
        RenderError::Halftone(e.into())
    }
}

impl RenderError {
    /// Whether the failure was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RenderError::Decode(_) | RenderError::UnknownPreset(_) | RenderError::Halftone(_)
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingField(_)
            | ApiError::UnsupportedExtension(_)
            | ApiError::InvalidField { .. }
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Render(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = match &self {
            ApiError::Render(e) => e.to_string(),
            _ => self.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        } else {
            tracing::debug!(error = %message, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_missing_field() {
        let error = ApiError::MissingField("file");
        assert_eq!(error.to_string(), "Missing required field: file");
    }

    #[test]
    fn test_api_error_unsupported_extension() {
        let error = ApiError::UnsupportedExtension("gif".to_string());
        assert_eq!(
            error.to_string(),
            "Unsupported file type: gif (expected png, jpg or jpeg)"
        );
    }

    #[test]
    fn test_api_error_invalid_field() {
        let error = ApiError::InvalidField {
            field: "num_colors".to_string(),
            value: "many".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid value for num_colors: many");
    }

    #[test]
    fn test_render_error_config_passthrough() {
        let error: RenderError = ConfigError::PaletteSizeZero.into();
        assert_eq!(
            error.to_string(),
            "invalid configuration: palette_size must be at least 1"
        );
        assert!(error.is_client_error());
    }

    #[test]
    fn test_render_error_unknown_preset() {
        let error = RenderError::UnknownPreset("poster".to_string());
        assert_eq!(error.to_string(), "Unknown preset: poster");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_render_error_io_is_server_side() {
        let error: RenderError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert_eq!(error.to_string(), "IO error: disk full");
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::MissingField("file").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::UnsupportedExtension("bmp".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Render(RenderError::Decode("truncated".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let geometry = HalftoneError::Geometry {
            width: 3,
            height: 3,
            divisions: 5,
        };
        let response = ApiError::Render(geometry.into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::Render(RenderError::Task("panicked".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::TooLarge("length limit exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let response = ApiError::Internal("error".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
