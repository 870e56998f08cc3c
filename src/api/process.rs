use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Json, Response},
};
use base64::Engine;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ProcessingParams;
use crate::rendering::codec::{extension, is_allowed_file};
use crate::services::naming::upload_stem;
use crate::services::{output_filename, HalftoneService};

/// Multipart form accepted by `/api/process` (documentation only)
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct ProcessForm {
    /// Image file (png, jpg or jpeg)
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    /// Tone count, 2-10 (also the grid divisions without a custom grid)
    num_colors: Option<u32>,
    /// `true` to use `grid_size`
    use_custom_grid: Option<bool>,
    /// Grid divisions along the shorter side
    grid_size: Option<u32>,
    use_smoothing: Option<bool>,
    smoothing_sigma: Option<f64>,
    enhance_contrast: Option<bool>,
    invert: Option<bool>,
    /// linear, logarithmic, exponential, sigmoid, power or adaptive
    brightness_mapping: Option<String>,
    gamma: Option<f64>,
    darkness_threshold: Option<f64>,
    /// Apply the brightness curve without smoothing as well
    curve_always: Option<bool>,
    /// 1, 2, 4 or 8
    upscale_factor: Option<u32>,
    /// `true` for palette-colored circles
    color_mode: Option<bool>,
    palette_size: Option<u32>,
    /// median-cut or kmeans
    palette_strategy: Option<String>,
    /// Preset name from config.yaml
    preset: Option<String>,
}

/// JSON response for `Accept: application/json`
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessJsonResponse {
    pub message: String,
    /// Suggested file name for the result
    pub filename: String,
    pub width: usize,
    pub height: usize,
    /// Circles drawn
    pub circles: usize,
    /// PNG as a `data:image/png;base64,...` URL
    pub image: String,
}

/// Text fields of an upload, before they are turned into parameters
#[derive(Debug, Default)]
struct UploadForm {
    params: ProcessingParams,
    use_custom_grid: bool,
    grid_size: Option<u32>,
    preset: Option<String>,
}

impl UploadForm {
    fn set(&mut self, name: &str, value: &str) -> Result<(), ApiError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(());
        }
        let p = &mut self.params;
        match name {
            "num_colors" => p.num_colors = Some(parse(name, value)?),
            "use_custom_grid" => self.use_custom_grid = parse_flag(value),
            "grid_size" => self.grid_size = Some(parse(name, value)?),
            "use_smoothing" => p.smoothing = Some(parse_flag(value)),
            "smoothing_sigma" => p.smoothing_sigma = Some(parse(name, value)?),
            "enhance_contrast" => p.enhance_contrast = Some(parse_flag(value)),
            "invert" => p.invert = Some(parse_flag(value)),
            "brightness_mapping" => p.brightness_mapping = Some(value.to_string()),
            "gamma" => p.gamma = Some(parse(name, value)?),
            "darkness_threshold" => p.darkness_threshold = Some(parse(name, value)?),
            "curve_always" => p.curve_always = Some(parse_flag(value)),
            "upscale_factor" => p.upscale_factor = Some(parse(name, value)?),
            "color_mode" => p.color = Some(parse_flag(value)),
            "palette_size" => p.palette_size = Some(parse(name, value)?),
            "palette_strategy" => p.palette_strategy = Some(value.to_string()),
            "preset" => self.preset = Some(value.to_string()),
            _ => tracing::debug!(field = name, "Ignoring unknown form field"),
        }
        Ok(())
    }

    /// Parameters with the grid size applied only when a custom grid was requested
    fn into_params(self) -> (Option<String>, ProcessingParams) {
        let mut params = self.params;
        if self.use_custom_grid {
            params.grid_size = self.grid_size;
        }
        (self.preset, params)
    }
}

fn parse<T: FromStr>(field: &str, value: &str) -> Result<T, ApiError> {
    value.parse().map_err(|_| ApiError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// HTML checkboxes send `on` (or whatever `value` says); anything else is off.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

/// Render an uploaded image
///
/// Returns the halftone PNG, or a JSON document with the PNG embedded as a
/// data URL when the request accepts `application/json`.
#[utoipa::path(
    post,
    path = "/api/process",
    request_body(content = ProcessForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rendered PNG (image/png), or this document when the request accepts application/json", body = ProcessJsonResponse),
        (status = 400, description = "Missing file, unsupported type, undecodable image or invalid parameters"),
        (status = 500, description = "Rendering failed"),
    ),
    tag = "Processing"
)]
pub async fn handle_process(
    State(service): State<Arc<HalftoneService>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut upload = None;
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            upload = Some((filename, data));
        } else {
            let value = field.text().await?;
            form.set(&name, &value)?;
        }
    }

    let (filename, data) = upload.ok_or(ApiError::MissingField("file"))?;
    if filename.is_empty() {
        return Err(ApiError::MissingField("file"));
    }
    if !is_allowed_file(&filename) {
        return Err(ApiError::UnsupportedExtension(
            extension(&filename).unwrap_or(filename),
        ));
    }

    let (preset, params) = form.into_params();
    let config = service.resolve_config(preset.as_deref(), &params)?;
    let output_name = output_filename(&upload_stem(&filename), &config);

    tracing::info!(
        filename = %filename,
        bytes = data.len(),
        preset = preset.as_deref().unwrap_or("-"),
        "Processing upload"
    );

    let rendered = service.render(data.to_vec(), config).await?;

    tracing::info!(
        output = %output_name,
        width = rendered.width(),
        height = rendered.height(),
        circles = rendered.report.circles_drawn,
        "Upload processed"
    );

    if wants_json(&headers) {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&rendered.png);
        return Ok(Json(ProcessJsonResponse {
            message: "Image processed successfully".to_string(),
            filename: output_name,
            width: rendered.width(),
            height: rendered.height(),
            circles: rendered.report.circles_drawn,
            image: format!("data:image/png;base64,{}", encoded),
        })
        .into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", output_name),
            ),
        ],
        rendered.png,
    )
        .into_response())
}
