use axum::{extract::State, response::Html};
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;

const PRESET_MARKER: &str = "<!-- PRESET_OPTIONS -->";

/// Upload page with the configured presets filled in
pub async fn handle_index(
    State(config): State<Arc<AppConfig>>,
) -> Result<Html<String>, ApiError> {
    let page = AssetLoader::upload_page().map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Html(page.replace(
        PRESET_MARKER,
        &preset_options(&config.preset_names()),
    )))
}

fn preset_options(names: &[&str]) -> String {
    names
        .iter()
        .map(|name| {
            let name = escape_html(name);
            format!("<option value=\"{name}\">{name}</option>")
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

/// Simple HTML escape for names taken from config.yaml
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
