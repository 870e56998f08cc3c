//! Tests for file rendering and the grid search, writing into temp dirs.

mod common;

use common::fixtures;
use pretty_assertions::assert_eq;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

use stixis::error::RenderError;
use stixis::models::{AppConfig, ProcessingParams};
use stixis::services::{run_grid_search, HalftoneService};

fn service() -> HalftoneService {
    HalftoneService::new(Arc::new(AppConfig::default()))
}

#[test]
fn test_render_file_writes_named_png() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("beach.png");
    fs::write(&input, fixtures::split_gray_png(40, 40)).unwrap();
    let output_dir = dir.path().join("out").join("nested");

    let service = service();
    let overrides = ProcessingParams {
        num_colors: Some(4),
        enhance_contrast: Some(true),
        ..Default::default()
    };
    let config = service.resolve_config(None, &overrides).unwrap();
    let written = service.render_file(&input, &output_dir, &config).unwrap();

    assert_eq!(written, output_dir.join("beach_GS4_DIV4_contrast.png"));
    let (width, height, color, _) = fixtures::decode_png(&fs::read(&written).unwrap());
    assert_eq!((width, height), (40, 40));
    assert_eq!(color, png::ColorType::Grayscale);
}

#[test]
fn test_render_file_missing_input() {
    let dir = TempDir::new().unwrap();
    let config = service()
        .resolve_config(None, &ProcessingParams::default())
        .unwrap();

    let err = service()
        .render_file(&dir.path().join("absent.png"), dir.path(), &config)
        .unwrap_err();
    assert!(matches!(err, RenderError::Io(_)));
}

#[test]
fn test_render_file_image_too_small_for_grid() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("tiny.png");
    fs::write(&input, fixtures::flat_gray_png(3, 30, 128)).unwrap();

    let config = service()
        .resolve_config(None, &ProcessingParams::default())
        .unwrap();
    let err = service()
        .render_file(&input, dir.path(), &config)
        .unwrap_err();

    assert!(err.is_client_error());
    assert!(err.to_string().contains("too small"), "{}", err);
    assert!(!dir.path().join("tiny_GS5_DIV5.png").exists());
}

#[tokio::test]
async fn test_render_runs_off_the_runtime() {
    let service = service();
    let config = service
        .resolve_config(None, &ProcessingParams::default())
        .unwrap();

    let rendered = service
        .render(fixtures::flat_gray_png(25, 25, 255), config)
        .await
        .unwrap();
    assert_eq!((rendered.width(), rendered.height()), (25, 25));
    assert_eq!(rendered.report.circles_drawn, 25);
}

#[test]
fn test_grid_search_writes_every_combination() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("portrait.png");
    fs::write(&input, fixtures::split_gray_png(20, 24)).unwrap();

    let config = service()
        .resolve_config(None, &ProcessingParams::default())
        .unwrap();
    let report = run_grid_search(&input, dir.path(), &config).unwrap();

    // Divisions 4, 8 and 10 for a shorter side of 20
    assert_eq!(report.output_dir, dir.path().join("portrait_stixis_patterns"));
    assert!(report.failed.is_empty(), "{:?}", report.failed);
    assert_eq!(report.written.len(), 5 * 3 * 2 * 2);

    let mut names: Vec<String> = fs::read_dir(&report.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names.len(), 60);
    assert!(names.contains(&"portrait_GS2_DIV4.png".to_string()));
    assert!(names.contains(&"portrait_GS10_DIV10_smooth_contrast.png".to_string()));
    assert!(names.contains(&"portrait_GS6_DIV8_contrast.png".to_string()));
}

#[test]
fn test_grid_search_on_tiny_image_renders_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dot.png");
    fs::write(&input, fixtures::flat_gray_png(6, 6, 255)).unwrap();

    let config = service()
        .resolve_config(None, &ProcessingParams::default())
        .unwrap();
    let report = run_grid_search(&input, dir.path(), &config).unwrap();

    assert_eq!(report.total(), 0);
}

#[test]
fn test_grid_search_rejects_undecodable_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("notes.png");
    fs::write(&input, "plain text").unwrap();

    let config = service()
        .resolve_config(None, &ProcessingParams::default())
        .unwrap();
    let err = run_grid_search(&input, dir.path(), &config).unwrap_err();
    assert!(matches!(err, RenderError::Decode(_)));
}
