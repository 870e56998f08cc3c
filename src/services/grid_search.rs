//! Parameter sweep over one image.
//!
//! Renders every combination of tone count, grid divisions, smoothing and
//! contrast stretching into a `<stem>_stixis_patterns` directory so the
//! results can be compared side by side.

use halftone::ProcessingConfig;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RenderError;
use crate::rendering::decode_image;
use crate::services::halftone_service::render_image;
use crate::services::naming::{input_stem, output_filename};

/// Tone counts tried by the sweep
pub const SEARCH_COLORS: [u32; 5] = [2, 4, 6, 8, 10];
/// Fixed division counts tried by the sweep
pub const SEARCH_DIVISIONS: [u32; 4] = [4, 8, 16, 32];
/// Cap on the image-dependent division count
pub const MAX_SEARCH_DIVISIONS: u32 = 50;
/// Sigma used for the smoothed variants
pub const SEARCH_SIGMA: f64 = 1.5;
/// Percentiles used for the contrast-stretched variants
pub const SEARCH_PERCENTILES: (f64, f64) = (2.0, 98.0);

/// Outcome of a sweep
#[derive(Debug, Default)]
pub struct SearchReport {
    pub output_dir: PathBuf,
    pub written: Vec<PathBuf>,
    /// File name that would have been written, and why it was not
    pub failed: Vec<(String, String)>,
}

impl SearchReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Division counts worth trying for an image whose shorter side is `min_dim`.
///
/// 4, 8, 16, 32 and `min(min_dim / 2, 50)`, keeping only values the engine
/// accepts for this image, ascending and without duplicates.
pub fn division_candidates(min_dim: usize) -> Vec<u32> {
    let max = u32::try_from(min_dim / 2).unwrap_or(u32::MAX);
    let mut divisions: Vec<u32> = SEARCH_DIVISIONS
        .iter()
        .copied()
        .chain(std::iter::once(max.min(MAX_SEARCH_DIVISIONS)))
        .filter(|d| (4..=max).contains(d))
        .collect();
    divisions.sort_unstable();
    divisions.dedup();
    divisions
}

/// Every sweep configuration for an image with shorter side `min_dim`,
/// derived from `base` (threshold, curve, mode and the like carry over).
pub fn search_configs(base: &ProcessingConfig, min_dim: usize) -> Vec<ProcessingConfig> {
    let mut configs = Vec::new();
    for &colors in &SEARCH_COLORS {
        for &divisions in &division_candidates(min_dim) {
            for smoothing in [false, true] {
                for contrast in [false, true] {
                    let mut config = base.clone().num_colors(colors).grid_size(divisions);
                    config.smoothing = smoothing;
                    config.smoothing_sigma = SEARCH_SIGMA;
                    config.enhance_contrast = contrast;
                    config.contrast_percentile = SEARCH_PERCENTILES;
                    configs.push(config);
                }
            }
        }
    }
    configs
}

/// Sweep `input`, writing into `<output_root>/<stem>_stixis_patterns/`.
///
/// A combination that fails to render is logged and recorded in the report;
/// the sweep continues with the next one.
pub fn run_grid_search(
    input: &Path,
    output_root: &Path,
    base: &ProcessingConfig,
) -> Result<SearchReport, RenderError> {
    let image = decode_image(&fs::read(input)?)?;
    let stem = input_stem(input);
    let output_dir = output_root.join(format!("{}_stixis_patterns", stem));
    fs::create_dir_all(&output_dir)?;

    let configs = search_configs(base, image.width().min(image.height()));
    tracing::info!(
        input = %input.display(),
        output_dir = %output_dir.display(),
        combinations = configs.len(),
        "Starting grid search"
    );

    let mut report = SearchReport {
        output_dir,
        ..Default::default()
    };
    for (i, config) in configs.iter().enumerate() {
        let name = output_filename(&stem, config);
        tracing::debug!(
            combination = i + 1,
            total = configs.len(),
            colors = config.num_colors,
            divisions = config.divisions(),
            smoothing = config.smoothing,
            contrast = config.enhance_contrast,
            "Rendering combination"
        );

        let path = report.output_dir.join(&name);
        match render_image(&image, config)
            .and_then(|r| fs::write(&path, r.png).map_err(RenderError::from))
        {
            Ok(()) => report.written.push(path),
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Combination failed, skipping");
                report.failed.push((name, e.to_string()));
            }
        }
    }

    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "Grid search finished"
    );
    Ok(report)
}
